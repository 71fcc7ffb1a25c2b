//! The move-resolution pipeline (§4): generator → expander → attack
//! oracle / legality filter → applier → result evaluator.

pub mod applier;
pub mod attack_oracle;
pub mod base_move;
pub mod expander;
pub mod generator;
pub mod geometry;
pub mod legality;
pub mod resolved_move;
pub mod result;

pub use applier::apply;
pub use attack_oracle::is_square_attacked;
pub use base_move::{BaseMove, BaseMoveKind, MoveMeta};
pub use expander::expand;
pub use generator::generate;
pub use legality::{all_legal_moves, in_check, legal_moves_from};
pub use resolved_move::{PortalChoice, ResolvedMove, ViaPortal};
pub use result::{game_result, GameOutcome, GameResult};
