//! Internal error kinds kept inside the core (§7): these never cross the
//! wire. The room coordinator translates them into the protocol's
//! acknowledgement codes (`server::ProtocolError`).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("malformed square label: {0}")]
    MalformedSquare(String),

    #[error("generator invoked on a square with no piece, or a piece not owned by the side to move")]
    GeneratorMisuse,

    #[error("applier invoked with a resolved move that does not match any legal outcome from its origin square")]
    UnmatchableMove,

    #[error("attack oracle portal scan could not expand a synthetic move")]
    OracleExpansionFailure,
}
