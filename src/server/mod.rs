//! The authoritative room/match coordinator (§4.7) and wire protocol
//! (§6): the only part of the crate that touches sockets or timers.

pub mod clock;
pub mod coordinator;
pub mod protocol;
pub mod room;

pub use coordinator::{Coordinator, EventSender};
pub use protocol::{
    Ack, Clocks, CreateRoomPayload, EndResult, JoinRoomPayload, MakeMovePayload, ProtocolError,
    ServerEvent,
};
pub use room::{Room, RoomPhase, SocketId};
