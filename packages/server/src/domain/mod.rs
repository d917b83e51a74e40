//! Domain layer: board state, connections and the ports the relay depends on.

pub mod entity;
pub mod error;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Board, BoardSnapshot, BoardSummary, Connection, ConnectionPhase};
pub use error::{PushError, TransitionError};
pub use pusher::{EventPusher, PusherChannel};
pub use repository::BoardRepository;
pub use value_object::{ClearGeneration, ConnectionId, ConnectionIdFactory, Timestamp};

pub use rakugaki_shared::segment::StrokeSegment;
