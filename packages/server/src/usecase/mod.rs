//! UseCase layer: application logic on top of the domain interfaces.

pub mod broadcast_router;
pub mod error;
pub mod get_board_state;
pub mod sequencer;
pub mod session_lifecycle;
pub mod signaling_relay;

#[cfg(test)]
mod fixture;

pub use broadcast_router::BroadcastRouter;
pub use error::{ConnectError, RouteError};
pub use get_board_state::{BoardState, GetBoardStateUseCase};
pub use sequencer::{EventSequencer, Turn};
pub use session_lifecycle::SessionLifecycle;
pub use signaling_relay::SignalingRelay;
