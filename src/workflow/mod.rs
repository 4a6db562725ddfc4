//! The generation workflow: the client-side state store and its request/retry
//! loop.

pub mod retry;
pub mod state;

pub use retry::{send_with_retry, RetryPolicy};
pub use state::{FitRoom, FitRoomState, Notification, NotificationVariant};
