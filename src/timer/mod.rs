//! Timer module for the EyeCare reminder.
//!
//! - `core`: work/rest state machine and its event channel
//! - `clock`: one-second tick source injected by the caller

pub mod clock;
pub mod core;

pub use self::clock::TickClock;
pub use self::core::{TimerCore, TimerEvent};
