//! Display state machine
//!
//! Decides, from host lifecycle events, what the face looks like and
//! whether the redraw timer may run. The machine is explicit, finite and
//! deterministic; it performs no side effects itself.

pub mod events;
pub mod machine;

pub use events::FaceEvent;
pub use machine::{DisplayState, DisplayStateMachine, Transition, ZoneSubscription};
