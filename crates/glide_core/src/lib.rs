//! Glide Core
//!
//! Foundational primitives shared by the Glide scrolling crates:
//!
//! - **Input Events**: Host-neutral pointer and wheel events
//! - **Platform**: OS-specific input quirks behind one enum
//! - **State Machines**: Typed transition tables for widget states

pub mod events;
pub mod fsm;
pub mod platform;

pub use events::{buttons, Modifiers, PointerButton, PointerEvent, TargetId, WheelEvent};
pub use fsm::{StateMachine, StateTransitions};
pub use platform::{Platform, POINTER_DRAG_RESET_DISTANCE};
