//! Reel Core
//!
//! Foundational primitives shared by the Reel widget crates:
//!
//! - **Geometry**: points, sizes, rects and 2D affine transforms
//! - **State Machines**: typed, event-driven state enums for widget behaviour
//! - **Event Plumbing**: event payloads and a listener registry with scoped
//!   subscriptions
//!
//! # Example
//!
//! ```rust
//! use reel_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Light {
//!     Off,
//!     On,
//! }
//!
//! const TOGGLE: u32 = 1;
//!
//! impl StateTransitions for Light {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Light::Off, TOGGLE) => Some(Light::On),
//!             (Light::On, TOGGLE) => Some(Light::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Light::Off);
//! fsm.send(TOGGLE);
//! assert!(fsm.is_in(Light::On));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{
    Event, EventData, EventDispatcher, EventType, ListenerId, ListenerOptions, SharedDispatcher,
    Subscription,
};
pub use fsm::{EventId, StateMachine, StateTransitions};
pub use geometry::{Affine2D, Point, Rect, Size};
