//! Reel Animation System
//!
//! Frame scheduling for animated widgets.
//!
//! # Features
//!
//! - **One-shot frame requests**: widgets ask for the next frame and re-ask
//!   from inside the frame, so a widget that stops asking stops animating
//! - **Cancellable**: a pending request can be withdrawn at any time before
//!   it is delivered, and [`FrameTask`] withdraws it automatically on drop
//! - **Host agnostic**: any event loop can implement [`FrameScheduler`]

pub mod scheduler;

pub use scheduler::{
    AnimationScheduler, DueFrame, FrameBatch, FrameId, FrameScheduler, FrameTask, SchedulerHandle,
};
