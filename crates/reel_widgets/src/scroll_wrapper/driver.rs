//! Animation driver
//!
//! Keeps exactly one frame request alive while auto-scrolling. The frame loop
//! is an explicit two-state machine: `start` arms a request and enters
//! `Running`, each accepted frame re-arms the next one, and `stop` drops the
//! pending request and returns to `Idle`.

use std::fmt;
use std::sync::Arc;

use reel_animation::{FrameId, FrameScheduler, FrameTask};
use reel_core::fsm::{EventId, StateMachine, StateTransitions};

/// Driver events
pub mod driver_events {
    use reel_core::fsm::EventId;

    pub const START: EventId = 1;
    pub const STOP: EventId = 2;
}

/// Whether the frame loop is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Running,
}

impl StateTransitions for DriverState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use driver_events::*;

        match (self, event) {
            (DriverState::Idle, START) => Some(DriverState::Running),
            (DriverState::Running, STOP) => Some(DriverState::Idle),
            _ => None,
        }
    }
}

/// Owns the pending frame request for one widget
pub struct AnimationDriver {
    owner: u64,
    scheduler: Arc<dyn FrameScheduler>,
    fsm: StateMachine<DriverState>,
    pending: Option<FrameTask>,
}

impl AnimationDriver {
    /// Create an idle driver that requests frames on behalf of `owner`
    pub fn new(owner: u64, scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self {
            owner,
            scheduler,
            fsm: StateMachine::default(),
            pending: None,
        }
    }

    /// Begin auto-scrolling
    ///
    /// No-op unless the content overflows, auto-scroll is enabled and the
    /// driver is idle. Returns whether the driver is running afterwards.
    pub fn start(&mut self, needs_scroll: bool, auto_scroll: bool) -> bool {
        if !needs_scroll || !auto_scroll || !self.fsm.can_send(driver_events::START) {
            return self.is_running();
        }

        let Some(task) = FrameTask::request(&self.scheduler, self.owner) else {
            tracing::debug!("no frame scheduler for widget {}, not starting", self.owner);
            return false;
        };

        self.pending = Some(task);
        self.fsm.send(driver_events::START);
        tracing::debug!("scroll driver started for widget {}", self.owner);
        true
    }

    /// Stop auto-scrolling, cancelling any pending frame
    pub fn stop(&mut self) {
        // Dropping the task cancels it
        self.pending = None;
        if self.fsm.can_send(driver_events::STOP) {
            self.fsm.send(driver_events::STOP);
            tracing::debug!("scroll driver stopped for widget {}", self.owner);
        }
    }

    /// Claim a delivered frame
    ///
    /// Returns `true` only for the frame this driver is waiting on. The
    /// caller advances the scroll state and then calls [`reschedule`].
    ///
    /// [`reschedule`]: AnimationDriver::reschedule
    pub fn accept_frame(&mut self, frame: FrameId) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.pending.take() {
            Some(task) if task.id() == frame => {
                task.complete();
                true
            }
            other => {
                self.pending = other;
                tracing::trace!("ignoring stale frame {:?}", frame);
                false
            }
        }
    }

    /// Request the next frame after an accepted one
    ///
    /// Falls back to `Idle` when the scheduler has gone away.
    pub fn reschedule(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        match FrameTask::request(&self.scheduler, self.owner) {
            Some(task) => {
                self.pending = Some(task);
                true
            }
            None => {
                self.stop();
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.fsm.is_in(DriverState::Running)
    }

    pub fn state(&self) -> DriverState {
        self.fsm.current_state()
    }

    /// Id of the frame currently requested, if any
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending.as_ref().map(FrameTask::id)
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("owner", &self.owner)
            .field("state", &self.state())
            .field("pending", &self.pending_frame())
            .finish()
    }
}
