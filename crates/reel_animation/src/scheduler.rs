//! Animation scheduler
//!
//! Hosts tick the scheduler once per display refresh. Every frame request
//! that is pending at tick time comes due exactly once and is handed back to
//! the host, which delivers it to the owning widget. Widgets that want to keep
//! animating request again while handling the frame.
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let handle: Arc<dyn FrameScheduler> = Arc::new(scheduler.handle());
//!
//! let task = FrameTask::request(&handle, widget_id).unwrap();
//! for due in scheduler.tick().frames {
//!     // deliver `due.id` to `due.owner`
//! }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use slotmap::{new_key_type, KeyData, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending frame request
    pub struct FrameId;
}

impl FrameId {
    /// Convert to raw u64 for event payloads
    pub fn to_raw(self) -> u64 {
        self.0.as_ffi()
    }

    /// Reconstruct from raw u64
    ///
    /// The raw value must have been created by `to_raw()`.
    pub fn from_raw(raw: u64) -> Self {
        FrameId::from(KeyData::from_ffi(raw))
    }
}

/// Host capability for per-frame callbacks
pub trait FrameScheduler: Send + Sync {
    /// Request a single frame on behalf of `owner`
    ///
    /// Returns `None` when the host has gone away.
    fn request_frame(&self, owner: u64) -> Option<FrameId>;

    /// Withdraw a pending request. Returns `true` if it was still pending.
    fn cancel_frame(&self, id: FrameId) -> bool;
}

/// A frame request that has come due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueFrame {
    pub id: FrameId,
    pub owner: u64,
}

/// Everything delivered by one tick
#[derive(Clone, Debug, Default)]
pub struct FrameBatch {
    /// Seconds since the previous tick
    pub dt: f32,
    pub frames: SmallVec<[DueFrame; 4]>,
}

impl FrameBatch {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    /// Pending requests, keyed by id, valued by owner
    pending: SlotMap<FrameId, u64>,
    last_frame: Instant,
    frame_count: u64,
}

impl SchedulerInner {
    fn drain(&mut self, dt: f32) -> FrameBatch {
        self.frame_count += 1;
        let frames: SmallVec<[DueFrame; 4]> = self
            .pending
            .drain()
            .map(|(id, owner)| DueFrame { id, owner })
            .collect();
        tracing::trace!("tick {}: {} frames due", self.frame_count, frames.len());
        FrameBatch { dt, frames }
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that collects frame requests and releases them each tick
///
/// This is typically held by the host and shared with widgets via
/// [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                pending: SlotMap::with_key(),
                last_frame: Instant::now(),
                frame_count: 0,
            })),
        }
    }

    /// Get a weak handle for widgets
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Release all pending requests, timing the frame with the wall clock
    pub fn tick(&self) -> FrameBatch {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt = (now - inner.last_frame).as_secs_f32();
        inner.last_frame = now;
        inner.drain(dt)
    }

    /// Release all pending requests with a fixed `dt` (headless hosts, tests)
    pub fn tick_with(&self, dt: f32) -> FrameBatch {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        inner.drain(dt)
    }

    /// Check if a request is still waiting for a tick
    pub fn is_pending(&self, id: FrameId) -> bool {
        lock(&self.inner).pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.inner).pending.len()
    }

    /// Check if any widget wants another frame
    pub fn has_pending_frames(&self) -> bool {
        !lock(&self.inner).pending.is_empty()
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        lock(&self.inner).frame_count
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("frame_count", &self.frame_count())
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl FrameScheduler for AnimationScheduler {
    fn request_frame(&self, owner: u64) -> Option<FrameId> {
        Some(lock(&self.inner).pending.insert(owner))
    }

    fn cancel_frame(&self, id: FrameId) -> bool {
        lock(&self.inner).pending.remove(id).is_some()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to widgets that need frames.
/// It won't prevent the scheduler from being dropped.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl FrameScheduler for SchedulerHandle {
    fn request_frame(&self, owner: u64) -> Option<FrameId> {
        let inner = self.inner.upgrade()?;
        let id = lock(&inner).pending.insert(owner);
        Some(id)
    }

    fn cancel_frame(&self, id: FrameId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| lock(&inner).pending.remove(id).is_some())
    }
}

/// An owned frame request
///
/// Dropping a task that has not been delivered cancels it, so at most one
/// request per task can ever be live.
pub struct FrameTask {
    id: FrameId,
    scheduler: Arc<dyn FrameScheduler>,
    armed: bool,
}

impl FrameTask {
    /// Request a frame for `owner`, or `None` if the scheduler is gone
    pub fn request(scheduler: &Arc<dyn FrameScheduler>, owner: u64) -> Option<Self> {
        let id = scheduler.request_frame(owner)?;
        Some(Self {
            id,
            scheduler: Arc::clone(scheduler),
            armed: true,
        })
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Consume a task whose frame has been delivered, without cancelling
    pub fn complete(mut self) -> FrameId {
        self.armed = false;
        self.id
    }
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        if self.armed {
            self.scheduler.cancel_frame(self.id);
        }
    }
}

impl fmt::Debug for FrameTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTask")
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(scheduler: &AnimationScheduler) -> Arc<dyn FrameScheduler> {
        Arc::new(scheduler.handle())
    }

    #[test]
    fn test_tick_delivers_each_request_once() {
        let scheduler = AnimationScheduler::new();
        let a = scheduler.request_frame(1).unwrap();
        let b = scheduler.request_frame(2).unwrap();
        assert_eq!(scheduler.pending_count(), 2);

        let batch = scheduler.tick_with(1.0 / 60.0);
        assert_eq!(batch.frames.len(), 2);
        assert!(batch.frames.contains(&DueFrame { id: a, owner: 1 }));
        assert!(batch.frames.contains(&DueFrame { id: b, owner: 2 }));
        assert!((batch.dt - 1.0 / 60.0).abs() < f32::EPSILON);

        // One-shot: nothing left for the next tick
        assert!(scheduler.tick_with(1.0 / 60.0).is_empty());
        assert_eq!(scheduler.frame_count(), 2);
    }

    #[test]
    fn test_cancelled_request_is_not_delivered() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.request_frame(9).unwrap();
        assert!(scheduler.cancel_frame(id));
        assert!(!scheduler.cancel_frame(id));
        assert!(scheduler.tick_with(0.016).is_empty());
    }

    #[test]
    fn test_task_cancels_on_drop() {
        let scheduler = AnimationScheduler::new();
        let handle = shared(&scheduler);

        let task = FrameTask::request(&handle, 5).unwrap();
        assert!(scheduler.is_pending(task.id()));

        drop(task);
        assert!(!scheduler.has_pending_frames());
    }

    #[test]
    fn test_completed_task_does_not_cancel_new_request() {
        let scheduler = AnimationScheduler::new();
        let handle = shared(&scheduler);

        let task = FrameTask::request(&handle, 5).unwrap();
        let delivered = scheduler.tick_with(0.016);
        assert_eq!(delivered.frames[0].id, task.id());

        let next = FrameTask::request(&handle, 5).unwrap();
        assert_eq!(task.complete(), delivered.frames[0].id);
        assert!(scheduler.is_pending(next.id()));
    }

    #[test]
    fn test_stale_id_cannot_cancel_reused_slot() {
        let scheduler = AnimationScheduler::new();
        let old = scheduler.request_frame(1).unwrap();
        scheduler.tick_with(0.016);

        let fresh = scheduler.request_frame(1).unwrap();
        assert!(!scheduler.cancel_frame(old));
        assert!(scheduler.is_pending(fresh));
    }

    #[test]
    fn test_handle_outlived_by_widget() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };
        assert!(!handle.is_alive());
        assert!(handle.request_frame(1).is_none());

        let handle: Arc<dyn FrameScheduler> = Arc::new(handle);
        assert!(FrameTask::request(&handle, 1).is_none());
    }

    #[test]
    fn test_debug_reports_ticks_and_pending() {
        let scheduler = AnimationScheduler::new();
        scheduler.tick_with(0.016);
        scheduler.request_frame(3).unwrap();

        let debug = format!("{scheduler:?}");
        assert_eq!(debug, "AnimationScheduler { frame_count: 1, pending: 1 }");
    }

    #[test]
    fn test_frame_id_raw_roundtrip() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.request_frame(1).unwrap();
        assert_eq!(FrameId::from_raw(id.to_raw()), id);
    }
}
