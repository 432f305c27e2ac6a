//! Infinite auto-scrolling container
//!
//! `ScrollWrapper` scrolls its content forever along one axis. The content is
//! rendered twice back to back and the scroll offset snaps back by one
//! content length at the seam, so the loop is invisible.
//!
//! The widget is host driven:
//! - `mount` measures the content through a [`LayoutProbe`] and starts the
//!   animation driver if the content overflows
//! - every `ANIMATION_FRAME` event advances the offset by `speed` and asks
//!   for the next frame
//! - wheel events move the offset by the wheel delta and never reach the host
//! - pointer enter/leave pause and resume auto-scrolling
//!
//! ```rust
//! use reel_core::Size;
//! use reel_widgets::prelude::*;
//!
//! let mut ctx = WidgetContext::new();
//! let mut wrapper = ScrollWrapper::new(&mut ctx, "item list");
//! wrapper.mount(&StaticLayout::new(Size::new(100.0, 100.0), Size::new(100.0, 300.0)));
//!
//! assert_eq!(wrapper.axis(), Axis::Vertical);
//! assert!(wrapper.needs_scroll());
//! assert_eq!(wrapper.view().copies.len(), 2);
//! ```

pub mod config;
pub mod direction;
pub mod driver;
pub mod geometry;
pub mod hover;
pub mod state;
pub mod view;
pub mod wheel;
pub mod wraparound;

use std::fmt;
use std::sync::{Mutex, Weak};

use reel_animation::FrameId;
use reel_core::events::event_types;
use reel_core::{
    Affine2D, Event, EventData, EventDispatcher, EventType, ListenerOptions, Size, Subscription,
};
use smallvec::SmallVec;

use crate::context::{WidgetContext, WidgetRegistration};
use crate::widget::{Widget, WidgetId};

pub use config::{Presentation, ScrollWrapperConfig};
pub use direction::{sense_from_delta, sense_from_speed, Axis, Direction, Sense};
pub use driver::{AnimationDriver, DriverState};
pub use geometry::{measure, LayoutProbe, Measurement, StaticLayout};
pub use hover::HoverPause;
pub use state::{ScrollOffset, ScrollState};
pub use view::{ContentLayout, ScrollWrapperView};

/// Called with the corrected offset after every frame or wheel update
pub type ScrollCallback = Box<dyn FnMut(ScrollOffset) + Send>;

/// Event types a mounted wrapper listens for
const LISTENED: [EventType; 4] = [
    event_types::SCROLL,
    event_types::POINTER_ENTER,
    event_types::POINTER_LEAVE,
    event_types::ANIMATION_FRAME,
];

/// An infinitely scrolling container around content `C`
pub struct ScrollWrapper<C> {
    registration: WidgetRegistration,
    content: C,
    config: ScrollWrapperConfig,
    state: ScrollState,
    driver: AnimationDriver,
    dispatcher: Weak<Mutex<EventDispatcher>>,
    subscriptions: SmallVec<[Subscription; 4]>,
    on_scroll: Option<ScrollCallback>,
    mounted: bool,
}

impl<C> ScrollWrapper<C> {
    /// Create an unmounted wrapper with default options
    pub fn new(ctx: &mut WidgetContext, content: C) -> Self {
        Self::with_config(ctx, content, ScrollWrapperConfig::default())
    }

    pub fn with_config(ctx: &mut WidgetContext, content: C, mut config: ScrollWrapperConfig) -> Self {
        if config.validate().is_err() {
            tracing::warn!("non-finite scroll speed {}, using 1.0", config.speed);
            config.speed = 1.0;
        }

        let registration = ctx.register_widget("scroll_wrapper");
        let id = registration.id();
        Self {
            registration,
            content,
            config,
            state: ScrollState::default(),
            driver: AnimationDriver::new(id.to_raw(), ctx.frame_scheduler()),
            dispatcher: ctx.dispatcher(),
            subscriptions: SmallVec::new(),
            on_scroll: None,
            mounted: false,
        }
    }

    /// Set the scroll callback
    pub fn on_scroll<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ScrollOffset) + Send + 'static,
    {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> WidgetId {
        self.registration.id()
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn config(&self) -> &ScrollWrapperConfig {
        &self.config
    }

    pub fn axis(&self) -> Axis {
        self.config.direction.axis()
    }

    pub fn offset(&self) -> ScrollOffset {
        self.state.offset()
    }

    pub fn needs_scroll(&self) -> bool {
        self.state.needs_scroll()
    }

    pub fn content_extent(&self) -> Size {
        self.state.content_extent()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// Scroller transform for the current offset
    pub fn transform(&self) -> Affine2D {
        self.state.transform()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Attach to the host: listen for input, measure, and start scrolling
    pub fn mount(&mut self, probe: &dyn LayoutProbe) {
        self.subscribe();
        self.mounted = true;
        self.refresh(probe);
    }

    /// Detach from the host: stop scrolling and drop every listener
    pub fn unmount(&mut self) {
        self.driver.stop();
        self.subscriptions.clear();
        self.mounted = false;
        tracing::debug!("scroll wrapper {:?} unmounted", self.id());
    }

    /// Replace the content and start over from the origin
    pub fn set_content(&mut self, content: C, probe: &dyn LayoutProbe) {
        self.content = content;
        self.remeasure(probe);
    }

    /// Change the per-frame step and start over from the origin
    pub fn set_speed(&mut self, speed: f32, probe: &dyn LayoutProbe) {
        if !speed.is_finite() {
            tracing::warn!("ignoring non-finite scroll speed {}", speed);
            return;
        }
        self.config.speed = speed;
        self.remeasure(probe);
    }

    /// Change direction; a new axis means new geometry
    pub fn set_direction(&mut self, direction: Direction, probe: &dyn LayoutProbe) {
        self.config.direction = direction;
        if self.mounted {
            self.subscribe();
        }
        self.remeasure(probe);
    }

    /// Re-run the geometry probe, resetting the offset
    pub fn remeasure(&mut self, probe: &dyn LayoutProbe) {
        if self.mounted {
            self.refresh(probe);
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if self.mounted {
            self.subscribe();
        }
    }

    pub fn set_pause_on_hover(&mut self, pause_on_hover: bool) {
        self.config.pause_on_hover = pause_on_hover;
        if self.mounted {
            self.subscribe();
        }
    }

    /// Turn auto-scrolling on or off without touching the offset
    pub fn set_auto_scroll(&mut self, auto_scroll: bool) {
        self.config.auto_scroll = auto_scroll;
        if !auto_scroll {
            self.driver.stop();
        } else if self.mounted {
            self.driver.start(self.state.needs_scroll(), true);
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> ScrollWrapperView<'_, C> {
        let mut copies = SmallVec::new();
        copies.push(&self.content);
        if self.state.needs_scroll() {
            copies.push(&self.content);
        }

        ScrollWrapperView {
            class_name: self.config.presentation.class_name.as_deref(),
            style: &self.config.presentation.style,
            layout: ContentLayout::from(self.axis()),
            transform: self.state.transform(),
            copies,
        }
    }

    fn hover(&self) -> HoverPause {
        HoverPause {
            pause_on_hover: self.config.pause_on_hover,
            auto_scroll: self.config.auto_scroll,
        }
    }

    /// Replace all listeners; old subscriptions are dropped first
    fn subscribe(&mut self) {
        self.subscriptions.clear();

        let target = self.id().to_raw();
        for event_type in LISTENED {
            let options = if event_type == event_types::SCROLL {
                // Wheel handler cancels the host's page scroll
                ListenerOptions::active()
            } else {
                ListenerOptions::default()
            };
            if let Some(sub) = Subscription::subscribe(&self.dispatcher, target, event_type, options) {
                self.subscriptions.push(sub);
            }
        }

        tracing::debug!(
            "scroll wrapper {:?} listening for {} event types",
            self.id(),
            self.subscriptions.len()
        );
    }

    /// Stop, measure from scratch at the origin, and restart
    fn refresh(&mut self, probe: &dyn LayoutProbe) {
        self.driver.stop();
        self.state = ScrollState::new(geometry::measure(probe, self.axis()));
        self.driver
            .start(self.state.needs_scroll(), self.config.auto_scroll);
    }

    fn on_frame(&mut self, frame: FrameId) {
        if !self.driver.accept_frame(frame) {
            return;
        }

        let step = self.config.speed * self.config.direction.sense().signum();
        let offset = self
            .state
            .advance(self.axis(), step, sense_from_speed(step));
        tracing::trace!("frame {:?} step={} -> {:?}", frame, step, offset);

        self.notify(offset);
        self.driver.reschedule();
    }

    fn notify(&mut self, offset: ScrollOffset) {
        if let Some(callback) = self.on_scroll.as_mut() {
            callback(offset);
        }
    }
}

impl<C> Widget for ScrollWrapper<C> {
    fn id(&self) -> WidgetId {
        self.registration.id()
    }

    fn handle_event(&mut self, event: &mut Event) {
        match event.event_type {
            event_types::POINTER_ENTER => {
                self.hover().on_pointer_enter(&mut self.driver);
            }
            event_types::POINTER_LEAVE => {
                let needs_scroll = self.state.needs_scroll();
                self.hover().on_pointer_leave(&mut self.driver, needs_scroll);
            }
            event_types::SCROLL => {
                let axis = self.axis();
                if let Some(offset) =
                    wheel::handle_wheel(event, self.config.disabled, axis, &mut self.state)
                {
                    self.notify(offset);
                }
            }
            event_types::ANIMATION_FRAME => {
                if let EventData::Frame { frame, .. } = event.data {
                    self.on_frame(FrameId::from_raw(frame));
                }
            }
            _ => {}
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for ScrollWrapper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollWrapper")
            .field("id", &self.id())
            .field("content", &self.content)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("subscriptions", &self.subscriptions.len())
            .field("mounted", &self.mounted)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Create a scroll wrapper builder
///
/// ```rust
/// use reel_widgets::prelude::*;
///
/// let mut ctx = WidgetContext::new();
/// let wrapper = scroll_wrapper(vec!["a", "b", "c"])
///     .speed(0.5)
///     .direction(Direction::TopToBottom)
///     .class_name("feed")
///     .build(&mut ctx);
/// assert_eq!(wrapper.config().speed, 0.5);
/// ```
pub fn scroll_wrapper<C>(content: C) -> ScrollWrapperBuilder<C> {
    ScrollWrapperBuilder {
        content,
        config: ScrollWrapperConfig::default(),
        on_scroll: None,
    }
}

/// Builder for [`ScrollWrapper`]
pub struct ScrollWrapperBuilder<C> {
    content: C,
    config: ScrollWrapperConfig,
    on_scroll: Option<ScrollCallback>,
}

impl<C> ScrollWrapperBuilder<C> {
    pub fn speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn auto_scroll(mut self, auto_scroll: bool) -> Self {
        self.config.auto_scroll = auto_scroll;
        self
    }

    pub fn pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.config.pause_on_hover = pause_on_hover;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.config.presentation.class_name = Some(class_name.into());
        self
    }

    /// Add one inline style property
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .presentation
            .style
            .insert(property.into(), value.into());
        self
    }

    pub fn on_scroll<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ScrollOffset) + Send + 'static,
    {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    /// Replace every option at once (the callback is kept)
    pub fn config(mut self, config: ScrollWrapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the widget with `ctx`
    pub fn build(self, ctx: &mut WidgetContext) -> ScrollWrapper<C> {
        let mut wrapper = ScrollWrapper::with_config(ctx, self.content, self.config);
        wrapper.on_scroll = self.on_scroll;
        wrapper
    }
}
