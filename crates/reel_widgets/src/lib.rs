//! Reel Widget Library
//!
//! Widgets driven by host events and animation frames. The centrepiece is
//! [`ScrollWrapper`], a container that scrolls its content forever by
//! rendering two copies back to back and wrapping the offset at the seam.
//!
//! ```rust
//! use reel_core::{Event, Size};
//! use reel_widgets::prelude::*;
//!
//! let mut ctx = WidgetContext::new();
//! let mut ticker = scroll_wrapper("breaking news")
//!     .direction(Direction::RightToLeft)
//!     .speed(2.0)
//!     .build(&mut ctx);
//!
//! ticker.mount(&StaticLayout::new(Size::new(200.0, 20.0), Size::new(600.0, 20.0)));
//! assert!(ticker.is_running());
//!
//! for mut event in ctx.frame_events(1.0 / 60.0) {
//!     ctx.dispatch(&mut ticker, &mut event);
//! }
//! assert_eq!(ticker.offset().x, 2.0);
//!
//! let mut hover = Event::pointer_enter(ticker.id().to_raw());
//! ctx.dispatch(&mut ticker, &mut hover);
//! assert!(!ticker.is_running());
//! ```

pub mod context;
pub mod error;
pub mod scroll_wrapper;
pub mod widget;

pub use context::{WidgetContext, WidgetRegistration};
pub use error::{ConfigError, ParseDirectionError};
pub use scroll_wrapper::{scroll_wrapper, ScrollWrapper, ScrollWrapperBuilder, ScrollWrapperConfig};
pub use widget::{Widget, WidgetId};

/// Common imports for building and hosting widgets
pub mod prelude {
    pub use crate::context::WidgetContext;
    pub use crate::scroll_wrapper::{
        scroll_wrapper, Axis, Direction, LayoutProbe, ScrollOffset, ScrollWrapper,
        ScrollWrapperConfig, Sense, StaticLayout,
    };
    pub use crate::widget::{Widget, WidgetId};
}
