//! Headless Ticker Demo
//!
//! Runs a news ticker through a simulated host loop:
//! - Loads options from an optional TOML file (first argument)
//! - Ticks the frame scheduler at 60 fps for two seconds
//! - Hovers the ticker halfway through, then scrolls it with the wheel
//!
//! Run with: RUST_LOG=reel_widgets=debug cargo run -p reel_widgets --example ticker [config.toml]

use std::path::PathBuf;

use anyhow::{Context, Result};
use reel_core::{Event, Size};
use reel_widgets::prelude::*;
use tracing_subscriber::EnvFilter;

const FPS: usize = 60;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ScrollWrapperConfig::load(&path)
            .with_context(|| format!("Failed to load ticker config {}", path.display()))?,
        None => ScrollWrapperConfig {
            speed: 1.5,
            direction: Direction::RightToLeft,
            ..Default::default()
        },
    };

    let mut ctx = WidgetContext::new();
    let mut ticker = scroll_wrapper("Markets up +++ Rain expected tonight +++ ")
        .config(config)
        .on_scroll(|offset| tracing::trace!("offset {:?}", offset))
        .build(&mut ctx);

    let layout = StaticLayout::new(Size::new(320.0, 24.0), Size::new(900.0, 24.0));
    ticker.mount(&layout);
    tracing::info!(
        "mounted {} ticker: needs_scroll={} extent={:?}",
        ticker.config().direction,
        ticker.needs_scroll(),
        ticker.content_extent()
    );

    let target = ticker.id().to_raw();
    for frame in 0..FPS * 2 {
        if frame == FPS {
            deliver(&ctx, &mut ticker, Event::pointer_enter(target));
            let wheel = deliver(&ctx, &mut ticker, Event::wheel(target, 120.0, 120.0));
            tracing::info!(
                "hovered and wheeled: running={} page scroll suppressed={}",
                ticker.is_running(),
                wheel.default_prevented
            );
        }
        if frame == FPS + FPS / 2 {
            deliver(&ctx, &mut ticker, Event::pointer_leave(target));
        }

        for mut event in ctx.frame_events(1.0 / FPS as f32) {
            ctx.dispatch(&mut ticker, &mut event);
        }
        if frame % 30 == 0 {
            tracing::info!("frame {:>3}: {:?}", frame, ticker.view().transform.translation_part());
        }
    }

    ticker.unmount();
    tracing::info!("final offset {:?}", ticker.offset());
    Ok(())
}

fn deliver<C>(ctx: &WidgetContext, ticker: &mut ScrollWrapper<C>, mut event: Event) -> Event {
    ctx.dispatch(ticker, &mut event);
    event
}
