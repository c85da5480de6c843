//! Live terminal dashboard
//!
//! Two units run for an interactive session:
//! - the key listener, a background thread that is the only writer of the
//!   shared [`ViewState`] and owns raw mode
//! - the render loop, a tokio task that owns the alternate screen, redraws on
//!   a timer and wakes early whenever the listener changes the view
//!
//! `--no-interactive` skips both and renders the grid once as text.

pub mod colors;
pub mod input;
pub mod layout;
pub mod panels;
pub mod render;
pub mod state;
pub mod terminal;

pub use layout::{build_layout, Footer, ScreenLayout};
pub use panels::{PanelBody, PanelContent, PanelId, PanelProvider, Providers};
pub use state::{KeyAction, SharedView, ViewState};

use crate::error::{MekonError, Result};
use std::sync::Arc;
use std::time::Duration;
use terminal::{Screen, ScreenSession};
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

/// Default auto-refresh interval
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

/// Wait used when the refresh interval does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashOptions {
    pub refresh: Duration,
    /// `false` renders once and returns without touching the terminal mode
    pub interactive: bool,
}

impl Default for DashOptions {
    fn default() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
            interactive: true,
        }
    }
}

/// Render the grid once as plain text, sized to the terminal when there is one
pub fn render_once(providers: &Providers) -> Result<String> {
    let (width, height) = if atty::is(atty::Stream::Stdout) {
        crossterm::terminal::size().unwrap_or(render::DEFAULT_SIZE)
    } else {
        render::DEFAULT_SIZE
    };
    let layout = build_layout(0, providers);
    Ok(render::render_to_text(&layout, width, height)?)
}

/// Run the dashboard until the user quits
pub async fn run(options: DashOptions, providers: Arc<Providers>) -> Result<()> {
    if !options.interactive {
        let text = tokio::task::spawn_blocking(move || render_once(&providers))
            .await
            .map_err(|e| MekonError::Other(format!("dashboard render task failed: {}", e)))??;
        print!("{}", text);
        return Ok(());
    }

    info!("Starting dashboard (refresh every {:?})", options.refresh);
    let view = SharedView::new();
    let listener = input::spawn_listener(view.clone(), input::TerminalKeys::open)?;

    let outcome = match ScreenSession::enter() {
        Ok(mut screen) => render_loop(&view, providers, options.refresh, &mut screen).await,
        Err(e) => Err(e.into()),
    };

    view.stop();
    if !listener.join_timeout(input::LISTENER_JOIN) {
        warn!("Key listener did not stop in time");
    }
    println!("Dashboard closed.");
    outcome
}

/// Draw frames until the view stops running
///
/// Each wait ends at the refresh deadline, on any view change, or on Ctrl+C.
pub async fn render_loop<S: Screen>(
    view: &SharedView,
    providers: Arc<Providers>,
    refresh: Duration,
    screen: &mut S,
) -> Result<()> {
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut interrupt_armed = true;
    let mut frames: u64 = 0;

    loop {
        let frame = view.take_frame();
        if !frame.running {
            break;
        }

        let source = Arc::clone(&providers);
        let layout = tokio::task::spawn_blocking(move || {
            build_layout(i32::from(frame.focused_panel), &source)
        })
        .await
        .map_err(|e| MekonError::Other(format!("dashboard render task failed: {}", e)))?;

        screen.show(&layout)?;
        frames += 1;
        trace!("Frame {} drawn (focused panel {})", frames, frame.focused_panel);

        let now = Instant::now();
        let deadline = now
            .checked_add(refresh)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => {}
            _ = view.changed() => {}
            signal = &mut interrupt, if interrupt_armed => {
                interrupt_armed = false;
                match signal {
                    Ok(()) => {
                        debug!("Interrupt received, closing dashboard");
                        view.stop();
                    }
                    Err(e) => warn!("Cannot listen for Ctrl+C: {}", e),
                }
            }
        }
    }

    debug!("Render loop stopped after {} frames", frames);
    Ok(())
}
