//! Alternate-screen session for the live dashboard

use super::layout::ScreenLayout;
use super::render;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::{debug, warn};

/// Destination for rendered frames
pub trait Screen {
    fn show(&mut self, layout: &ScreenLayout) -> io::Result<()>;
}

/// Terminal switched to the alternate screen; restored on drop
pub struct ScreenSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl ScreenSession {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        debug!("Entered alternate screen");

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
                Err(e)
            }
        }
    }
}

impl Screen for ScreenSession {
    fn show(&mut self, layout: &ScreenLayout) -> io::Result<()> {
        self.terminal.draw(|frame| render::draw(frame, layout))?;
        Ok(())
    }
}

impl Drop for ScreenSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        } else {
            debug!("Left alternate screen");
        }
    }
}
