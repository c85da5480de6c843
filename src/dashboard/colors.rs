//! Consistent color palette for the dashboard
//!
//! Panels never pick colors directly; they tag cells with a [`Tone`] and the
//! renderer maps tones and panel ids through this palette.

use super::panels::{PanelId, Tone};
use ratatui::style::{Color, Modifier, Style};

/// Color palette for dashboard elements
pub struct DashboardColors;

impl DashboardColors {
    // === Status Colors ===

    /// Healthy, installed, configured (Green)
    pub const SUCCESS: Color = Color::Green;

    /// Dirty, erroring, unconfigured (Yellow)
    pub const WARNING: Color = Color::Yellow;

    /// Missing required component (Red)
    pub const ERROR: Color = Color::Red;

    /// Row labels (Cyan)
    pub const LABEL: Color = Color::Cyan;

    /// Unavailable or secondary text (DarkGray)
    pub const MUTED: Color = Color::DarkGray;

    /// Primary text (White)
    pub const TEXT: Color = Color::White;

    // === Panel Accents ===

    pub const OPS: Color = Color::Blue;
    pub const FINANCIAL: Color = Color::Green;
    pub const AGENTS: Color = Color::Magenta;
    pub const SYSTEM: Color = Color::Cyan;

    /// Footer border and legend (DarkGray)
    pub const FOOTER: Color = Color::DarkGray;

    /// Border and title color of a panel
    pub fn accent(panel: PanelId) -> Color {
        match panel {
            PanelId::Ops => Self::OPS,
            PanelId::Financial => Self::FINANCIAL,
            PanelId::Agents => Self::AGENTS,
            PanelId::System => Self::SYSTEM,
        }
    }

    /// Text style for a tagged cell
    pub fn tone(tone: Tone) -> Style {
        match tone {
            Tone::Plain => Style::default().fg(Self::TEXT),
            Tone::Label => Style::default().fg(Self::LABEL),
            Tone::Good => Style::default().fg(Self::SUCCESS),
            Tone::Warn => Style::default().fg(Self::WARNING),
            Tone::Bad => Style::default().fg(Self::ERROR),
            Tone::Muted => Style::default()
                .fg(Self::MUTED)
                .add_modifier(Modifier::DIM),
        }
    }
}
