//! Icon system with Nerd Font glyphs and ASCII fallbacks
//!
//! Detects terminal capabilities once and picks one of three sets:
//! Nerd Font glyphs, colored Unicode, or plain text when output is piped.
//!
//! # Usage
//!
//! ```rust
//! use mekon_core::icons;
//!
//! println!("{} Health check passed", icons::status::success());
//! ```
//!
//! # Environment Variables
//!
//! - `NERD_FONTS=1`: Force Nerd Font mode
//! - `NERD_FONTS_DISABLED=1`: Force ASCII mode
//! - `NO_COLOR`: Drop ANSI colors

use std::sync::OnceLock;

/// Icon set used by command output
#[derive(Debug, Clone)]
pub struct IconSet {
    // Status
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,

    // Data
    pub chart: &'static str,
    pub money: &'static str,

    // System
    pub gear: &'static str,
    pub rocket: &'static str,
}

/// Nerd Font icons (Font Awesome) with ANSI colors
const NERD_ICONS: IconSet = IconSet {
    success: "\x1b[32m\u{f00c}\x1b[0m", // fa-check (green)
    error: "\x1b[31m\u{f00d}\x1b[0m",   // fa-times (red)
    warning: "\x1b[33m\u{f071}\x1b[0m", // fa-exclamation-triangle (yellow)

    chart: "\x1b[34m\u{f080}\x1b[0m", // fa-bar-chart (blue)
    money: "\x1b[32m\u{f155}\x1b[0m", // fa-dollar (green)

    gear: "\x1b[90m\u{f013}\x1b[0m",   // fa-gear (gray)
    rocket: "\x1b[32m\u{f135}\x1b[0m", // fa-rocket (green)
};

/// Colored Unicode fallback, no special fonts needed
const ASCII_ICONS: IconSet = IconSet {
    success: "\x1b[32m✓\x1b[0m",
    error: "\x1b[31m✗\x1b[0m",
    warning: "\x1b[33m!\x1b[0m",

    chart: "\x1b[34m▊\x1b[0m",
    money: "\x1b[32m$\x1b[0m",

    gear: "\x1b[90m⚙\x1b[0m",
    rocket: "\x1b[32m»\x1b[0m",
};

/// Escape-free set for pipes, files and `NO_COLOR`
const PLAIN_ICONS: IconSet = IconSet {
    success: "[ok]",
    error: "[x]",
    warning: "[!]",

    chart: "#",
    money: "$",

    gear: "*",
    rocket: ">>",
};

static ICONS: OnceLock<&'static IconSet> = OnceLock::new();

/// Detect if terminal supports Nerd Fonts
///
/// Conservative default (ASCII) unless enabled or a known terminal.
fn supports_nerd_fonts() -> bool {
    if let Ok(val) = std::env::var("NERD_FONTS") {
        return val == "1" || val.eq_ignore_ascii_case("true");
    }

    if std::env::var("NERD_FONTS_DISABLED").is_ok() {
        return false;
    }

    if let Ok(term_program) = std::env::var("TERM_PROGRAM") {
        let term_lower = term_program.to_lowercase();
        if term_lower.contains("iterm")
            || term_lower.contains("wezterm")
            || term_lower.contains("alacritty")
            || term_lower.contains("kitty")
        {
            return true;
        }
    }

    false
}

fn wants_plain() -> bool {
    std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout)
}

/// Get the active icon set (initialized on first call)
pub fn icons() -> &'static IconSet {
    ICONS.get_or_init(|| {
        if wants_plain() {
            &PLAIN_ICONS
        } else if supports_nerd_fonts() {
            &NERD_ICONS
        } else {
            &ASCII_ICONS
        }
    })
}

/// Status icons (success, error, warning)
pub mod status {
    use super::icons;

    pub fn success() -> &'static str {
        icons().success
    }

    pub fn error() -> &'static str {
        icons().error
    }

    pub fn warning() -> &'static str {
        icons().warning
    }
}

/// Data icons (chart, money)
pub mod data {
    use super::icons;

    pub fn chart() -> &'static str {
        icons().chart
    }

    pub fn money() -> &'static str {
        icons().money
    }
}

/// System icons (gear, rocket)
pub mod system {
    use super::icons;

    pub fn gear() -> &'static str {
        icons().gear
    }

    pub fn rocket() -> &'static str {
        icons().rocket
    }
}
