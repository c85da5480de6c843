//! Screen composition: 2x2 grid or a single focused panel
//!
//! A layout is rebuilt from scratch for every frame; providers are called
//! exactly once per panel shown.

use super::panels::{PanelContent, PanelId, Providers};

/// Footer height in rows, border included
pub const FOOTER_HEIGHT: u16 = 3;

/// Key legend shown under the panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    /// Panel currently focused; `None` in the grid
    pub viewing: Option<PanelId>,
}

impl Footer {
    /// `(key, description)` pairs in display order
    pub fn keys(&self) -> Vec<(&'static str, &'static str)> {
        match self.viewing {
            Some(_) => vec![
                ("q", "Quit"),
                ("r", "Refresh"),
                ("0", "Grid view"),
                ("1-4", "Focus panel"),
            ],
            None => vec![("q", "Quit"), ("r", "Refresh"), ("1-4", "Focus panel")],
        }
    }

    /// Trailing status note
    pub fn note(&self) -> String {
        match self.viewing {
            Some(panel) => format!("Viewing: {}", panel.index()),
            None => "Auto-refresh active".to_string(),
        }
    }

    /// Legend as plain text
    pub fn text(&self) -> String {
        let mut parts: Vec<String> = self
            .keys()
            .into_iter()
            .map(|(key, desc)| format!("{} {}", key, desc))
            .collect();
        parts.push(self.note());
        parts.join("  ")
    }
}

/// Everything one frame shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenLayout {
    /// Ops top-left, financial top-right, agents bottom-left, system bottom-right
    Grid {
        panels: [PanelContent; 4],
        footer: Footer,
    },
    Focused {
        panel: PanelContent,
        footer: Footer,
    },
}

impl ScreenLayout {
    pub fn panels(&self) -> Vec<&PanelContent> {
        match self {
            ScreenLayout::Grid { panels, .. } => panels.iter().collect(),
            ScreenLayout::Focused { panel, .. } => vec![panel],
        }
    }

    pub fn footer(&self) -> &Footer {
        match self {
            ScreenLayout::Grid { footer, .. } | ScreenLayout::Focused { footer, .. } => footer,
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, ScreenLayout::Grid { .. })
    }
}

/// Compose the screen for a focus selector
///
/// 1-4 focus one panel; 0 and every other value give the grid.
pub fn build_layout(focused: i32, providers: &Providers) -> ScreenLayout {
    match PanelId::from_selector(focused) {
        Some(panel) => ScreenLayout::Focused {
            panel: providers.collect(panel),
            footer: Footer {
                viewing: Some(panel),
            },
        },
        None => ScreenLayout::Grid {
            panels: PanelId::ALL.map(|panel| providers.collect(panel)),
            footer: Footer { viewing: None },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panels::{PanelBody, PanelProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        panel: PanelId,
        calls: Arc<AtomicUsize>,
    }

    impl PanelProvider for Counting {
        fn panel(&self) -> PanelId {
            self.panel
        }

        fn probe(&self) -> anyhow::Result<PanelBody> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PanelBody::Notice(Vec::new()))
        }
    }

    fn counting() -> (Providers, [Arc<AtomicUsize>; 4]) {
        let calls: [Arc<AtomicUsize>; 4] = Default::default();
        let boxed = |i: usize| -> Box<dyn PanelProvider> {
            Box::new(Counting {
                panel: PanelId::ALL[i],
                calls: calls[i].clone(),
            })
        };
        let providers = Providers::new(boxed(0), boxed(1), boxed(2), boxed(3));
        (providers, calls)
    }

    fn counts(calls: &[Arc<AtomicUsize>; 4]) -> Vec<usize> {
        calls.iter().map(|c| c.load(Ordering::SeqCst)).collect()
    }

    #[test]
    fn test_grid_calls_every_provider_once() {
        let (providers, calls) = counting();
        let layout = build_layout(0, &providers);

        assert!(layout.is_grid());
        let order: Vec<PanelId> = layout.panels().iter().map(|p| p.panel).collect();
        assert_eq!(order, PanelId::ALL.to_vec());
        assert_eq!(counts(&calls), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_focus_calls_only_matching_provider() {
        let (providers, calls) = counting();
        let layout = build_layout(3, &providers);

        assert_eq!(layout.panels().len(), 1);
        assert_eq!(layout.panels()[0].panel, PanelId::Agents);
        assert_eq!(counts(&calls), vec![0, 0, 1, 0]);
    }

    #[test]
    fn test_out_of_range_is_grid() {
        let (providers, _) = counting();
        for selector in [5, -1, 42, i32::MIN, i32::MAX] {
            assert!(build_layout(selector, &providers).is_grid(), "selector {selector}");
        }
    }

    #[test]
    fn test_footer_legends() {
        let grid = Footer { viewing: None };
        assert_eq!(grid.text(), "q Quit  r Refresh  1-4 Focus panel  Auto-refresh active");

        let focused = Footer {
            viewing: Some(PanelId::Financial),
        };
        assert_eq!(
            focused.text(),
            "q Quit  r Refresh  0 Grid view  1-4 Focus panel  Viewing: 2"
        );
    }
}
