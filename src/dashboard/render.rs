//! Drawing a [`ScreenLayout`] with ratatui

use super::colors::DashboardColors;
use super::layout::{Footer, ScreenLayout, FOOTER_HEIGHT};
use super::panels::{Cell as PanelCell, PanelBody, PanelContent};
use ratatui::{
    backend::TestBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;

/// Size used for text output when the terminal size is unknown
pub const DEFAULT_SIZE: (u16, u16) = (100, 30);

const FIELD_LABEL_WIDTH: usize = 9;

/// Draw the whole screen into `frame`
pub fn draw(frame: &mut Frame, layout: &ScreenLayout) {
    let area = frame.area();
    match layout {
        ScreenLayout::Grid { panels, footer } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Fill(1),
                    Constraint::Length(FOOTER_HEIGHT),
                ])
                .split(area);

            for (row, pair) in rows.iter().take(2).zip(panels.chunks(2)) {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(*row);
                for (col, content) in cols.iter().zip(pair) {
                    render_panel(frame, *col, content);
                }
            }
            render_footer(frame, rows[2], footer);
        }
        ScreenLayout::Focused { panel, footer } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            render_panel(frame, rows[0], panel);
            render_footer(frame, rows[1], footer);
        }
    }
}

fn span(cell: &PanelCell) -> Span<'static> {
    Span::styled(cell.text.clone(), DashboardColors::tone(cell.tone))
}

fn render_panel(frame: &mut Frame, area: Rect, content: &PanelContent) {
    let accent = DashboardColors::accent(content.panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            content.title(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    match &content.body {
        PanelBody::Table { columns, rows } => {
            let header = Row::new(columns.iter().map(|c| c.to_string()))
                .style(Style::default().add_modifier(Modifier::BOLD));
            let body = rows
                .iter()
                .map(|cells| Row::new(cells.iter().map(|c| ratatui::widgets::Cell::from(span(c)))));
            let widths = [
                Constraint::Length(10),
                Constraint::Length(11),
                Constraint::Fill(1),
            ];
            let table = Table::new(body, widths).header(header).block(block);
            frame.render_widget(table, area);
        }
        PanelBody::Fields { fields, extra } => {
            let mut lines: Vec<Line> = fields
                .iter()
                .map(|field| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<width$}", format!("{}:", field.label), width = FIELD_LABEL_WIDTH),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        span(&field.value),
                    ])
                })
                .collect();
            lines.extend(extra.iter().map(|cell| Line::from(span(cell))));
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        PanelBody::Notice(cells) => {
            let lines: Vec<Line> = cells.iter().map(|cell| Line::from(span(cell))).collect();
            frame.render_widget(
                Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
                area,
            );
        }
        PanelBody::Degraded(reason) => {
            let line = Line::from(Span::styled(
                reason.clone(),
                Style::default()
                    .fg(DashboardColors::MUTED)
                    .add_modifier(Modifier::DIM),
            ));
            frame.render_widget(
                Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
                area,
            );
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, footer: &Footer) {
    let mut spans = Vec::new();
    for (key, desc) in footer.keys() {
        spans.push(Span::styled(
            key,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", desc)));
    }
    spans.push(Span::styled(
        footer.note(),
        Style::default().add_modifier(Modifier::DIM),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(DashboardColors::FOOTER))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DashboardColors::FOOTER)),
        );
    frame.render_widget(paragraph, area);
}

/// Render into an off-screen buffer and return its rows as text
pub fn render_to_text(layout: &ScreenLayout, width: u16, height: u16) -> io::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| draw(frame, layout))?;

    let buffer = terminal.backend().buffer();
    let mut out = String::with_capacity((usize::from(width) + 1) * usize::from(height));
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panels::{Field, PanelId, Tone};

    fn sample(panel: PanelId) -> PanelContent {
        let body = match panel {
            PanelId::Ops => PanelBody::Table {
                columns: vec!["Platform", "Status", "Info"],
                rows: vec![vec![
                    PanelCell::label("Git"),
                    PanelCell::new("clean", Tone::Good),
                    PanelCell::muted("main"),
                ]],
            },
            PanelId::Financial => PanelBody::Notice(vec![PanelCell::muted("No transactions yet")]),
            PanelId::Agents => PanelBody::Fields {
                fields: vec![Field::new("Engine", PanelCell::new("missing", Tone::Bad))],
                extra: Vec::new(),
            },
            PanelId::System => PanelBody::Degraded("Unable to check system".to_string()),
        };
        PanelContent { panel, body }
    }

    #[test]
    fn test_grid_text_contains_all_panels() {
        let layout = ScreenLayout::Grid {
            panels: PanelId::ALL.map(sample),
            footer: Footer { viewing: None },
        };
        let text = render_to_text(&layout, DEFAULT_SIZE.0, DEFAULT_SIZE.1).unwrap();

        for panel in PanelId::ALL {
            assert!(text.contains(&panel.title()), "missing {}", panel.title());
        }
        assert!(text.contains("clean"));
        assert!(text.contains("Engine:  missing"));
        assert!(text.contains("Unable to check system"));
        assert!(text.contains("Auto-refresh active"));
        assert_eq!(text.lines().count(), DEFAULT_SIZE.1 as usize);
    }

    #[test]
    fn test_focused_text_shows_one_panel() {
        let layout = ScreenLayout::Focused {
            panel: sample(PanelId::Agents),
            footer: Footer {
                viewing: Some(PanelId::Agents),
            },
        };
        let text = render_to_text(&layout, 80, 20).unwrap();

        assert!(text.contains("[3] Agents"));
        assert!(!text.contains("[1] DevOps"));
        assert!(text.contains("0 Grid view"));
        assert!(text.contains("Viewing: 3"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = ScreenLayout::Grid {
            panels: PanelId::ALL.map(sample),
            footer: Footer { viewing: None },
        };
        render_to_text(&layout, 10, 4).unwrap();
    }
}
