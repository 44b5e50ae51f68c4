use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::color::{Element, Theme};
use crate::scene::{Scene, ScenePath};

/// The editable parameter list, grouped by section, with one row selected.
pub struct ParameterPanel {
    selected: usize,
}

impl ParameterPanel {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Paths shown for `scene`; atmosphere height disappears with the atmosphere.
    pub fn rows(scene: &Scene) -> Vec<ScenePath> {
        ScenePath::ALL
            .into_iter()
            .filter(|path| path.is_available(scene))
            .collect()
    }

    pub fn selected(&self, scene: &Scene) -> Option<ScenePath> {
        let rows = Self::rows(scene);
        rows.get(self.selected.min(rows.len().saturating_sub(1))).copied()
    }

    pub fn next(&mut self, scene: &Scene) {
        let len = Self::rows(scene).len();
        if len > 0 {
            self.selected = (self.selected.min(len - 1) + 1) % len;
        }
    }

    pub fn prev(&mut self, scene: &Scene) {
        let len = Self::rows(scene).len();
        if len > 0 {
            self.selected = (self.selected.min(len - 1) + len - 1) % len;
        }
    }

    /// Keep the cursor on the same path after the row set changes.
    pub fn follow(&mut self, scene: &Scene, path: ScenePath) {
        if let Some(index) = Self::rows(scene).iter().position(|p| *p == path) {
            self.selected = index;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scene: &Scene, theme: Theme) {
        let (r, g, b) = theme.get_color(Element::Text);
        let text = Color::Rgb(r, g, b);
        let current = self.selected(scene);

        let mut lines = Vec::new();
        let mut section = "";
        for path in Self::rows(scene) {
            if path.section() != section {
                section = path.section();
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                lines.push(Line::styled(
                    section.to_uppercase(),
                    Style::default().fg(text).add_modifier(Modifier::BOLD),
                ));
            }
            let value = path.get(scene).map(|v| v.to_string()).unwrap_or_default();
            let style = if Some(path) == current {
                Style::default().fg(text).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(text)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>15} ", path.label()), style),
                Span::styled(format!("{:<10}", value), style),
            ]));
        }

        let title = format!(" {} ", scene.display_name());
        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(text)),
        );
        frame.render_widget(panel, area);
    }
}
