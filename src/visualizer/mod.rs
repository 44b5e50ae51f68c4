mod braille;
mod panel;
mod plot;
mod viewport;

pub use panel::ParameterPanel;
pub use plot::PlotView;

use crate::color::{Element, Theme};
use crate::geometry::SceneGeometry;
use crate::scene::Scene;
use ratatui::prelude::*;

/// Width of the parameter panel in cells.
const PANEL_WIDTH: u16 = 32;

/// Everything the terminal shows: parameter form, plot, status line.
pub struct VisualizerState {
    pub panel: ParameterPanel,
    pub plot: PlotView,
    pub theme: Theme,
    /// Last rejected edit, shown until the next successful one.
    pub message: Option<String>,
}

impl VisualizerState {
    pub fn new(theme: Theme) -> Self {
        Self {
            panel: ParameterPanel::new(),
            plot: PlotView,
            theme,
            message: None,
        }
    }

    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scene: &Scene, geometry: &SceneGeometry) {
        let (panel_area, plot_area) = calculate_layout(area);

        self.panel.render(frame, panel_area, scene, self.theme);
        self.plot
            .render(frame, plot_area, geometry, &scene.ui.toggles, self.theme);
        self.render_status(frame, area, geometry);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, geometry: &SceneGeometry) {
        let (text, element) = match &self.message {
            Some(message) => (format!(" {} ", message), Element::BrokenLink),
            None => (status_line(geometry), Element::Text),
        };
        let (r, g, b) = self.theme.get_color(element);

        let y = area.y + area.height.saturating_sub(1);
        for (i, ch) in text.chars().enumerate() {
            if i < area.width as usize {
                let cell = frame.buffer_mut().cell_mut((area.x + i as u16, y));
                if let Some(cell) = cell {
                    cell.set_char(ch);
                    cell.set_fg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}

fn calculate_layout(area: Rect) -> (Rect, Rect) {
    let body = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PANEL_WIDTH), Constraint::Min(10)])
        .split(body);
    (chunks[0], chunks[1])
}

/// One-line summary of the derived geometry plus the key help.
pub fn status_line(geometry: &SceneGeometry) -> String {
    let links = if geometry.links.is_empty() {
        "no ring".to_string()
    } else {
        format!(
            "links {}/{}{}",
            geometry.linked_count(),
            geometry.links.len(),
            if geometry.ring_closed() { " closed" } else { "" }
        )
    };
    let stable = match geometry.stable_radius {
        Some(r) => format!("stable r {:.0} km", r),
        None => "stable -".to_string(),
    };
    let min_los = match geometry.min_line_of_sight_altitude {
        Some(alt) => format!("min LOS alt {:.0} km", alt),
        None => "min LOS alt -".to_string(),
    };
    format!(
        " {} | {} | {} | [jk] select [hl] adjust [space] toggle [t]heme [e]xport [r]eset [q]uit ",
        links, stable, min_los
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reports_open_default_ring() {
        let line = status_line(&SceneGeometry::derive(&Scene::default()));
        assert!(line.contains("links 0/3"));
        assert!(line.contains("min LOS alt 600 km"));
        assert!(!line.contains("closed"));
    }

    #[test]
    fn layout_reserves_status_row() {
        let (panel, plot) = calculate_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(panel.width, PANEL_WIDTH);
        assert_eq!(plot.height, 39);
    }
}
