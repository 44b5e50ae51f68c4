use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::display::svg;
use crate::geometry::SceneGeometry;
use crate::scene::{Scene, ScenePath, SceneValue};
use crate::visualizer::VisualizerState;

/// How long to wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

const DEFAULT_EXPORT: &str = "relaynet.svg";

pub fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Quit,
    SelectNext,
    SelectPrev,
    Adjust { forward: bool },
    Toggle,
    NextTheme,
    Export,
    Reset,
}

fn action_for(key: KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Quit),
        KeyEvent { code, .. } => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => {
                Some(Action::Adjust { forward: true })
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                Some(Action::Adjust { forward: false })
            }
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
            KeyCode::Char('t') => Some(Action::NextTheme),
            KeyCode::Char('e') => Some(Action::Export),
            KeyCode::Char('r') => Some(Action::Reset),
            _ => None,
        },
    }
}

/// Interactive session state: the current snapshot plus what produced it.
struct Session {
    scene: Scene,
    geometry: SceneGeometry,
    initial: Scene,
    visualizer: VisualizerState,
    export_path: PathBuf,
    svg_size: u32,
}

impl Session {
    fn new(config: Config) -> Self {
        let geometry = SceneGeometry::derive(&config.scene);
        Self {
            initial: config.scene.clone(),
            scene: config.scene,
            geometry,
            visualizer: VisualizerState::new(config.display.theme),
            export_path: config
                .svg
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT)),
            svg_size: config.svg.size,
        }
    }

    /// Replace the snapshot if `value` is accepted at `path`; otherwise keep
    /// the old one and surface the error.
    fn update(&mut self, path: ScenePath, value: SceneValue) {
        match self.scene.with(path, value) {
            Ok(scene) => {
                debug!("{} = {}", path, value);
                self.replace(scene);
                self.visualizer.panel.follow(&self.scene, path);
            }
            Err(e) => {
                debug!("rejected update: {}", e);
                self.visualizer.message = Some(e.to_string());
            }
        }
    }

    fn replace(&mut self, scene: Scene) {
        self.geometry = SceneGeometry::derive(&scene);
        self.scene = scene;
        self.visualizer.message = None;
    }

    /// Apply `action`; returns false when the session should end.
    fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::SelectNext => self.visualizer.panel.next(&self.scene),
            Action::SelectPrev => self.visualizer.panel.prev(&self.scene),
            Action::Adjust { forward } => self.nudge(forward, false),
            Action::Toggle => self.nudge(true, true),
            Action::NextTheme => self.visualizer.next_theme(),
            Action::Export => {
                let result = svg::export(
                    &self.scene,
                    self.visualizer.theme,
                    self.svg_size,
                    &self.export_path,
                );
                self.visualizer.message = Some(match result {
                    Ok(()) => format!("exported {}", self.export_path.display()),
                    Err(e) => format!("{:#}", e),
                });
            }
            Action::Reset => self.replace(self.initial.clone()),
        }
        true
    }

    fn nudge(&mut self, forward: bool, flags_only: bool) {
        let Some(path) = self.visualizer.panel.selected(&self.scene) else {
            return;
        };
        let Some(value) = path.step(&self.scene, forward) else {
            return;
        };
        if flags_only && !matches!(value, SceneValue::Flag(_)) {
            return;
        }
        self.update(path, value);
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let mut session = Session::new(config);
    info!("Editing {}", session.scene.display_name());

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            // Clear with transparent/reset background for terminal transparency support
            let block = ratatui::widgets::Block::default()
                .style(Style::default().bg(Color::Reset));
            frame.render_widget(block, area);

            session
                .visualizer
                .render(frame, area, &session.scene, &session.geometry);
        })?;

        // Handle input
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = action_for(key) {
                    if !session.handle(action) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
