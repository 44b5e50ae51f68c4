use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

mod color;
mod config;
mod display;
mod geometry;
mod scene;
mod visualizer;

use color::Theme;
use config::Config;
use display::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "relaynet")]
#[command(author, version, about = "Satellite relay network coverage planner")]
pub struct Args {
    /// Display mode: terminal, svg or report
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Body radius in km
    #[arg(long)]
    radius: Option<f64>,

    /// Atmosphere height in km
    #[arg(long, conflicts_with = "no_atmosphere")]
    atmosphere_height: Option<f64>,

    /// Body without atmosphere
    #[arg(long)]
    no_atmosphere: bool,

    /// Number of satellites
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Satellite altitude above the surface in km
    #[arg(short, long)]
    altitude: Option<f64>,

    /// Satellite communication range in km
    #[arg(short = 'r', long)]
    omni_range: Option<f64>,

    /// Set any scene field, e.g. --set ui.toggles.stable=on (repeatable)
    #[arg(long, value_name = "PATH=VALUE")]
    set: Vec<String>,

    /// Colour theme
    #[arg(long)]
    theme: Option<Theme>,

    /// SVG output file (svg mode and the export key)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SVG image size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Write a commented config template to the default path and exit
    #[arg(long)]
    init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "relaynet", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args)?;

    // The interactive editor owns the screen; keep routine lines out of it
    let level = match config.display.mode {
        DisplayMode::Terminal => "relaynet=warn",
        DisplayMode::Svg | DisplayMode::Report => "relaynet=info",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?),
        )
        .init();

    info!("Starting relaynet in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(config)?,
        DisplayMode::Svg => display::svg::run(config)?,
        DisplayMode::Report => display::report::run(config)?,
    }

    Ok(())
}
