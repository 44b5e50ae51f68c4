pub mod report;
pub mod svg;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Interactive editor with a live plot
    #[default]
    Terminal,
    /// Write the plot as an SVG image
    Svg,
    /// Print the derived geometry as text
    Report,
}
