// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::PreviewConfig;
use crate::shapes::ShapeKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "shape-preview")]
#[command(about = "Live preview of parametric 3D primitives", long_about = None)]
pub struct Cli {
    /// Shape to open first
    #[arg(value_enum, default_value_t = ShapeKind::Cylinder)]
    pub shape: ShapeKind,

    /// JSON file with window, camera and spin settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the parameter panel and the FPS readout
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Render off-screen and print a JSON report instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Override a parameter of the first shape, e.g. `--set radialSegments=3`
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Print every shape's parameter schema as JSON and exit
    #[arg(long)]
    pub list_shapes: bool,

    /// Log filter, e.g. `debug` (defaults to RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Config file if given, defaults otherwise
    pub fn load_config(&self) -> Result<PreviewConfig> {
        let mut config = match &self.config {
            Some(path) => PreviewConfig::load(path)?,
            None => PreviewConfig::default(),
        };
        if self.no_ui {
            config.show_fps = false;
        }
        Ok(config)
    }
}

fn parse_override(text: &str) -> Result<(String, String), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{text}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in `{text}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
