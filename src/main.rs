use anyhow::Result;
use clap::Parser;

use shape_preview::app::{self, LaunchOptions};
use shape_preview::cli::Cli;
use shape_preview::logging::{init_logging, LoggingConfig};
use shape_preview::shapes::{ShapeDescriptor, ShapeKind};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    if cli.list_shapes {
        let catalog: Vec<ShapeDescriptor> = ShapeKind::ALL.iter().map(|kind| kind.descriptor()).collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let config = cli.load_config()?;
    let options = LaunchOptions {
        shape: cli.shape,
        overrides: cli.overrides.clone(),
        show_panel: !cli.no_ui,
    };

    if cli.headless {
        let report = app::run_headless(config, &options, cli.frames)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    app::run_windowed(config, options)
}
