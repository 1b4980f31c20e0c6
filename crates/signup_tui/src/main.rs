mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod headless;
mod logging;
mod theme;
mod tui;

use clap::Parser;
use color_eyre::Result;
use tracing::info;

use crate::{
    app::App,
    cli::{Cli, Cmd, RunArgs},
    config::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    errors::init()?;
    let cli = Cli::parse();
    let config = Config::new()?;
    let _guard = logging::init(&config.data_dir)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config_dir = %config.config_dir.display(),
        "starting"
    );

    match cli.cmd.unwrap_or_else(|| Cmd::Run(RunArgs::default())) {
        Cmd::Run(args) => {
            let mut app = App::new(config.with_overrides(&args)?)?;
            app.run().await?;
        }
        Cmd::Submit(args) => headless::submit(args, &config).await?,
        Cmd::Regions { json } => headless::print_regions(json)?,
    }
    Ok(())
}
