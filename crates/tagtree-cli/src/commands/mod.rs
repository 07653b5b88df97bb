//! CLI command implementations.

pub(crate) mod parse;
pub(crate) mod render;

pub(crate) use parse::ParseArgs;
pub(crate) use render::RenderArgs;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use tagtree::{Dom, DomError, Element};
use tagtree_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// DOM engine to use (overrides config).
    #[arg(short, long, env = "TAGTREE_ENGINE")]
    engine: Option<String>,

    /// Render with indentation.
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (default: auto-discover tagtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with the flags applied on top.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            engine: self.engine.clone(),
            debug: self.debug.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Build the DOM selected by configuration.
    fn dom(&self) -> Result<(Dom, Config), CliError> {
        let config = self.load_config()?;
        let dom = Dom::with_engine(config.engine.name.as_str()).map_err(DomError::from)?;
        tracing::debug!(
            engine = dom.engine().name(),
            config = ?config.config_path,
            "Loaded configuration"
        );
        Ok((dom, config))
    }
}

/// Read input from a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Render `element` in the configured style and print it.
fn emit(dom: &Dom, config: &Config, element: &Element, output: &Output) -> Result<(), CliError> {
    let markup = if config.output.debug {
        dom.render_debug(element)?
    } else {
        dom.render(element)?
    };
    output.markup(&markup)?;
    Ok(())
}
