//! `tagtree parse` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommonArgs, emit, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Markup file to parse (`-` for stdin).
    input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ParseArgs {
    /// Execute the parse command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the engine rejects
    /// the markup.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (dom, config) = self.common.dom()?;

        let markup = read_input(&self.input)?;
        let element = dom.parse_html(&markup)?;

        emit(&dom, &config, &element, output)
    }
}
