//! `tagtree render` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommonArgs, emit, read_input};
use crate::error::CliError;
use crate::output::Output;
use crate::tree;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON node tree to render (`-` for stdin).
    input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, is not a valid node
    /// tree, or building fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (dom, config) = self.common.dom()?;

        let input = read_input(&self.input)?;
        let node = tree::parse_tree(&input)?;
        let element = dom.create_element(node)?;

        emit(&dom, &config, &element, output)
    }
}
