//! CLI error types.

use tagtree::DomError;
use tagtree_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dom(#[from] DomError),

    #[error("invalid node tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid node tree: {0}")]
    Tree(String),
}
