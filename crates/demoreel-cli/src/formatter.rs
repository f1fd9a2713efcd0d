//! Output format selection.

/// How command output is printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Pretty,
    /// Machine-readable JSON.
    Json,
}
