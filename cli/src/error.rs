use {
    crate::{display::*, prelude::*},
    thiserror::Error,
};

/// Custom error definitions for the Aptdeck CLI. Takes care of displaying
/// a pretty summary in the console.
#[derive(Debug, Error)]
pub(crate) enum AptdeckCliError {
    #[error("{error}{separator}\n{0}", error = "Syntax Error".red().bold(), separator = separator())]
    Syntax(clap::error::Error),
    #[error("{error}{separator}\n{0}", error = "IO Error".red().bold(), separator = separator())]
    Io(std::io::Error),
    #[error("{error}{separator}\n{0:#}", error = "Error".red().bold(), separator = separator())]
    Any(anyhow::Error),
}

impl AptdeckCliError {
    /// Wrap `error` with the name of the operation that failed, rendered as
    /// `"{operation} failed: {error}"`.
    pub(crate) fn failed(operation: &str, error: impl Into<anyhow::Error>) -> Self {
        Self::Any(error.into().context(format!("{operation} failed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_prefixes_operation() {
        colored::control::set_override(false);

        let error = AptdeckCliError::failed("Lend", anyhow!("insufficient balance"));

        assert!(error
            .to_string()
            .ends_with("Lend failed: insufficient balance"));
    }
}
