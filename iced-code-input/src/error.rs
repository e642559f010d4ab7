use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the configuration edges of the widget.
///
/// The editing heuristics themselves never fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unsupported language: {0:?}")]
    UnsupportedLanguage(String),
    #[error("unknown syntax style: {0:?}")]
    UnknownSyntaxStyle(String),
    #[error("failed to highlight line")]
    Highlight(#[from] syntect::Error),
}
