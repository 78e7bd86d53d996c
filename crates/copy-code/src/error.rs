use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyCodeError {
    /// A matched code element whose parent is not a `<pre>`.
    #[error("code block is not directly contained in a <pre> element: {0}")]
    NotInPre(String),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    #[error("dom error: {0}")]
    Dom(String),

    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CopyCodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CopyCodeError>;
