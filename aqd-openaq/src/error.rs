use thiserror::Error;

/// Reasons a resource load can end in the error state.
///
/// All variants reach the caller through the same `error` slot of a fetch
/// state; [`FetchError::kind`] keeps them apart in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("bad response status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response contained no results")]
    EmptyResult,
}

impl FetchError {
    /// Short label for the error class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) | FetchError::Status(_) => "transport",
            FetchError::Decode(_) => "decode",
            FetchError::EmptyResult => "empty_result",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        FetchError::Decode(value.to_string())
    }
}
