use crate::error::FetchError;
use serde::{Deserialize, Serialize};

/// The `{"results": [...]}` envelope every list endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results<T> {
    pub results: Vec<T>,
}

impl<T> Results<T> {
    /// The first result entry, or [`FetchError::EmptyResult`].
    pub fn into_first(self) -> Result<T, FetchError> {
        self.results.into_iter().next().ok_or(FetchError::EmptyResult)
    }
}

impl<T> Results<T>
where
    T: for<'de> Deserialize<'de>,
{
    /// Decode a response body, mapping shape errors to [`FetchError::Decode`].
    pub fn from_body(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }
}
