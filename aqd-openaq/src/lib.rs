pub mod date_range;
pub mod error;
pub mod measurement;
pub mod project;
pub mod results;
pub mod source;

#[cfg(feature = "api")]
pub mod client;

pub use error::FetchError;
pub use results::Results;
pub use source::ResourceSource;

/// Default base URL of the OpenAQ API.
pub const DEFAULT_API_URL: &str = "https://api.openaq.org/v2";
