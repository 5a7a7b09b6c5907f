use crate::error::FetchError;
use crate::results::Results;
use std::future::Future;

/// Anything that can load a `{"results": [...]}` resource by identifier.
///
/// Implemented by the native `reqwest` client and the browser fetch client.
/// Futures are not required to be `Send`; loads are driven from a single
/// event loop.
pub trait ResourceSource {
    type Item;

    fn fetch_results(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Results<Self::Item>, FetchError>>;
}
