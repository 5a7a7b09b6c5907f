//! Browser-side collaborators: the page location and the HTTP transport.
//!
//! Both call into `web-sys` and only work inside a browser window.

use aqd_openaq::date_range::DateRange;
use aqd_openaq::measurement::Measurement;
use aqd_openaq::project::Project;
use aqd_openaq::{FetchError, ResourceSource, Results};
use aqd_state::filter::QueryTarget;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Largest number of measurements requested for the coverage charts.
pub const MEASUREMENT_LIMIT: u32 = 10_000;

/// The window's location; rewrites go through `history.replaceState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl QueryTarget for BrowserLocation {
    fn path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn replace(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = result {
            log::warn!("Failed to replace location with {}: {:?}", url, e);
        }
    }
}

/// Project id from a `/projects/{id}` path.
pub fn project_id_from_path(path: &str) -> Option<String> {
    let mut segments = path.trim_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("projects"), Some(id)) if !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}

/// `fetch`-based client for the OpenAQ API.
#[derive(Debug, Clone)]
pub struct BrowserClient {
    base: String,
}

impl BrowserClient {
    pub fn new(base: &str) -> Self {
        BrowserClient {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn project_url(&self, id: &str) -> String {
        format!("{}/projects/{}", self.base, encode(id))
    }

    pub fn measurements_url(&self, project_id: &str, range: Option<&DateRange>) -> String {
        let mut url = format!(
            "{}/measurements?project={}&limit={}",
            self.base,
            encode(project_id),
            MEASUREMENT_LIMIT
        );
        if let Some(range) = range {
            url.push_str(&format!("&date_from={}&date_to={}", range.start, range.end));
        }
        url
    }

    /// Every measurement of a project, optionally limited to a date range.
    pub async fn fetch_measurements(
        &self,
        project_id: &str,
        range: Option<&DateRange>,
    ) -> Result<Vec<Measurement>, FetchError> {
        let body = get_text(&self.measurements_url(project_id, range)).await?;
        Ok(Results::<Measurement>::from_body(&body)?.results)
    }
}

impl ResourceSource for BrowserClient {
    type Item = Project;

    async fn fetch_results(&self, id: &str) -> Result<Results<Project>, FetchError> {
        let body = get_text(&self.project_url(id)).await?;
        Results::from_body(&body)
    }
}

fn encode(component: &str) -> String {
    js_sys::encode_uri_component(component).into()
}

fn js_error(value: JsValue) -> FetchError {
    FetchError::Transport(format!("{:?}", value))
}

async fn get_text(url: &str) -> Result<String, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::Transport("no browser window".into()))?;
    log::debug!("GET {}", url);
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    if response.status() >= 400 {
        return Err(FetchError::Status(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| FetchError::Decode("response body is not text".into()))
}

#[cfg(test)]
mod tests {
    use super::project_id_from_path;

    #[test]
    fn test_project_id_from_path() {
        assert_eq!(project_id_from_path("/projects/22"), Some("22".to_string()));
        assert_eq!(project_id_from_path("/projects/22/"), Some("22".to_string()));
        assert_eq!(project_id_from_path("projects/abc"), Some("abc".to_string()));
        assert_eq!(project_id_from_path("/projects/"), None);
        assert_eq!(project_id_from_path("/locations/22"), None);
        assert_eq!(project_id_from_path("/"), None);
    }
}
