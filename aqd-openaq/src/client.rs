//! Native OpenAQ client built on `reqwest`.

use crate::error::FetchError;
use crate::project::Project;
use crate::results::Results;
use crate::source::ResourceSource;
use log::{debug, warn};
use reqwest::{Client, Url};

/// Loads projects from an OpenAQ-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAqClient {
    client: Client,
    base: Url,
}

impl OpenAqClient {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self::with_client(client, Url::parse(base)?))
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// `<base>/projects/{id}` with the id encoded as a single path segment.
    pub fn project_url(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .push("projects")
            .push(id);
        Ok(url)
    }
}

impl ResourceSource for OpenAqClient {
    type Item = Project;

    async fn fetch_results(&self, id: &str) -> Result<Results<Project>, FetchError> {
        let url = self.project_url(id)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Results::from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::OpenAqClient;
    use crate::error::FetchError;
    use crate::source::ResourceSource;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response` verbatim to the first connection and return the base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/v2", addr)
    }

    #[test]
    fn test_project_url() {
        let client = OpenAqClient::new("https://api.openaq.org/v2").unwrap();
        assert_eq!(
            client.project_url("22").unwrap().as_str(),
            "https://api.openaq.org/v2/projects/22"
        );
        assert_eq!(
            client.project_url("a/b c").unwrap().as_str(),
            "https://api.openaq.org/v2/projects/a%2Fb%20c"
        );
    }

    #[test]
    fn test_project_url_with_trailing_slash() {
        let client = OpenAqClient::new("http://localhost:8080/v2/").unwrap();
        assert_eq!(
            client.project_url("7").unwrap().as_str(),
            "http://localhost:8080/v2/projects/7"
        );
    }

    #[tokio::test]
    async fn test_error_status_is_a_transport_error() {
        let base = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = OpenAqClient::new(&base).unwrap();
        let err = client.fetch_results("22").await.unwrap_err();
        assert_eq!(err, FetchError::Status(500));
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 9\r\nconnection: close\r\n\r\nnot json!",
        )
        .await;
        let client = OpenAqClient::new(&base).unwrap();
        let err = client.fetch_results("22").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_empty_results_decode() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 15\r\nconnection: close\r\n\r\n{\"results\": []}",
        )
        .await;
        let client = OpenAqClient::new(&base).unwrap();
        let results = client.fetch_results("22").await.unwrap();
        assert_eq!(results.into_first(), Err(FetchError::EmptyResult));
    }
}
