//! Load a project through the dashboard's fetch lifecycle.

use aqd_openaq::client::OpenAqClient;
use aqd_openaq::project::Project;
use aqd_state::fetch::{load, FetchCoordinator, FetchState, Phase, SharedCoordinator};
use log::info;
use serde_json::{json, Value};
use std::rc::Rc;

/// Load project `id` from `api_url`, optionally reload it once, and print
/// the final state as JSON.
pub async fn run_project(id: &str, api_url: &str, refetch: bool) -> anyhow::Result<()> {
    let client = OpenAqClient::new(api_url)?;
    let coordinator = fetch_project(&client, id, refetch).await?;
    let summary = summarize(coordinator.borrow().state());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Drive a fresh coordinator through the first load, then a refetch.
pub async fn fetch_project(
    client: &OpenAqClient,
    id: &str,
    refetch: bool,
) -> anyhow::Result<SharedCoordinator<Project>> {
    let coordinator = FetchCoordinator::shared();

    let ticket = coordinator
        .borrow_mut()
        .identify(id)
        .ok_or_else(|| anyhow::anyhow!("project {} was already identified", id))?;
    info!("Loading project {} from {}", id, client.project_url(id)?);
    load(Rc::downgrade(&coordinator), ticket, client).await;

    if refetch {
        let ticket = coordinator.borrow_mut().refetch();
        if let Some(ticket) = ticket {
            info!("Reloading project {}", id);
            load(Rc::downgrade(&coordinator), ticket, client).await;
        }
    }
    Ok(coordinator)
}

/// Lifecycle flags, error and payload of a project load.
pub fn summarize(state: &FetchState<Project>) -> Value {
    let phase = match state.phase() {
        Phase::Idle => "idle",
        Phase::Fetching => "fetching",
        Phase::Success => "success",
        Phase::Failed => "failed",
    };
    json!({
        "phase": phase,
        "fetched": state.fetched,
        "fetching": state.fetching,
        "error": state.error.as_ref().map(|e| json!({ "kind": e.kind(), "message": e.to_string() })),
        "data": state.data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqd_openaq::FetchError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer every connection with a canned `500`, returning the base URL.
    async fn failing_api() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/v2", addr)
    }

    #[test]
    fn test_summarize_idle() {
        let summary = summarize(&FetchState::default());
        assert_eq!(summary["phase"], "idle");
        assert_eq!(summary["fetched"], false);
        assert!(summary["error"].is_null());
        assert!(summary["data"].is_null());
    }

    #[test]
    fn test_summarize_failed() {
        let state = FetchState::<Project> {
            fetched: true,
            fetching: false,
            error: Some(FetchError::EmptyResult),
            data: None,
        };
        let summary = summarize(&state);
        assert_eq!(summary["phase"], "failed");
        assert_eq!(summary["error"]["kind"], "empty_result");
    }

    #[tokio::test]
    async fn test_unreachable_api_ends_failed() {
        // nothing listens on the discard port
        let client = OpenAqClient::new("http://127.0.0.1:9/v2").unwrap();
        let coordinator = fetch_project(&client, "22", true).await.unwrap();
        let state = coordinator.borrow();
        assert_eq!(state.state().phase(), Phase::Failed);
        assert_eq!(state.state().error.as_ref().map(|e| e.kind()), Some("transport"));
        assert_eq!(state.id(), Some("22"));
    }

    #[tokio::test]
    async fn test_error_status_ends_failed() {
        let client = OpenAqClient::new(&failing_api().await).unwrap();
        let coordinator = fetch_project(&client, "22", true).await.unwrap();
        let coordinator = coordinator.borrow();
        let state = coordinator.state();
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.fetched && !state.fetching);
        assert!(state.data.is_none());
        assert_eq!(state.error, Some(FetchError::Status(500)));

        let summary = summarize(state);
        assert_eq!(summary["error"]["kind"], "transport");
    }
}
