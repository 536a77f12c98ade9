//! Test utilities shared by the art explorer integration tests

use kodegen_tools_artexplorer::{
    CancellationHandle, CollectionSource, ExplorerConfig, ExplorerError, ExplorerResult,
    ExplorerSnapshot, ObjectId, ObjectRecord, PendingDetail, SearchQuery,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

#[allow(dead_code)]
pub const SEARCH_PATH: &str = "/public/collection/v1/search";

/// Starts a mock collection API
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Config pointing at the mock server
#[allow(dead_code)]
pub fn config_for(server: &Server) -> ExplorerConfig {
    ExplorerConfig::builder()
        .origin(server.url())
        .request_timeout_secs(Some(5))
        .build()
        .unwrap()
}

/// Object detail body as the API returns it
#[allow(dead_code)]
pub fn object_json(id: u64, title: &str, year: i32, with_image: bool) -> Value {
    let image = if with_image {
        format!("https://images.metmuseum.org/CRDImages/ep/web-large/{id}.jpg")
    } else {
        String::new()
    };
    json!({
        "objectID": id,
        "isHighlight": true,
        "primaryImageSmall": image,
        "additionalImages": [],
        "title": title,
        "artistDisplayName": "Vincent van Gogh",
        "objectEndDate": year,
        "objectURL": format!("https://www.metmuseum.org/art/collection/search/{id}"),
        "department": "European Paintings"
    })
}

#[allow(dead_code)]
pub fn record(id: u64, title: &str, year: i32) -> ObjectRecord {
    serde_json::from_value(object_json(id, title, year, true)).unwrap()
}

#[allow(dead_code)]
pub fn imageless_record(id: u64, title: &str, year: i32) -> ObjectRecord {
    serde_json::from_value(object_json(id, title, year, false)).unwrap()
}

/// Search mock for `q`, answering with `ids`
#[allow(dead_code)]
pub async fn mock_search(server: &mut Server, q: &str, ids: &[u64]) -> Mock {
    server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("q".into(), q.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "total": ids.len(), "objectIDs": ids }).to_string())
        .create_async()
        .await
}

/// Detail mock for one object
#[allow(dead_code)]
pub async fn mock_object(server: &mut Server, id: u64, body: &Value) -> Mock {
    server
        .mock("GET", format!("/public/collection/v1/objects/{id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Mock that answers `path` with an error status
#[allow(dead_code)]
pub async fn mock_status(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Waits until a published snapshot satisfies `check`
#[allow(dead_code)]
pub async fn wait_for_snapshot<F>(
    updates: &mut watch::Receiver<ExplorerSnapshot>,
    mut check: F,
) -> ExplorerSnapshot
where
    F: FnMut(&ExplorerSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(|s| check(s)))
        .await
        .expect("timed out waiting for snapshot")
        .expect("orchestrator dropped")
        .clone()
}

#[allow(dead_code)]
pub type DetailGate = oneshot::Sender<ExplorerResult<ObjectRecord>>;

#[allow(dead_code)]
struct Hold {
    release: oneshot::Receiver<()>,
    honours_cancel: bool,
}

/// In-memory `CollectionSource` driven step by step from the test
///
/// Each scripted query returns its ids immediately; every detail fetch waits
/// until the test resolves its gate.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedSource {
    details: Mutex<HashMap<String, Vec<(ObjectId, oneshot::Receiver<ExplorerResult<ObjectRecord>>)>>>,
    failures: Mutex<HashMap<String, ExplorerError>>,
    holds: Mutex<HashMap<String, Hold>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `text` to return `ids`; returns one gate per id, in order
    pub fn script(&self, text: &str, ids: &[u64]) -> Vec<DetailGate> {
        let (gates, pending): (Vec<_>, Vec<_>) = ids
            .iter()
            .map(|&id| {
                let (tx, rx) = oneshot::channel();
                (tx, (ObjectId(id), rx))
            })
            .unzip();
        self.details.lock().insert(text.to_string(), pending);
        gates
    }

    /// Make the search step for `text` fail with `error`
    pub fn fail_search(&self, text: &str, error: ExplorerError) {
        self.failures.lock().insert(text.to_string(), error);
    }

    /// Hold the search step for `text` until released or cancelled
    pub fn hold_search(&self, text: &str) -> oneshot::Sender<()> {
        self.hold(text, true)
    }

    /// Hold the search step for `text` until released, ignoring cancellation
    pub fn stall_search(&self, text: &str) -> oneshot::Sender<()> {
        self.hold(text, false)
    }

    fn hold(&self, text: &str, honours_cancel: bool) -> oneshot::Sender<()> {
        let (tx, release) = oneshot::channel();
        self.holds.lock().insert(
            text.to_string(),
            Hold {
                release,
                honours_cancel,
            },
        );
        tx
    }
}

impl CollectionSource for ScriptedSource {
    async fn explore(
        &self,
        query: &SearchQuery,
        cancel: &CancellationHandle,
    ) -> ExplorerResult<Vec<PendingDetail>> {
        let hold = self.holds.lock().remove(query.text());
        match hold {
            Some(hold) if hold.honours_cancel => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        return Err(ExplorerError::Cancelled(format!("search for '{}'", query.text())));
                    }
                    _ = hold.release => {}
                }
            }
            Some(hold) => {
                let _ = hold.release.await;
            }
            None => {}
        }

        if let Some(error) = self.failures.lock().remove(query.text()) {
            return Err(error);
        }

        let pending = self.details.lock().remove(query.text()).unwrap_or_default();
        Ok(pending
            .into_iter()
            .map(|(id, gate)| {
                PendingDetail::spawn(id, async move {
                    gate.await
                        .unwrap_or_else(|_| Err(ExplorerError::Unknown("gate dropped".into())))
                })
            })
            .collect())
    }
}
