use std::io;

use isahc::{Body, HttpClient, ReadResponseExt, Request, Response};
use serde_json::Value;
use thiserror::Error;

use crate::model::TransactionDraft;

pub const MINE_PATH: &str = "/mine";
pub const NEW_TRANSACTION_PATH: &str = "/transactions/new";
pub const CHAIN_PATH: &str = "/chain";

/// Every way a node call can fail. Callers treat them all as "request failed";
/// the variants only make the log line more useful.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request to node failed: {0}")]
    Transport(#[from] isahc::Error),

    #[error("Could not build request: {0}")]
    Request(#[from] isahc::http::Error),

    #[error("Could not read response body: {0}")]
    Read(#[from] io::Error),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type NodeResult = Result<Value, RequestError>;

/// The three endpoints of the node exercised by the page.
pub trait NodeApi: Send + Sync {
    fn mine(&self) -> NodeResult;
    fn new_transaction(&self, draft: &TransactionDraft) -> NodeResult;
    fn chain(&self) -> NodeResult;
}

/// A request captured on the dispatching thread, sent later from a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRequest {
    Mine,
    NewTransaction(TransactionDraft),
    Chain,
}

impl NodeRequest {
    pub fn path(&self) -> &'static str {
        match self {
            NodeRequest::Mine => MINE_PATH,
            NodeRequest::NewTransaction(_) => NEW_TRANSACTION_PATH,
            NodeRequest::Chain => CHAIN_PATH,
        }
    }

    pub fn send(&self, node: &dyn NodeApi) -> NodeResult {
        match self {
            NodeRequest::Mine => node.mine(),
            NodeRequest::NewTransaction(draft) => node.new_transaction(draft),
            NodeRequest::Chain => node.chain(),
        }
    }
}

pub struct NodeClient {
    base_url: String,
    http: HttpClient,
}

impl NodeClient {
    pub fn new(base_url: &str) -> Result<NodeClient, RequestError> {
        Ok(NodeClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClient::new()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn uri(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Status is not checked; any JSON body counts as a response.
    fn parse_body(mut response: Response<Body>) -> NodeResult {
        debug!("Node answered with status {}", response.status());

        let raw_body = response.text()?;
        let value = serde_json::from_str(&raw_body)?;

        Ok(value)
    }

    fn get(&self, path: &str) -> NodeResult {
        let response = self.http.get(self.uri(path))?;

        NodeClient::parse_body(response)
    }

    fn post_json(&self, path: &str, body: String) -> NodeResult {
        let request = Request::post(self.uri(path))
            .header("Content-Type", "application/json")
            .body(body)?;

        let response = self.http.send(request)?;

        NodeClient::parse_body(response)
    }
}

impl NodeApi for NodeClient {
    fn mine(&self) -> NodeResult {
        self.get(MINE_PATH)
    }

    fn new_transaction(&self, draft: &TransactionDraft) -> NodeResult {
        let body = serde_json::to_string(draft)?;

        self.post_json(NEW_TRANSACTION_PATH, body)
    }

    fn chain(&self) -> NodeResult {
        self.get(CHAIN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    fn unused_local_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        format!("http://127.0.0.1:{}", port)
    }

    #[test]
    fn should_trim_trailing_slash_from_base_url() {
        let client = NodeClient::new("http://localhost:5000/").unwrap();

        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.uri(CHAIN_PATH), "http://localhost:5000/chain");
    }

    #[test]
    fn should_report_transport_error_when_node_is_down() {
        let client = NodeClient::new(&unused_local_url()).unwrap();

        let err = client.chain().unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[test]
    fn should_report_request_error_for_invalid_uri() {
        let client = NodeClient::new("not a url").unwrap();

        let err = client
            .new_transaction(&TransactionDraft::default())
            .unwrap_err();
        assert!(matches!(err, RequestError::Request(_)));
    }
}
