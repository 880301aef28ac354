//! Line-delimited JSON-RPC 2.0 over TCP
//!
//! Talks to a wallet bridge that holds the user's keys: every request is one
//! JSON object per line, every response is one JSON object per line carrying
//! the request `id`. Lines carrying a `method` (subscription notifications)
//! are skipped. An error with a `null` id answers the request in flight,
//! since requests on one connection never overlap.
//!
//! ```text
//! -> {"jsonrpc":"2.0","id":1,"method":"eth_requestAccounts","params":[]}
//! <- {"jsonrpc":"2.0","id":1,"result":["0x5b38da6a701c568545dcfcb03fcb875f56beddc4"]}
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::error::ProviderError;
use crate::provider::WalletProvider;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
    /// Set on notifications only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl RpcResponse {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
            method: None,
        }
    }

    pub fn failure(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: None,
            error: Some(RpcErrorObject {
                code,
                message: message.into(),
                data: None,
            }),
            method: None,
        }
    }

    /// Convert into the request's outcome. A missing `result` is JSON `null`.
    pub fn into_result(self) -> Result<Value, ProviderError> {
        if let Some(err) = self.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

struct Connection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

/// Wallet bridge reachable over TCP.
///
/// The connection is opened on first use and dropped after any I/O error;
/// the next request reconnects. Requests are serialized on one connection.
pub struct TcpWalletProvider {
    host: String,
    port: u16,
    conn: Mutex<Option<Connection>>,
    next_id: AtomicU64,
}

impl TcpWalletProvider {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            conn: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn open(&self) -> Result<Connection, ProviderError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| ProviderError::Unavailable(format!("{}: {}", self.endpoint(), e)))?;
        stream
            .set_nodelay(true)
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let (read_half, writer) = stream.into_split();
        tracing::debug!(endpoint = %self.endpoint(), "wallet bridge connected");
        Ok(Connection {
            lines: BufReader::new(read_half).lines(),
            writer,
        })
    }

    async fn exchange(conn: &mut Connection, req: &RpcRequest) -> Result<RpcResponse, ProviderError> {
        let mut line = serde_json::to_string(req)?;
        line.push('\n');
        conn.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        conn.writer
            .flush()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        loop {
            let Some(line) = conn
                .lines
                .next_line()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?
            else {
                return Err(ProviderError::Transport("connection closed".to_string()));
            };
            if line.trim().is_empty() {
                continue;
            }
            let resp: RpcResponse = serde_json::from_str(&line)?;
            if resp.method.is_some() {
                continue;
            }
            match resp.id {
                Some(id) if id == req.id => return Ok(resp),
                Some(id) => {
                    tracing::warn!(expected = req.id, got = id, "dropping stale rpc response");
                }
                None if resp.error.is_some() => return Ok(resp),
                None => {
                    return Err(ProviderError::Decode(
                        "response without id or error".to_string(),
                    ));
                }
            }
        }
    }
}

impl WalletProvider for TcpWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = RpcRequest::new(id, method, params);

        let mut guard = self.conn.lock().await;
        if guard.is_none() {
            *guard = Some(self.open().await?);
        }
        let Some(conn) = guard.as_mut() else {
            return Err(ProviderError::Transport("no connection".to_string()));
        };

        tracing::trace!(id, method, "rpc request");
        match Self::exchange(conn, &req).await {
            Ok(resp) => resp.into_result(),
            Err(e) => {
                if !matches!(e, ProviderError::Decode(_)) {
                    *guard = None;
                }
                Err(e)
            }
        }
    }
}
