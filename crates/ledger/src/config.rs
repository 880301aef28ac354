//! Ledger configuration from environment variables.

use std::time::Duration;

use alloy_primitives::{address, Address};

/// Score contract the reference deployment uses.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("57F462795C8Cd692cfdF9a750b2BA9F9AF77c7B0");

pub const DEFAULT_WALLET_HOST: &str = "127.0.0.1";
pub const DEFAULT_WALLET_PORT: u16 = 8546;
pub const DEFAULT_POLL_MS: u64 = 1000;

/// Where wallet requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEndpoint {
    /// Line-delimited JSON-RPC wallet bridge.
    Tcp { host: String, port: u16 },
    /// In-process wallet and contract.
    Sandbox,
}

impl WalletEndpoint {
    pub fn describe(&self) -> String {
        match self {
            Self::Tcp { host, port } => format!("tcp://{host}:{port}"),
            Self::Sandbox => "sandbox".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub wallet: WalletEndpoint,
    pub contract: Address,
    /// Delay between transaction receipt polls.
    pub poll_interval: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            wallet: WalletEndpoint::Tcp {
                host: DEFAULT_WALLET_HOST.to_string(),
                port: DEFAULT_WALLET_PORT,
            },
            contract: DEFAULT_CONTRACT_ADDRESS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
        }
    }
}

impl LedgerConfig {
    /// Read `MEMO_MATCH_WALLET`, `MEMO_MATCH_WALLET_HOST`,
    /// `MEMO_MATCH_WALLET_PORT`, `MEMO_MATCH_CONTRACT` and `MEMO_MATCH_POLL_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let wallet = match var("MEMO_MATCH_WALLET").as_deref() {
            Some("sandbox") => WalletEndpoint::Sandbox,
            other => {
                if let Some(kind) = other.filter(|k| *k != "tcp") {
                    tracing::warn!(kind, "unknown MEMO_MATCH_WALLET, using tcp");
                }
                let host = var("MEMO_MATCH_WALLET_HOST")
                    .unwrap_or_else(|| DEFAULT_WALLET_HOST.to_string());
                let port = parse_or("MEMO_MATCH_WALLET_PORT", var("MEMO_MATCH_WALLET_PORT"), DEFAULT_WALLET_PORT);
                WalletEndpoint::Tcp { host, port }
            }
        };

        let contract = parse_or("MEMO_MATCH_CONTRACT", var("MEMO_MATCH_CONTRACT"), DEFAULT_CONTRACT_ADDRESS);
        let poll_ms = parse_or("MEMO_MATCH_POLL_MS", var("MEMO_MATCH_POLL_MS"), DEFAULT_POLL_MS).max(1);

        Self {
            wallet,
            contract,
            poll_interval: Duration::from_millis(poll_ms),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %s, "invalid value, using default");
            default
        }),
    }
}
