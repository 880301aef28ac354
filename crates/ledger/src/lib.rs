//! Ledger module - score contract access through a user's wallet
//!
//! Everything that leaves the process lives here. The game never signs
//! anything itself: it asks a wallet provider to authorize an account, to
//! run read-only contract calls, and to send the `recordScore` transaction.
//!
//! # Module Structure
//!
//! - [`provider`]: the `WalletProvider` seam (`request(method, params)`)
//! - [`rpc`]: line-delimited JSON-RPC 2.0 wallet bridge over TCP
//! - [`sandbox`]: in-process wallet plus score contract
//! - [`abi`]: contract call encoding and return decoding
//! - [`client`]: `LedgerClient` operations on top of a provider
//! - [`runtime`]: tokio worker the sync game loop talks to over channels
//! - [`config`]: environment configuration
//!
//! # Contract
//!
//! ```text
//! event LeaderboardUpdated(address indexed player, uint256 score)
//! event ScoreRecorded(address indexed player, uint256 score)
//! function recordScore(uint256 _score)
//! function getMyBestScore() view returns (uint256)
//! function getTopScores() view returns (address[] players, uint256[] scores)
//! function getTopCount() pure returns (uint256)
//! ```
//!
//! # Environment Variables
//!
//! - `MEMO_MATCH_WALLET`: `tcp` (default) or `sandbox`
//! - `MEMO_MATCH_WALLET_HOST` / `MEMO_MATCH_WALLET_PORT`: bridge address
//!   (default `127.0.0.1:8546`)
//! - `MEMO_MATCH_CONTRACT`: score contract address
//! - `MEMO_MATCH_POLL_MS`: receipt poll interval (default 1000)

pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod rpc;
pub mod runtime;
pub mod sandbox;
pub mod session;
pub mod tx;

pub use alloy_primitives::{Address, B256};

pub use client::LedgerClient;
pub use config::{LedgerConfig, WalletEndpoint, DEFAULT_CONTRACT_ADDRESS};
pub use error::{LedgerError, ProviderError};
pub use provider::WalletProvider;
pub use rpc::TcpWalletProvider;
pub use runtime::{run_worker, LedgerEvent, LedgerRequest, LedgerRuntime};
pub use sandbox::{SandboxOptions, SandboxWallet};
pub use session::{short_address, short_hash, Confirmation, LeaderboardEntry, PendingSubmission, Session};
