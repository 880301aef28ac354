//! Application state for memo-match.
//!
//! [`App`] sits between the terminal front end and the two back ends: the
//! deterministic board engine (driven synchronously) and the ledger worker
//! (driven through queued requests and applied events).

pub mod controller;
pub mod notify;

pub use memo_match_core as core;
pub use memo_match_ledger as ledger;
pub use memo_match_types as types;

pub use controller::{App, BestScore, LeaderboardView, Submission, WalletStatus};
pub use notify::{Notice, Notices, MAX_NOTICES};
