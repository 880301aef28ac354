//! memo-match (workspace facade crate).
//!
//! Re-exports the workspace crates as `memo_match::{app,core,input,ledger,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use memo_match_app as app;
pub use memo_match_core as core;
pub use memo_match_input as input;
pub use memo_match_ledger as ledger;
pub use memo_match_term as term;
pub use memo_match_types as types;
