//! Wallet provider seam.
//!
//! A wallet is anything that answers EIP-1193 style `request(method, params)`
//! calls: account authorization, read-only contract calls, signed
//! transactions and receipt lookups. The ledger client only ever talks to a
//! contract through one of these.

use std::future::Future;

use serde_json::Value;

use crate::error::ProviderError;

/// JSON-RPC method names used by the ledger client.
pub mod methods {
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ACCOUNTS: &str = "eth_accounts";
    pub const CALL: &str = "eth_call";
    pub const SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
}

pub trait WalletProvider: Send + Sync {
    /// Issue one request and wait for its result.
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;
}

impl<P: WalletProvider> WalletProvider for std::sync::Arc<P> {
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send {
        (**self).request(method, params)
    }
}
