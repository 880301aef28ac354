//! Provider and ledger error types

/// Failures of a single wallet provider request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No wallet is reachable at all.
    #[error("wallet provider unavailable: {0}")]
    Unavailable(String),

    /// The wallet answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The connection broke mid-request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The wallet answered with something we could not interpret.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// EIP-1193 "user rejected the request".
    pub const USER_REJECTED_CODE: i64 = 4001;
    /// EIP-1193 "the requested account has not been authorized".
    pub const UNAUTHORIZED_CODE: i64 = 4100;

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, ProviderError::Rpc { code, .. } if *code == Self::USER_REJECTED_CODE)
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}

impl From<alloy_sol_types::Error> for ProviderError {
    fn from(e: alloy_sol_types::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}

/// Errors surfaced by the ledger client.
///
/// Every variant is recoverable: the controller turns it into a notification
/// and the game stays playable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("no wallet provider available")]
    WalletUnavailable,

    #[error("request rejected by user: {0}")]
    UserRejected(String),

    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("ledger read failed: {0}")]
    ReadError(String),

    #[error("score submission failed: {0}")]
    SubmissionFailed(String),
}

impl LedgerError {
    /// Classify a failure of `eth_requestAccounts` / `eth_accounts`.
    pub fn from_connect(e: ProviderError) -> Self {
        match e {
            ProviderError::Unavailable(_) => LedgerError::WalletUnavailable,
            ProviderError::Rpc { code, message } if code == ProviderError::USER_REJECTED_CODE => {
                LedgerError::UserRejected(message)
            }
            other => LedgerError::ConnectionFailed(other.to_string()),
        }
    }

    /// The message without the variant prefix, for notifications that
    /// already say what failed.
    pub fn detail(&self) -> String {
        match self {
            LedgerError::WalletUnavailable => "no wallet provider available".to_string(),
            LedgerError::UserRejected(m)
            | LedgerError::ConnectionFailed(m)
            | LedgerError::ReadError(m)
            | LedgerError::SubmissionFailed(m) => m.clone(),
        }
    }

    pub fn from_read(e: ProviderError) -> Self {
        LedgerError::ReadError(e.to_string())
    }

    pub fn from_submit(e: ProviderError) -> Self {
        LedgerError::SubmissionFailed(e.to_string())
    }
}
