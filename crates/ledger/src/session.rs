use alloy_primitives::{Address, B256};

/// An authorized wallet connection, identified by its account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    pub account: Address,
}

impl Session {
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    /// `0x1234...abcd` form for narrow displays.
    pub fn short_account(&self) -> String {
        short_address(&self.account)
    }
}

/// One filled leaderboard slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaderboardEntry {
    /// 1-based slot position as returned by the contract.
    pub rank: u32,
    pub player: Address,
    pub score: u64,
}

/// A score transaction accepted by the wallet but not yet mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingSubmission {
    pub tx_hash: B256,
    pub score: u64,
}

/// A mined score transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Confirmation {
    pub tx_hash: B256,
    pub score: u64,
    pub block_number: Option<u64>,
    /// Receipt carried a `ScoreRecorded` log.
    pub score_recorded: bool,
    /// Receipt carried a `LeaderboardUpdated` log.
    pub leaderboard_updated: bool,
}

/// Checksummed address shortened to its first 6 and last 4 characters.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[38..])
}

/// Transaction hash shortened for notifications.
pub fn short_hash(hash: &B256) -> String {
    let full = format!("{hash:#x}");
    format!("{}...{}", &full[..10], &full[full.len() - 6..])
}
