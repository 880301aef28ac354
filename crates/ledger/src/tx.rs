//! Transaction request and receipt shapes exchanged with the wallet.

use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize};

/// Parameters of `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, alias = "input", skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

impl TransactionRequest {
    pub fn call(to: Address, data: Bytes) -> Self {
        Self {
            from: None,
            to: Some(to),
            data: Some(data),
        }
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// The subset of a transaction receipt the client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` success, `0x0` reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s != U64::ZERO).unwrap_or(true)
    }

    pub fn has_log(&self, emitter: Address, topic0: B256) -> bool {
        self.logs
            .iter()
            .any(|log| log.address == emitter && log.topics.first() == Some(&topic0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_input_alias() {
        let v = serde_json::json!({
            "to": "0x57f462795c8cd692cfdf9a750b2ba9f9af77c7b0",
            "input": "0x12345678"
        });
        let req: TransactionRequest = serde_json::from_value(v).unwrap();
        assert_eq!(req.data.unwrap().as_ref(), &[0x12, 0x34, 0x56, 0x78]);
        assert!(req.from.is_none());
    }

    #[test]
    fn request_skips_missing_fields() {
        let req = TransactionRequest::call(Address::ZERO, Bytes::new());
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("from").is_none());
        assert!(v.get("to").is_some());
    }

    #[test]
    fn receipt_status_parsing() {
        let v = serde_json::json!({
            "transactionHash": format!("{:#x}", B256::ZERO),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": []
        });
        let receipt: TransactionReceipt = serde_json::from_value(v).unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.block_number, Some(U64::from(16u64)));
    }
}
