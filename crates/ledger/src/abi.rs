//! Score contract bindings.
//!
//! ABI-level encoding of the four contract calls and two events the game
//! uses. Selectors and event topics are derived by `sol!`.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolEvent};

sol! {
    interface IScoreBoard {
        event LeaderboardUpdated(address indexed player, uint256 score);
        event ScoreRecorded(address indexed player, uint256 score);

        function recordScore(uint256 _score);
        function getMyBestScore() view returns (uint256);
        function getTopScores() view returns (address[] players, uint256[] scores);
        function getTopCount() pure returns (uint256);
    }
}

pub use IScoreBoard::IScoreBoardCalls as ScoreBoardCall;

/// Topic 0 of `ScoreRecorded`.
pub const SCORE_RECORDED_TOPIC: B256 = IScoreBoard::ScoreRecorded::SIGNATURE_HASH;

/// Topic 0 of `LeaderboardUpdated`.
pub const LEADERBOARD_UPDATED_TOPIC: B256 = IScoreBoard::LeaderboardUpdated::SIGNATURE_HASH;

pub fn encode_record_score(score: u64) -> Bytes {
    IScoreBoard::recordScoreCall {
        _score: U256::from(score),
    }
    .abi_encode()
    .into()
}

pub fn encode_get_my_best_score() -> Bytes {
    IScoreBoard::getMyBestScoreCall {}.abi_encode().into()
}

pub fn encode_get_top_scores() -> Bytes {
    IScoreBoard::getTopScoresCall {}.abi_encode().into()
}

pub fn encode_get_top_count() -> Bytes {
    IScoreBoard::getTopCountCall {}.abi_encode().into()
}

pub fn decode_best_score(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
    Ok(IScoreBoard::getMyBestScoreCall::abi_decode_returns(data, true)?._0)
}

/// Parallel `(players, scores)` arrays in contract slot order.
pub fn decode_top_scores(data: &[u8]) -> Result<(Vec<Address>, Vec<U256>), alloy_sol_types::Error> {
    let ret = IScoreBoard::getTopScoresCall::abi_decode_returns(data, true)?;
    Ok((ret.players, ret.scores))
}

pub fn decode_top_count(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
    Ok(IScoreBoard::getTopCountCall::abi_decode_returns(data, true)?._0)
}

/// Clamp an on-chain integer into a `u64` score.
pub fn to_u64_saturating(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_score_calldata_layout() {
        let data = encode_record_score(9920);
        // 4-byte selector + one 32-byte word.
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], IScoreBoard::recordScoreCall::SELECTOR.as_slice());
        assert_eq!(U256::from_be_slice(&data[4..]), U256::from(9920u64));
    }

    #[test]
    fn read_selectors_are_distinct() {
        let a = encode_get_my_best_score();
        let b = encode_get_top_scores();
        let c = encode_get_top_count();
        assert_eq!(a.len(), 4);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn decodes_top_scores_returns() {
        let players = vec![Address::repeat_byte(0x11), Address::ZERO];
        let scores = vec![U256::from(9000u64), U256::ZERO];
        let encoded =
            IScoreBoard::getTopScoresCall::abi_encode_returns(&(players.clone(), scores.clone()));
        let (p, s) = decode_top_scores(&encoded).unwrap();
        assert_eq!(p, players);
        assert_eq!(s, scores);
    }

    #[test]
    fn truncated_return_data_is_an_error() {
        assert!(decode_best_score(&[0u8; 5]).is_err());
    }

    #[test]
    fn saturating_conversion() {
        assert_eq!(to_u64_saturating(U256::from(42u64)), 42);
        assert_eq!(to_u64_saturating(U256::MAX), u64::MAX);
    }

    #[test]
    fn event_topics_differ() {
        assert_ne!(SCORE_RECORDED_TOPIC, LEADERBOARD_UPDATED_TOPIC);
    }
}
