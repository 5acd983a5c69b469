use serde::{Deserialize, Serialize};

use crate::game::types::PlayerIndex;

/// One finished match as persisted to history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub winner: PlayerIndex,
    pub rounds_won: [u32; 2],
    pub rounds_played: u32,
    /// Unix seconds.
    pub finished_at: i64,
}

impl MatchRecord {
    /// Build a record for a match that just finished.
    pub fn new(winner: PlayerIndex, rounds_won: [u32; 2]) -> Self {
        let finished_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            winner,
            rounds_won,
            rounds_played: rounds_won[0] + rounds_won[1],
            finished_at,
        }
    }
}

/// Repository trait for match-history access. Callers supply the runtime
/// the blocking call runs on.
pub trait MatchHistory: Send + Sync {
    fn record(&self, rt: &tokio::runtime::Runtime, record: &MatchRecord) -> Result<(), String>;
    fn recent(
        &self,
        rt: &tokio::runtime::Runtime,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, String>;
}
