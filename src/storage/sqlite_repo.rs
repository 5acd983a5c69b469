use bevy::prelude::*;
use sha2::{Digest, Sha256};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;

use super::repo::{MatchHistory, MatchRecord};

/// SQLite-backed match history (Bevy Resource).
#[derive(Resource)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    pub async fn new(db_path: &PathBuf) -> Result<Self, sqlx::Error> {
        if let Some(parent) = db_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn record_match_async(&self, record: &MatchRecord) -> Result<(), sqlx::Error> {
        let summary_json = serde_json::to_string(record).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(summary_json.as_bytes());
        let hash = hex::encode(hasher.finalize());

        sqlx::query(
            r#"INSERT OR REPLACE INTO matches
               (id, winner, rounds_won_p0, rounds_won_p1, rounds_played, finished_at, summary_json, hash)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&record.id)
        .bind(record.winner.0 as i64)
        .bind(record.rounds_won[0] as i64)
        .bind(record.rounds_won[1] as i64)
        .bind(record.rounds_played as i64)
        .bind(record.finished_at)
        .bind(&summary_json)
        .bind(&hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Newest matches first. Rows whose stored hash no longer matches their
    /// payload are skipped with a warning.
    pub async fn recent_matches_async(
        &self,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"SELECT summary_json, hash FROM matches ORDER BY finished_at DESC LIMIT ?"#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for (json, hash) in rows {
            let mut hasher = Sha256::new();
            hasher.update(json.as_bytes());
            if hex::encode(hasher.finalize()) != hash {
                warn!("Match history row failed its integrity check, skipping");
                continue;
            }
            match serde_json::from_str(&json) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Unreadable match history row: {e}"),
            }
        }
        Ok(records)
    }
}

impl MatchHistory for SqliteRepo {
    fn record(&self, rt: &tokio::runtime::Runtime, record: &MatchRecord) -> Result<(), String> {
        rt.block_on(self.record_match_async(record))
            .map_err(|e| e.to_string())
    }

    fn recent(
        &self,
        rt: &tokio::runtime::Runtime,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, String> {
        rt.block_on(self.recent_matches_async(limit))
            .map_err(|e| e.to_string())
    }
}
