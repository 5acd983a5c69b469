use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::events::MatchEnded;
use crate::storage::repo::{MatchHistory, MatchRecord};
use crate::storage::sqlite_repo::SqliteRepo;

/// Persisted tokio runtime for sync DB calls outside startup.
#[derive(Resource)]
pub struct TokioRuntime(pub tokio::runtime::Runtime);

/// How many past results to show at startup.
const RECENT_SHOWN: u32 = 5;

pub struct StoragePlugin;

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_storage);
        app.add_systems(Update, record_finished_matches);
    }
}

fn init_storage(world: &mut World) {
    let db_path = Tuning::data_dir().join("neon_brawl.db");
    info!("Initializing SQLite at {:?}", db_path);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}, match history disabled");
            return;
        }
    };

    match rt.block_on(SqliteRepo::new(&db_path)) {
        Ok(repo) => {
            info!("SQLite initialized successfully");
            log_recent_results(&repo, &rt);
            world.insert_resource(repo);
        }
        Err(e) => {
            error!("Failed to initialize SQLite: {e}");
        }
    }
    // Keep runtime alive for sync DB calls after startup
    world.insert_resource(TokioRuntime(rt));
}

fn log_recent_results(repo: &SqliteRepo, rt: &tokio::runtime::Runtime) {
    match repo.recent(rt, RECENT_SHOWN) {
        Ok(matches) if matches.is_empty() => info!("No match history yet"),
        Ok(matches) => {
            for record in &matches {
                info!(
                    "Past match: player {} won {}-{}",
                    record.winner.0,
                    record.rounds_won[record.winner.0],
                    record.rounds_won[record.winner.opponent().0],
                );
            }
        }
        Err(e) => warn!("Failed to read match history: {e}"),
    }
}

/// Update: persist each finished match. A missing or failing store only
/// costs the history row, never the match.
fn record_finished_matches(
    mut ended: MessageReader<MatchEnded>,
    repo: Option<Res<SqliteRepo>>,
    rt: Option<Res<TokioRuntime>>,
) {
    for end in ended.read() {
        let (Some(repo), Some(rt)) = (repo.as_ref(), rt.as_ref()) else {
            continue;
        };
        let record = MatchRecord::new(end.winner, end.rounds_won);
        match repo.record(&rt.0, &record) {
            Ok(()) => info!("Recorded match {} to history", record.id),
            Err(e) => warn!("Failed to record match history: {e}"),
        }
    }
}
