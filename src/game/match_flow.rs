use bevy::prelude::*;

use super::arena::spawn_point::SpawnPoint;
use super::combat::attack::ActiveHitbox;
use super::combat::hitstop::Hitstop;
use super::combat::hurtbox::Hurtbox;
use super::components::{CombatState, Facing, Fighter, PlayerSlot, RespawnState, Velocity};
use super::events::{
    self, FighterKo, FighterRespawned, MatchEnded, RoundEnded, RoundStarted, ScoreChanged,
};
use super::health::FighterHealth;
use super::types::{PlayerIndex, Seconds};
use crate::config::tuning::Tuning;

// ── Match phase state ───────────────────────────────────────────────

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MatchPhase {
    #[default]
    Waiting,
    Countdown,
    Fighting,
    RoundEnd,
    MatchEnd,
    Paused,
}

/// Rounds won per slot plus the round currently played.
#[derive(Resource, Debug, Default)]
pub struct MatchScore {
    pub rounds_won: [u32; 2],
    pub round_number: u32,
    pub last_winner: Option<PlayerIndex>,
}

impl MatchScore {
    /// Record a round win and return the winner's new total.
    pub fn record_round_win(&mut self, player: PlayerIndex) -> u32 {
        self.rounds_won[player.0] += 1;
        self.last_winner = Some(player);
        self.rounds_won[player.0]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Delay countdown for the current phase (round start / round end).
#[derive(Resource, Debug, Default)]
pub struct PhaseTimer(pub Seconds);

/// Round time limit state. While `sudden_death` is set the knockback
/// multiplier is overridden, so the next clean hit decides the round.
#[derive(Resource, Debug, Default)]
pub struct RoundClock {
    pub remaining: Seconds,
    pub sudden_death: bool,
}

// ── Waiting ─────────────────────────────────────────────────────────

/// Update (Waiting): start the match once both fighters exist.
pub fn begin_match_when_ready(
    fighters: Query<(), With<Fighter>>,
    mut next_phase: ResMut<NextState<MatchPhase>>,
) {
    if fighters.iter().count() >= 2 {
        next_phase.set(MatchPhase::Countdown);
    }
}

// ── Countdown ───────────────────────────────────────────────────────

/// OnEnter(Countdown): reset both fighters at their spawn points, arm the
/// round-start delay, and make sure no freeze or live swing leaks into
/// the new round.
pub fn enter_countdown(
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut score: ResMut<MatchScore>,
    mut phase_timer: ResMut<PhaseTimer>,
    mut round_clock: ResMut<RoundClock>,
    mut hitstop: ResMut<Hitstop>,
    mut virtual_time: ResMut<Time<Virtual>>,
    spawn_points: Query<&SpawnPoint>,
    hitboxes: Query<Entity, With<ActiveHitbox>>,
    mut fighters: Query<
        (
            Entity,
            &PlayerSlot,
            &mut Transform,
            &mut Velocity,
            &mut Facing,
            &mut CombatState,
            &mut FighterHealth,
            &mut RespawnState,
        ),
        With<Fighter>,
    >,
    mut hurtboxes: Query<&mut Hurtbox>,
    mut respawned: MessageWriter<FighterRespawned>,
) {
    hitstop.cancel(&mut virtual_time);
    for hitbox in &hitboxes {
        commands.entity(hitbox).despawn();
    }

    score.round_number += 1;
    phase_timer.0 = Seconds::new(tuning.round_start_delay);
    round_clock.remaining = Seconds::new(tuning.match_time_limit);
    round_clock.sudden_death = false;

    let graced = tuning.respawn_invincibility > 0.0;
    for (entity, slot, mut transform, mut velocity, mut facing, mut combat, mut health, mut respawn) in
        &mut fighters
    {
        let Some(point) = spawn_points.iter().find(|p| p.player == slot.0) else {
            warn!("No spawn point for player {}, leaving fighter in place", slot.0 .0);
            continue;
        };

        transform.translation.x = point.position.x;
        transform.translation.y = point.position.y;
        facing.0 = point.facing;
        velocity.0 = Vec2::ZERO;
        combat.reset();
        health.reset();
        respawn.respawning = true;
        respawn.invincibility = Seconds::new(tuning.respawn_invincibility);

        for mut hurtbox in &mut hurtboxes {
            if hurtbox.owner == entity {
                hurtbox.set_invincible(graced);
            }
        }

        respawned.write(FighterRespawned {
            player: slot.0,
            position: point.position,
        });
    }

    info!("Round {} countdown", score.round_number);
}

/// Update (Countdown): wait out the round-start delay on the gameplay clock.
pub fn tick_countdown(
    time: Res<Time>,
    mut phase_timer: ResMut<PhaseTimer>,
    mut next_phase: ResMut<NextState<MatchPhase>>,
) {
    phase_timer.0 = phase_timer.0.dec(time.delta_secs());
    if phase_timer.0.is_expired() {
        next_phase.set(MatchPhase::Fighting);
    }
}

// ── Fighting ────────────────────────────────────────────────────────

/// OnEnter(Fighting): release the fighters and announce the round. The
/// invincibility grace keeps ticking into the round.
pub fn enter_fighting(
    score: Res<MatchScore>,
    mut fighters: Query<&mut RespawnState, With<Fighter>>,
    mut started: MessageWriter<RoundStarted>,
) {
    for mut respawn in &mut fighters {
        respawn.respawning = false;
    }
    started.write(RoundStarted {
        round: score.round_number,
    });
    info!("Round {} start", score.round_number);
}

/// PhysicsSet: count down respawn invincibility; the fighter's hurtboxes
/// become vulnerable the tick the grace window ends.
pub fn tick_respawn_grace(
    tuning: Res<Tuning>,
    mut fighters: Query<(Entity, &mut RespawnState), With<Fighter>>,
    mut hurtboxes: Query<&mut Hurtbox>,
) {
    let dt = tuning.dt;
    for (entity, mut respawn) in &mut fighters {
        if respawn.invincibility.is_expired() {
            continue;
        }
        respawn.invincibility = respawn.invincibility.dec(dt);
        if respawn.invincibility.is_expired() {
            for mut hurtbox in &mut hurtboxes {
                if hurtbox.owner == entity {
                    hurtbox.set_invincible(false);
                }
            }
        }
    }
}

/// PhysicsSet: tick the round time limit. On expiry the less-damaged
/// fighter wins; an even ledger arms sudden death (or, with sudden death
/// disabled, resets the clock and lets the round run on).
pub fn tick_round_clock(
    tuning: Res<Tuning>,
    mut round_clock: ResMut<RoundClock>,
    fighters: Query<(&PlayerSlot, &FighterHealth), With<Fighter>>,
    mut score: ResMut<MatchScore>,
    mut score_changed: MessageWriter<ScoreChanged>,
    mut next_phase: ResMut<NextState<MatchPhase>>,
) {
    if tuning.match_time_limit <= 0.0 || round_clock.sudden_death {
        return;
    }
    if round_clock.remaining.is_expired() {
        return;
    }
    round_clock.remaining = round_clock.remaining.dec(tuning.dt);
    if !round_clock.remaining.is_expired() {
        return;
    }

    let mut damage = [0.0f32; 2];
    for (slot, health) in &fighters {
        damage[slot.0 .0] = health.damage_taken;
    }

    if damage[0] == damage[1] {
        if tuning.enable_sudden_death {
            round_clock.sudden_death = true;
            info!("Time out with even damage, sudden death");
        } else {
            round_clock.remaining = Seconds::new(tuning.match_time_limit);
            info!("Time out with even damage, round continues");
        }
        return;
    }

    let winner = if damage[0] < damage[1] {
        PlayerIndex::new(0)
    } else {
        PlayerIndex::new(1)
    };
    let rounds = score.record_round_win(winner);
    score_changed.write(ScoreChanged {
        player: winner,
        rounds_won: rounds,
    });
    info!(
        "Time out, round {} to player {} on damage",
        score.round_number, winner.0
    );
    next_phase.set(MatchPhase::RoundEnd);
}

/// ResolutionSet: score a knockout, flag the victim, and close the round.
pub fn handle_fighter_ko(
    mut kos: MessageReader<FighterKo>,
    mut fighters: Query<(&PlayerSlot, &mut RespawnState), With<Fighter>>,
    mut score: ResMut<MatchScore>,
    mut score_changed: MessageWriter<ScoreChanged>,
    mut next_phase: ResMut<NextState<MatchPhase>>,
) {
    for ko in kos.read() {
        for (slot, mut respawn) in &mut fighters {
            if slot.0 == ko.player {
                respawn.respawning = true;
            }
        }

        let winner = ko.player.opponent();
        let rounds = score.record_round_win(winner);
        score_changed.write(ScoreChanged {
            player: winner,
            rounds_won: rounds,
        });
        info!(
            "Player {} out through the {:?} zone at {:.1} m/s, round {} to player {}",
            ko.player.0,
            ko.zone,
            ko.exit_velocity.length(),
            score.round_number,
            winner.0
        );
        next_phase.set(MatchPhase::RoundEnd);
    }
}

// ── RoundEnd ────────────────────────────────────────────────────────

/// OnEnter(RoundEnd): stop any freeze and announce the result.
pub fn enter_round_end(
    tuning: Res<Tuning>,
    score: Res<MatchScore>,
    mut phase_timer: ResMut<PhaseTimer>,
    mut hitstop: ResMut<Hitstop>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut ended: MessageWriter<RoundEnded>,
) {
    hitstop.cancel(&mut virtual_time);
    phase_timer.0 = Seconds::new(tuning.round_end_delay);
    if let Some(winner) = score.last_winner {
        ended.write(RoundEnded {
            round: score.round_number,
            winner,
        });
    }
}

/// Update (RoundEnd): short pause, then the next round or the match end.
pub fn tick_round_end(
    time: Res<Time>,
    tuning: Res<Tuning>,
    score: Res<MatchScore>,
    mut phase_timer: ResMut<PhaseTimer>,
    mut next_phase: ResMut<NextState<MatchPhase>>,
) {
    phase_timer.0 = phase_timer.0.dec(time.delta_secs());
    if !phase_timer.0.is_expired() {
        return;
    }
    if score.rounds_won.iter().any(|&r| r >= tuning.rounds_to_win) {
        next_phase.set(MatchPhase::MatchEnd);
    } else {
        next_phase.set(MatchPhase::Countdown);
    }
}

// ── MatchEnd ────────────────────────────────────────────────────────

/// OnEnter(MatchEnd): announce the winner.
pub fn enter_match_end(score: Res<MatchScore>, mut ended: MessageWriter<MatchEnded>) {
    let Some(winner) = score.last_winner else {
        return;
    };
    ended.write(MatchEnded {
        winner,
        rounds_won: score.rounds_won,
    });
    info!(
        "Match over: player {} wins {}-{}",
        winner.0,
        score.rounds_won[winner.0],
        score.rounds_won[winner.opponent().0]
    );
}

/// OnExit(MatchEnd): drop every queued notification and zero the score so
/// a rematch starts clean.
pub fn exit_match_end(world: &mut World) {
    events::clear_all(world);
    world.resource_mut::<MatchScore>().reset();
}
