use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::{
    arena::{blast_zone, spawn_point, spawn_point::SpawnPoint},
    collision,
    combat::{attack, hitstop, hitstop::Hitstop, hurtbox, hurtbox::{Hurtbox, HurtboxOffset}, knockback},
    components::*,
    events::{
        FighterDamaged, FighterKo, FighterRespawned, HurtboxHit, MatchEnded, RoundEnded,
        RoundStarted, ScoreChanged,
    },
    health::FighterHealth,
    match_flow::{self, MatchPhase, MatchScore, PhaseTimer, RoundClock},
    physics,
};

// ── SystemSets (strict FixedUpdate ordering, live-round only) ───────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedGameSet {
    PhysicsSet,
    CollisionSet,
    ResolutionSet,
    CleanupSet,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<HurtboxHit>();
        app.add_message::<FighterKo>();
        app.add_message::<FighterDamaged>();
        app.add_message::<FighterRespawned>();
        app.add_message::<RoundStarted>();
        app.add_message::<RoundEnded>();
        app.add_message::<MatchEnded>();
        app.add_message::<ScoreChanged>();
        app.init_state::<MatchPhase>();
        app.init_resource::<Hitstop>();
        app.init_resource::<MatchScore>();
        app.init_resource::<PhaseTimer>();
        app.init_resource::<RoundClock>();

        // Configure FixedUpdate set ordering (each set gated to the live round)
        app.configure_sets(
            FixedUpdate,
            (
                FixedGameSet::PhysicsSet.run_if(in_state(MatchPhase::Fighting)),
                FixedGameSet::CollisionSet.run_if(in_state(MatchPhase::Fighting)),
                FixedGameSet::ResolutionSet.run_if(in_state(MatchPhase::Fighting)),
                FixedGameSet::CleanupSet.run_if(in_state(MatchPhase::Fighting)),
            )
                .chain(),
        );

        // PhysicsSet — chained to keep Transform/Velocity writes ordered
        app.add_systems(
            FixedUpdate,
            (
                physics::integrate_fighters,
                hurtbox::sync_hurtbox_transforms,
                knockback::tick_hitstun,
                match_flow::tick_respawn_grace,
                match_flow::tick_round_clock,
                attack::tick_hitbox_lifetimes,
            )
                .chain()
                .in_set(FixedGameSet::PhysicsSet),
        );

        // CollisionSet
        app.add_systems(
            FixedUpdate,
            (
                collision::detect_hitbox_overlaps,
                blast_zone::detect_blast_zone_entries,
            )
                .chain()
                .in_set(FixedGameSet::CollisionSet),
        );

        // ResolutionSet — chained so knockout handling sees this tick's hits
        app.add_systems(
            FixedUpdate,
            (hurtbox::resolve_hits, match_flow::handle_fighter_ko)
                .chain()
                .in_set(FixedGameSet::ResolutionSet),
        );

        // CleanupSet
        app.add_systems(
            FixedUpdate,
            attack::despawn_expired_hitboxes.in_set(FixedGameSet::CleanupSet),
        );

        // ── Hitstop counts down on the real clock, outside the fixed step ──
        app.add_systems(Update, hitstop::tick_hitstop);

        // ── Match flow (Update) ─────────────────────────────────────────
        app.add_systems(
            Update,
            match_flow::begin_match_when_ready.run_if(in_state(MatchPhase::Waiting)),
        );
        app.add_systems(
            Update,
            match_flow::tick_countdown.run_if(in_state(MatchPhase::Countdown)),
        );
        app.add_systems(
            Update,
            match_flow::tick_round_end.run_if(in_state(MatchPhase::RoundEnd)),
        );

        app.add_systems(OnEnter(MatchPhase::Countdown), match_flow::enter_countdown);
        app.add_systems(OnEnter(MatchPhase::Fighting), match_flow::enter_fighting);
        app.add_systems(OnEnter(MatchPhase::RoundEnd), match_flow::enter_round_end);
        app.add_systems(OnEnter(MatchPhase::MatchEnd), match_flow::enter_match_end);
        app.add_systems(OnExit(MatchPhase::MatchEnd), match_flow::exit_match_end);

        // ── Startup ─────────────────────────────────────────────────────
        app.add_systems(
            Startup,
            (
                spawn_point::spawn_spawn_points,
                blast_zone::spawn_blast_zones,
                setup_fighters,
            )
                .chain(),
        );
    }
}

// ── Startup ─────────────────────────────────────────────────────────

/// Two fighters at the tuned spawn points, each with body and head
/// hurtboxes whose positions are synced from the owner every tick.
fn setup_fighters(mut commands: Commands, tuning: Res<Tuning>, spawn_points: Query<&SpawnPoint>) {
    for point in &spawn_points {
        let fighter = commands
            .spawn((
                Fighter,
                PlayerSlot(point.player),
                Facing(point.facing),
                Transform::from_translation(point.position.extend(0.0)),
                Velocity(Vec2::ZERO),
                CombatState::default(),
                FighterHealth::default(),
                RespawnState::default(),
            ))
            .id();

        let body_radius = tuning.fighter_radius;
        let head_offset = Vec2::new(0.0, body_radius * 1.3);
        commands.spawn((
            Hurtbox::new(fighter),
            HurtboxOffset(Vec2::ZERO),
            CollisionRadius(body_radius),
            Transform::from_translation(point.position.extend(0.0)),
        ));
        commands.spawn((
            Hurtbox::new(fighter),
            HurtboxOffset(head_offset),
            CollisionRadius(body_radius * 0.6),
            Transform::from_translation((point.position + head_offset).extend(0.0)),
        ));
    }
}
