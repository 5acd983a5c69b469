use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::combat::attack::{spawn_attack_hitbox, AttackDescriptor};
use crate::game::components::{CombatState, Facing, Fighter, RespawnState, Velocity};
use crate::game::events::MatchEnded;
use crate::game::match_flow::MatchPhase;
use crate::game::types::{FacingSign, Seconds};
use crate::plugins::game_plugin::FixedGameSet;

// Script pacing
const WALK_SPEED: f32 = 3.0;
const ATTACK_RANGE: f32 = 1.6;
const ATTACK_COOLDOWN: f32 = 0.9;
const SWING_REACH: f32 = 0.9;
const SWING_RADIUS: f32 = 0.55;
const SWING_ACTIVE: f32 = 0.12;

/// Scripted match for the headless binary: both fighters close distance
/// and trade preset attacks until someone takes the match, then the
/// process exits. The app steps on a manual clock, so the whole match
/// fast-forwards to its result.
pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostStartup, attach_scripts);
        app.add_systems(
            FixedUpdate,
            drive_fighters
                .before(FixedGameSet::PhysicsSet)
                .run_if(in_state(MatchPhase::Fighting)),
        );
        app.add_systems(Update, exit_when_match_ends);
    }
}

/// Per-fighter script state.
#[derive(Component, Default)]
struct DemoScript {
    cooldown: Seconds,
    attacks_thrown: u32,
}

fn attach_scripts(mut commands: Commands, fighters: Query<Entity, With<Fighter>>) {
    for fighter in &fighters {
        commands.entity(fighter).insert(DemoScript::default());
    }
}

/// Walk toward the opponent, swing when close. Fighters that are
/// respawning, launched, or stuck in hitstun are left to the physics
/// they were given.
fn drive_fighters(
    tuning: Res<Tuning>,
    mut commands: Commands,
    mut fighters: Query<
        (
            Entity,
            &Transform,
            &mut Velocity,
            &mut Facing,
            &CombatState,
            &RespawnState,
            &mut DemoScript,
        ),
        With<Fighter>,
    >,
) {
    let positions: Vec<(Entity, Vec2)> = fighters
        .iter()
        .map(|(entity, tf, ..)| (entity, tf.translation.truncate()))
        .collect();

    for (entity, tf, mut velocity, mut facing, combat, respawn, mut script) in &mut fighters {
        script.cooldown = script.cooldown.dec(tuning.dt);
        if respawn.respawning || combat.in_hitstun() {
            continue;
        }
        let Some(&(_, opponent)) = positions.iter().find(|(other, _)| *other != entity) else {
            continue;
        };

        let pos = tf.translation.truncate();
        facing.0 = if opponent.x >= pos.x {
            FacingSign::RIGHT
        } else {
            FacingSign::LEFT
        };

        let grounded = (tf.translation.y - tuning.floor_y).abs() < 1e-3
            && pos.x.abs() <= tuning.floor_half_width;
        if !grounded {
            continue;
        }

        if pos.distance(opponent) > ATTACK_RANGE {
            velocity.0.x = WALK_SPEED * (opponent.x - pos.x).signum();
            continue;
        }

        velocity.0.x = 0.0;
        if script.cooldown.is_expired() {
            let attack = match script.attacks_thrown % 3 {
                0 => AttackDescriptor::jab(),
                1 => AttackDescriptor::launcher(),
                _ => AttackDescriptor::spike(),
            };
            spawn_attack_hitbox(
                &mut commands,
                entity,
                attack,
                Vec2::new(SWING_REACH, 0.0),
                SWING_RADIUS,
                SWING_ACTIVE,
            );
            script.attacks_thrown += 1;
            script.cooldown = Seconds::new(ATTACK_COOLDOWN);
        }
    }
}

fn exit_when_match_ends(
    mut ended: MessageReader<MatchEnded>,
    mut app_exit: MessageWriter<AppExit>,
) {
    for end in ended.read() {
        info!("Demo match complete, player {} takes it", end.winner.0);
        app_exit.write(AppExit::Success);
    }
}
