//! Round and match lifecycle on a headless app: blast-zone knockouts,
//! scoring, respawns, timeouts, and the scripted demo match.

use bevy::prelude::*;

use neon_brawl::config::tuning::Tuning;
use neon_brawl::create_headless_app;
use neon_brawl::game::combat::attack::AttackDescriptor;
use neon_brawl::game::combat::hurtbox::Hurtbox;
use neon_brawl::game::components::{PlayerSlot, RespawnState, Velocity};
use neon_brawl::game::events::{FighterKo, HurtboxHit, MatchEnded};
use neon_brawl::game::health::FighterHealth;
use neon_brawl::game::match_flow::{MatchPhase, MatchScore, RoundClock};
use neon_brawl::game::types::{BlastZoneType, FacingSign, PlayerIndex};
use neon_brawl::plugins::demo_plugin::DemoPlugin;

const MAX_SETUP_UPDATES: usize = 1_000;

fn test_tuning() -> Tuning {
    Tuning {
        round_start_delay: 0.05,
        round_end_delay: 0.05,
        respawn_invincibility: 0.0,
        ..Tuning::default()
    }
}

fn phase(app: &App) -> MatchPhase {
    app.world().resource::<State<MatchPhase>>().get().clone()
}

fn step_until(app: &mut App, target: MatchPhase, max_updates: usize) {
    for _ in 0..max_updates {
        app.update();
        if phase(app) == target {
            return;
        }
    }
    panic!("never reached {target:?} (stuck in {:?})", phase(app));
}

fn app_in_fighting_phase(tuning: Tuning) -> App {
    let mut app = create_headless_app(tuning);
    step_until(&mut app, MatchPhase::Fighting, MAX_SETUP_UPDATES);
    app
}

fn fighter(app: &mut App, player: usize) -> Entity {
    let mut query = app.world_mut().query::<(Entity, &PlayerSlot)>();
    query
        .iter(app.world())
        .find(|(_, slot)| slot.0 == PlayerIndex::new(player))
        .map(|(entity, _)| entity)
        .expect("fighter not spawned")
}

fn hurtbox_of(app: &mut App, owner: Entity) -> Entity {
    let mut query = app.world_mut().query::<(Entity, &Hurtbox)>();
    query
        .iter(app.world())
        .find(|(_, hurtbox)| hurtbox.owner == owner)
        .map(|(entity, _)| entity)
        .expect("fighter has no hurtbox")
}

#[test]
fn bottom_blast_zone_emits_one_ko_and_scores_the_round() {
    // Gravity off so the captured exit velocity is exact.
    let tuning = Tuning {
        gravity: 0.0,
        ..test_tuning()
    };
    let mut app = app_in_fighting_phase(tuning);
    let victim = fighter(&mut app, 0);

    app.world_mut()
        .get_mut::<Transform>(victim)
        .unwrap()
        .translation
        .y = -9.5;
    app.world_mut().get_mut::<Velocity>(victim).unwrap().0 = Vec2::new(2.0, -10.0);
    app.update();

    let kos: Vec<FighterKo> = app
        .world()
        .resource::<Messages<FighterKo>>()
        .iter_current_update_messages()
        .cloned()
        .collect();
    assert_eq!(kos.len(), 1);
    assert_eq!(kos[0].player, PlayerIndex::new(0));
    assert_eq!(kos[0].zone, BlastZoneType::Bottom);
    assert!((kos[0].exit_velocity - Vec2::new(2.0, -10.0)).length() < 1e-4);

    assert!(app.world().get::<RespawnState>(victim).unwrap().respawning);
    assert_eq!(app.world().resource::<MatchScore>().rounds_won, [0, 1]);

    // Next round: both fighters reset at their spawn points.
    step_until(&mut app, MatchPhase::Countdown, MAX_SETUP_UPDATES);
    step_until(&mut app, MatchPhase::Fighting, MAX_SETUP_UPDATES);
    let health = app.world().get::<FighterHealth>(victim).unwrap();
    assert_eq!(health.damage_taken, 0.0);
    let x = app.world().get::<Transform>(victim).unwrap().translation.x;
    assert!((x + 3.5).abs() < 1e-3, "not respawned at its spawn point");
}

#[test]
fn respawning_fighter_cannot_be_knocked_out() {
    let tuning = Tuning {
        gravity: 0.0,
        ..test_tuning()
    };
    let mut app = app_in_fighting_phase(tuning);
    let victim = fighter(&mut app, 0);

    app.world_mut()
        .get_mut::<RespawnState>(victim)
        .unwrap()
        .respawning = true;
    app.world_mut()
        .get_mut::<Transform>(victim)
        .unwrap()
        .translation
        .y = -20.0;
    for _ in 0..5 {
        app.update();
    }

    assert!(app.world().resource::<Messages<FighterKo>>().is_empty());
    assert_eq!(phase(&app), MatchPhase::Fighting);
    assert_eq!(app.world().resource::<MatchScore>().rounds_won, [0, 0]);
}

#[test]
fn winning_enough_rounds_ends_the_match() {
    let tuning = Tuning {
        gravity: 0.0,
        rounds_to_win: 1,
        ..test_tuning()
    };
    let mut app = app_in_fighting_phase(tuning);
    let victim = fighter(&mut app, 0);

    app.world_mut()
        .get_mut::<Transform>(victim)
        .unwrap()
        .translation
        .y = -20.0;
    step_until(&mut app, MatchPhase::MatchEnd, MAX_SETUP_UPDATES);

    let ended: Vec<MatchEnded> = app
        .world()
        .resource::<Messages<MatchEnded>>()
        .iter_current_update_messages()
        .cloned()
        .collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].winner, PlayerIndex::new(1));
    assert_eq!(ended[0].rounds_won, [0, 1]);
}

#[test]
fn round_timeout_goes_to_the_less_damaged_fighter() {
    let tuning = Tuning {
        match_time_limit: 0.1,
        ..test_tuning()
    };
    let mut app = app_in_fighting_phase(tuning);
    let heavy = fighter(&mut app, 0);
    app.world_mut()
        .get_mut::<FighterHealth>(heavy)
        .unwrap()
        .take_damage(30.0);

    step_until(&mut app, MatchPhase::RoundEnd, 60);
    assert_eq!(app.world().resource::<MatchScore>().rounds_won, [0, 1]);
}

#[test]
fn even_timeout_arms_sudden_death_knockback() {
    let tuning = Tuning {
        match_time_limit: 0.05,
        enable_sudden_death: true,
        ..test_tuning()
    };
    let mut app = app_in_fighting_phase(tuning);

    for _ in 0..30 {
        app.update();
        if app.world().resource::<RoundClock>().sudden_death {
            break;
        }
    }
    assert!(app.world().resource::<RoundClock>().sudden_death);
    assert_eq!(phase(&app), MatchPhase::Fighting);

    // The next clean hit launches at the override multiplier: 5 * 8 * 1.
    let target = fighter(&mut app, 0);
    let hurtbox = hurtbox_of(&mut app, target);
    app.world_mut()
        .resource_mut::<Messages<HurtboxHit>>()
        .write(HurtboxHit {
            hurtbox,
            attack: AttackDescriptor::new(5.0, 5.0, Vec2::new(1.0, 0.5)),
            attacker_facing: FacingSign::RIGHT,
        });
    app.update();

    let speed = app.world().get::<Velocity>(target).unwrap().0.length();
    assert!((speed - 40.0).abs() < 1e-3, "launch speed was {speed}");
}

#[test]
fn scripted_demo_match_plays_to_completion() {
    let tuning = Tuning {
        round_start_delay: 0.2,
        round_end_delay: 0.2,
        ..Tuning::default()
    };
    let mut app = create_headless_app(tuning);
    app.add_plugins(DemoPlugin);

    step_until(&mut app, MatchPhase::MatchEnd, 100_000);

    let score = app.world().resource::<MatchScore>();
    assert!(score.rounds_won.iter().any(|&rounds| rounds >= 2));
    assert!(score.last_winner.is_some());
}
