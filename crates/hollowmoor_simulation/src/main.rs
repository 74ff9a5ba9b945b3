//! Headless симуляция Hollowmoor
//!
//! Игрок идёт по прямой к машине, Stalker и Crawler бродят по карте.
//! Печатает смены cue, captures и исход сессии.

use bevy::ecs::event::Events;
use bevy::prelude::*;
use hollowmoor_simulation::{
    create_headless_app, init_logger, level_from_env, log_error, log_info, log_warning, set_log_level, step,
    CueChanged, HeadlessHostPlugin, LogLevel, MonsterBlueprint, MonsterCatalog, Player, PlayerCaptured,
    SessionDocument, SessionOutcome, SimulationConfig, SimulationPlugin, StraightLineNavigator, VictoryReached,
    ZoneRadii,
};

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/monsters.ron");
const MAX_TICKS: u32 = 60 * 90;
const PLAYER_SPEED: f32 = 3.0;
const CAR_POSITION: Vec3 = Vec3::new(0.0, 0.0, -55.0);

fn main() {
    init_logger();
    // Per-tick transitions пишутся на Debug: по умолчанию показываем Info и выше
    set_log_level(level_from_env("HOLLOWMOOR_LOG", LogLevel::Info));

    let (config, catalog) = match SessionDocument::load(CONFIG_PATH) {
        Ok(document) => document.into_resources(),
        Err(error) => {
            log_error(&format!("{}; falling back to builtin profiles", error));
            (SimulationConfig::default(), MonsterCatalog::builtin())
        }
    };

    println!("Starting Hollowmoor headless simulation (seed: {})", config.seed);

    let mut app = create_headless_app(config.seed);
    app.insert_resource(config.clone())
        .insert_resource(catalog.clone())
        .add_plugins((SimulationPlugin, HeadlessHostPlugin));

    let roster = [("stalker", Vec3::new(18.0, 0.0, -20.0)), ("crawler", Vec3::new(-15.0, 0.0, -35.0))];
    for (name, position) in roster {
        let Ok(profile) = catalog.get(name) else {
            log_warning(&format!("Profile '{}' missing from catalog, skipped", name));
            continue;
        };
        let spawned = MonsterBlueprint::new(profile.clone())
            .at(position)
            .with_navigation(StraightLineNavigator::new().with_warmup(3))
            .with_profile_rig()
            .with_zones(ZoneRadii::default())
            .spawn(app.world_mut());
        if let Err(error) = spawned {
            log_warning(&format!("Spawn failed: {}", error));
        }
    }

    let player = app.world_mut().spawn((Player, Transform::from_xyz(0.0, 0.0, 30.0))).id();

    let mut cues = app.world().resource::<Events<CueChanged>>().get_cursor();
    let mut captures = app.world().resource::<Events<PlayerCaptured>>().get_cursor();
    let dt = config.tick_secs();

    for tick in 1..=MAX_TICKS {
        // Скриптованный игрок: прямо к машине
        let arrived = match app.world_mut().get_mut::<Transform>(player) {
            Some(mut transform) => {
                let to_car = CAR_POSITION - transform.translation;
                if to_car.length() <= PLAYER_SPEED * dt {
                    true
                } else {
                    transform.translation += to_car.normalize() * PLAYER_SPEED * dt;
                    false
                }
            }
            None => false,
        };
        if arrived {
            app.world_mut().send_event(VictoryReached);
        }

        step(&mut app);

        let world = app.world();
        for cue in cues.read(world.resource::<Events<CueChanged>>()) {
            println!("Tick {}: {:?} plays '{}' ({:?})", tick, cue.monster, cue.clip, cue.cue);
        }
        for capture in captures.read(world.resource::<Events<PlayerCaptured>>()) {
            println!("Tick {}: {:?} captured {:?}", tick, capture.monster, capture.player);
        }

        let outcome = *world.resource::<SessionOutcome>();
        if outcome.is_over() {
            log_info(&format!("Session over at tick {}: {:?}", tick, outcome));
            break;
        }
    }

    println!("Simulation complete: {:?}", app.world().resource::<SessionOutcome>());
}
