//! Hollowmoor Simulation Core
//!
//! ECS-симуляция монстров на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = решения (FSM, gossip, таймеры, capture/victory)
//! - Host (движок или `host::HeadlessHostPlugin`) = физика, navmesh, trigger volumes, анимации
//!
//! Граница: inbound `HostZoneOverlap` / `VictoryReached` / `NavAgent`,
//! outbound `MovementOutput` / `CueChanged` / `PlayerCaptured` / `SessionOutcome`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod capture;
pub mod components;
pub mod config;
pub mod error;
pub mod gossip;
pub mod host;
pub mod logger;
pub mod navigation;
pub mod schedules;
pub mod spawn;
pub mod zones;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AnimationCue, CueChanged, MonsterState, Tracking};
pub use capture::{CapturePlugin, PlayerCaptured, SessionOutcome, VictoryReached};
pub use components::*;
pub use config::{MonsterCatalog, MonsterProfile, MonsterVariant, SessionDocument, SimulationConfig};
pub use error::{ConfigError, SpawnError};
pub use gossip::{GossipDirectory, GossipPlugin, SightingBroadcast};
pub use host::{HeadlessHostPlugin, ZoneRadii};
pub use logger::*;
pub use navigation::{NavAgent, NavigationAdapter, StraightLineNavigator};
pub use schedules::{MonsterTick, ResumptionQueue, TickCounter, TickSet};
pub use spawn::MonsterBlueprint;
pub use zones::{HostZoneOverlap, ZoneEvent, ZoneEventKind, ZoneKind};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `SimulationConfig` / `MonsterCatalog` берутся из App, если уже вставлены
/// (например из RON), иначе встроенные значения.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();
        // Битый конфиг (NaN bounds, tick_hz <= 0) уронил бы тик: берём defaults с тем же seed
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                log_error(&format!("{}; using default simulation config", error));
                SimulationConfig {
                    seed: config.seed,
                    ..Default::default()
                }
            }
        };
        if !app.world().contains_resource::<MonsterCatalog>() {
            app.insert_resource(MonsterCatalog::builtin());
        }

        app.init_schedule(MonsterTick);

        app
            // Fixed timestep = tick rate сессии
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(config)
            .init_resource::<TickCounter>()
            .init_resource::<ResumptionQueue>()
            .init_resource::<components::MonsterIdAllocator>()
            .add_event::<HostZoneOverlap>()
            .add_event::<ZoneEvent>()
            .configure_sets(
                MonsterTick,
                (
                    TickSet::Prepare,
                    TickSet::HostInput,
                    TickSet::Sense,
                    TickSet::Decide,
                    TickSet::Navigate,
                    TickSet::HostOutput,
                    TickSet::Present,
                )
                    .chain(),
            )
            .add_systems(
                MonsterTick,
                (
                    schedules::timer_systems::increment_tick_counter,
                    navigation::sync_navigation_origins,
                )
                    .chain()
                    .in_set(TickSet::Prepare),
            )
            .add_systems(MonsterTick, zones::sense_zone_overlaps.in_set(TickSet::Sense))
            .add_systems(FixedUpdate, schedules::timer_systems::run_monster_tick)
            // Подсистемы (ECS strategic layer)
            .add_plugins((GossipPlugin, AIPlugin, CapturePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Плагины симуляции не добавлены: тест/demo добавляет
/// `(SimulationPlugin, HeadlessHostPlugin)` сам.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).insert_resource(SimulationConfig {
        seed,
        ..Default::default()
    });

    app
}

/// Один логический тик (MonsterTick напрямую, без wall-clock)
///
/// Вне `App::update` event buffers никто не свапает, поэтому после тика
/// делаем это сами: событие живёт два тика, потом отбрасывается.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(MonsterTick);
    swap_event_buffers(world);
}

/// `Events::update` для всех событий симуляции
pub fn swap_event_buffers(world: &mut World) {
    update_events::<HostZoneOverlap>(world);
    update_events::<ZoneEvent>(world);
    update_events::<SightingBroadcast>(world);
    update_events::<CueChanged>(world);
    update_events::<PlayerCaptured>(world);
    update_events::<VictoryReached>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

pub fn step_n(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        step(app);
    }
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug в порядке Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
