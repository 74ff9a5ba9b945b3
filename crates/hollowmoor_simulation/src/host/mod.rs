//! Headless host: замена engine слоя для тестов и demo binary
//!
//! Делает то, что в игре делает движок:
//! - proximity зоны монстров → `HostZoneOverlap` (как Area3D body_entered/exited)
//! - интеграция `MovementOutput` в `Transform` (как move_and_slide)
//!
//! Navigation: `StraightLineNavigator` (см. `crate::navigation`).

use bevy::prelude::*;

use crate::schedules::{MonsterTick, TickSet};

pub mod motion;
pub mod proximity;

pub use motion::integrate_motion;
pub use proximity::{poll_proximity_zones, ProximityTracking, ZoneRadii};

/// Headless Host Plugin (не добавляется когда симуляцией управляет движок)
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProximityTracking>()
            .add_systems(MonsterTick, poll_proximity_zones.in_set(TickSet::HostInput))
            .add_systems(MonsterTick, integrate_motion.in_set(TickSet::HostOutput));
    }
}
