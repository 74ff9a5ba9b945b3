//! Gossip Network: монстры делятся sightings игрока
//!
//! # Архитектура
//!
//! - `GossipDirectory` (resource): члены + подписки, единственный владелец
//! - register/prune/reconcile каждый тик в `TickSet::Prepare`
//! - `SightingBroadcast` пишут FSM системы, `relay_sightings` раздаёт
//!   в том же тике (до navigation targeting)

use bevy::prelude::*;

use crate::ai::systems::apply_zone_events;
use crate::navigation::sync_navigation_origins;
use crate::schedules::{MonsterTick, TickSet};

pub mod directory;
pub mod systems;

#[cfg(test)]
mod directory_tests;

pub use directory::{Fanout, GossipDirectory, ReconcileReport};
pub use systems::*;

/// Агент лично увидел игрока в `position` (раздаётся всем кроме origin)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SightingBroadcast {
    pub origin: Entity,
    pub position: Vec3,
}

/// Gossip Plugin
pub struct GossipPlugin;

impl Plugin for GossipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GossipDirectory>()
            .add_event::<SightingBroadcast>()
            .add_systems(
                MonsterTick,
                (prune_departed_monsters, register_ready_monsters, reconcile_gossip)
                    .chain()
                    .after(sync_navigation_origins)
                    .in_set(TickSet::Prepare),
            )
            .add_systems(
                MonsterTick,
                relay_sightings.after(apply_zone_events).in_set(TickSet::Decide),
            );
    }
}
