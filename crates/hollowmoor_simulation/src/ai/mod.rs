//! AI decision-making module
//!
//! Monster FSM (Stalker / Crawler): zone события, таймеры, gossip реакции,
//! navigation targets и movement output.

use bevy::prelude::*;

use crate::schedules::{MonsterTick, TickSet};

pub mod components;
pub mod events;
pub mod systems;
pub mod transitions;

// Re-export основных типов
pub use components::{AnimationCue, MonsterState, Tracking};
pub use events::CueChanged;
pub use systems::*;
pub use transitions::{next_state, FsmTrigger, TransitionRules};

/// AI Plugin
///
/// Регистрирует AI системы в MonsterTick.
/// Порядок выполнения:
/// 1. fire_resumptions: созревшие scream/capture таймеры
/// 2. apply_zone_events: ZoneEvent → FSM transitions + SightingBroadcast
/// 3. update_navigation_targets: wander/chase targets
/// 4. drive_movement: navigation → MovementOutput
/// 5. sync_animation_cues: state → CueChanged
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CueChanged>()
            .add_systems(
                MonsterTick,
                (systems::fire_resumptions, systems::apply_zone_events)
                    .chain()
                    .in_set(TickSet::Decide),
            )
            .add_systems(
                MonsterTick,
                (systems::update_navigation_targets, systems::drive_movement)
                    .chain()
                    .in_set(TickSet::Navigate),
            )
            .add_systems(MonsterTick, systems::sync_animation_cues.in_set(TickSet::Present));
    }
}
