//! Capture / Victory: исход сессии
//!
//! - Attack wind-up истёк и игрок жив → `PlayerCaptured`
//! - Host сообщил `VictoryReached` (игрок добрался до машины) → teardown всех монстров

use bevy::prelude::*;

use crate::ai::systems::sync_animation_cues;
use crate::components::Monster;
use crate::gossip::GossipDirectory;
use crate::schedules::{MonsterTick, TickSet};

/// Outbound: монстр поймал игрока
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCaptured {
    pub monster: Entity,
    pub player: Entity,
}

/// Inbound от host: игрок сбежал (car trigger)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct VictoryReached;

/// Resource: исход сессии. Первый исход фиксируется, остальные игнорируются.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionOutcome {
    #[default]
    InProgress,
    Captured {
        monster: Entity,
        player: Entity,
    },
    Escaped,
}

impl SessionOutcome {
    /// Зафиксировать исход. false если сессия уже завершена.
    pub fn latch(&mut self, outcome: SessionOutcome) -> bool {
        if *self != SessionOutcome::InProgress || outcome == SessionOutcome::InProgress {
            return false;
        }
        *self = outcome;
        true
    }

    pub fn is_over(&self) -> bool {
        *self != SessionOutcome::InProgress
    }
}

/// Результат resolve после attack wind-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureResolution {
    Captured(PlayerCaptured),
    /// Игрок пропал (despawned / потерян) → агент возвращается в Wandering
    Fizzled,
}

/// Resolve capture: игрок ещё жив → пойман
pub fn resolve_capture(monster: Entity, live_player: Option<Entity>) -> CaptureResolution {
    match live_player {
        Some(player) => CaptureResolution::Captured(PlayerCaptured { monster, player }),
        None => CaptureResolution::Fizzled,
    }
}

/// Система: VictoryReached → teardown
///
/// Сначала все агенты снимаются с gossip directory, потом despawn (MonsterId
/// порядок). Fanout после этого никого не найдёт.
pub fn teardown_on_victory(
    mut commands: Commands,
    mut victories: EventReader<VictoryReached>,
    monsters: Query<(Entity, &Monster)>,
    mut directory: ResMut<GossipDirectory>,
    mut outcome: ResMut<SessionOutcome>,
) {
    if victories.read().count() == 0 {
        return;
    }

    let members: Vec<Entity> = directory.members().to_vec();
    for agent in members {
        directory.unregister(agent);
    }

    let mut doomed: Vec<_> = monsters.iter().map(|(entity, monster)| (monster.id, entity)).collect();
    doomed.sort();
    for (_, entity) in &doomed {
        commands.entity(*entity).despawn();
    }

    if outcome.latch(SessionOutcome::Escaped) {
        crate::log_info(&format!("🚗 Player escaped, {} monsters torn down", doomed.len()));
    } else {
        crate::log_warning(&format!("VictoryReached after session ended ({:?})", *outcome));
    }
}

/// Capture Plugin
pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionOutcome>()
            .add_event::<PlayerCaptured>()
            .add_event::<VictoryReached>()
            .add_systems(
                MonsterTick,
                teardown_on_victory.after(sync_animation_cues).in_set(TickSet::Present),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_capture_with_live_player() {
        let monster = Entity::from_raw(1);
        let player = Entity::from_raw(2);
        assert_eq!(
            resolve_capture(monster, Some(player)),
            CaptureResolution::Captured(PlayerCaptured { monster, player })
        );
    }

    #[test]
    fn test_resolve_capture_without_player_fizzles() {
        assert_eq!(resolve_capture(Entity::from_raw(1), None), CaptureResolution::Fizzled);
    }

    #[test]
    fn test_outcome_latches_first() {
        let mut outcome = SessionOutcome::default();
        assert!(!outcome.is_over());

        let captured = SessionOutcome::Captured {
            monster: Entity::from_raw(1),
            player: Entity::from_raw(2),
        };
        assert!(outcome.latch(captured));
        assert!(!outcome.latch(SessionOutcome::Escaped));
        assert_eq!(outcome, captured);
        assert!(outcome.is_over());
    }

    #[test]
    fn test_outcome_ignores_in_progress() {
        let mut outcome = SessionOutcome::default();
        assert!(!outcome.latch(SessionOutcome::InProgress));
        assert!(outcome.latch(SessionOutcome::Escaped));
    }
}
