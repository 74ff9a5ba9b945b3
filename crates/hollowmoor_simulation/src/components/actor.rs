//! Базовые компоненты акторов: Monster, Player, AnimationRig

use bevy::prelude::*;

use crate::ai::{AnimationCue, MonsterState, Tracking};
use crate::components::{MovementOutput, NavigationTarget};
use crate::config::ClipNames;

/// Stable identity монстра (spawn sequence number)
///
/// Также детерминированный ключ обхода: все системы, где порядок наблюдаем,
/// сортируют агентов по MonsterId, а не по archetype order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub struct MonsterId(pub u64);

/// Монстр (agent): одна независимая FSM
///
/// Required Components: state, tracking, navigation target, movement output, Transform.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(MonsterState, Tracking, NavigationTarget, MovementOutput, Transform)]
pub struct Monster {
    pub id: MonsterId,
}

/// Resource: выдаёт MonsterId по порядку спавна
#[derive(Resource, Debug, Default)]
pub struct MonsterIdAllocator {
    next: u64,
}

impl MonsterIdAllocator {
    pub fn allocate(&mut self) -> MonsterId {
        let id = MonsterId(self.next);
        self.next += 1;
        id
    }
}

/// Marker component для player entity
///
/// Только акторы с этим маркером считаются "player" категорией в zone sensor.
/// Despawn player entity = stale reference, монстры трактуют как "потеряли".
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Animation rig монстра: clip на каждый cue + текущий активный cue
///
/// Host проигрывает clip по имени из `CueChanged`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AnimationRig {
    pub clips: ClipNames,
    pub active: Option<AnimationCue>,
}

impl AnimationRig {
    pub fn new(clips: ClipNames) -> Self {
        Self { clips, active: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_ids_are_sequential() {
        let mut allocator = MonsterIdAllocator::default();
        assert_eq!(allocator.allocate(), MonsterId(0));
        assert_eq!(allocator.allocate(), MonsterId(1));
        assert!(MonsterId(0) < MonsterId(1));
    }
}
