//! AI reaction systems (peer sightings, animation cues).

use bevy::prelude::*;

use crate::ai::events::CueChanged;
use crate::ai::systems::fsm::enter_state;
use crate::ai::transitions::{next_state, FsmTrigger, TransitionRules};
use crate::ai::{MonsterState, Tracking};
use crate::components::{AnimationRig, Monster, NavigationTarget};
use crate::config::{MonsterProfile, SimulationConfig};
use crate::navigation::NavAgent;
use crate::schedules::ResumptionQueue;

/// Реакция агента на sighting от peer'а
///
/// - Лично видит игрока (`target_player` жив) → игнор, у него информация точнее.
/// - Иначе: позиция становится last known + navigation target, агент помечен
///   spotted (second-hand). Stalker в Wandering переходит в Chasing, Crawler
///   только меняет target.
///
/// Повторное применение той же позиции даёт тот же результат.
/// Возвращает true если sighting применён.
pub(crate) fn receive_peer_sighting(
    entity: Entity,
    profile: &MonsterProfile,
    state: &mut MonsterState,
    tracking: &mut Tracking,
    nav_target: &mut NavigationTarget,
    nav: &mut NavAgent,
    position: Vec3,
    direct_player_alive: bool,
    queue: &mut ResumptionQueue,
    now: u64,
    config: &SimulationConfig,
) -> bool {
    if direct_player_alive {
        return false;
    }

    // Stale direct reference не считается точнее peer'а
    if tracking.has_direct_sighting() {
        tracking.lose_player();
    }

    tracking.adopt_report(position);
    nav_target.request(nav, position);

    let from = *state;
    let to = next_state(TransitionRules::from(profile), from, FsmTrigger::PeerSighting);
    if to != from {
        *state = to;
        enter_state(entity, profile, from, to, tracking, nav_target, queue, now, config);
    }
    true
}

/// Система: MonsterState → animation/audio cue
///
/// CueChanged отправляется только при смене cue (не каждый тик).
pub fn sync_animation_cues(
    mut monsters: Query<(Entity, &Monster, &MonsterState, &mut AnimationRig)>,
    mut cues: EventWriter<CueChanged>,
) {
    let mut changed = Vec::new();

    for (entity, monster, state, mut rig) in monsters.iter_mut() {
        let cue = state.cue();
        if rig.active == Some(cue) {
            continue;
        }
        rig.active = Some(cue);
        changed.push((
            monster.id,
            CueChanged {
                monster: entity,
                cue,
                clip: rig.clips.clip_for(cue).to_string(),
            },
        ));
    }

    changed.sort_by_key(|(id, _)| *id);
    for (_, event) in changed {
        cues.write(event);
    }
}
