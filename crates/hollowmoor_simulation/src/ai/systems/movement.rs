//! AI movement systems (navigation targets, velocity/facing output).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::systems::fsm::enter_state;
use crate::ai::transitions::{next_state, FsmTrigger, TransitionRules};
use crate::ai::{MonsterState, Tracking};
use crate::components::{yaw_facing, Monster, MovementOutput, NavigationTarget, Player};
use crate::config::{MonsterProfile, SimulationConfig, WorldBounds};
use crate::navigation::NavAgent;
use crate::schedules::{ResumptionQueue, TickCounter};
use crate::DeterministicRng;

/// Равномерно случайная точка в пределах world bounds (на уровне пола)
pub fn pick_wander_destination(rng: &mut impl Rng, bounds: &WorldBounds) -> Vec3 {
    let x = rng.gen_range(bounds.min_x..=bounds.max_x);
    let z = rng.gen_range(bounds.min_z..=bounds.max_z);
    Vec3::new(x, bounds.floor_y, z)
}

/// Система: обновление navigation targets по состоянию
///
/// - Wandering: путь пройден / raycast упёрся / target нет → новая случайная точка.
///   Second-hand позиция от peer'а сначала доводится до конца.
/// - Chasing/Running: re-target к игроку (или last known). Игрок потерян и путь
///   пройден → LostAndArrived → Wandering.
/// - Screaming/Attacking: стоим, target не трогаем.
///
/// Navmesh не готов → агент пропускает тик целиком.
/// Обход в порядке MonsterId (RNG детерминирован).
pub fn update_navigation_targets(
    mut monsters: Query<(
        Entity,
        &Monster,
        &MonsterProfile,
        &mut MonsterState,
        &mut Tracking,
        &mut NavigationTarget,
        &mut NavAgent,
    )>,
    players: Query<&Transform, With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    mut queue: ResMut<ResumptionQueue>,
    counter: Res<TickCounter>,
    config: Res<SimulationConfig>,
) {
    let mut order: Vec<_> = monsters.iter().map(|(entity, monster, ..)| (monster.id, entity)).collect();
    order.sort();

    for (_, entity) in order {
        let Ok((_, _, profile, mut state, mut tracking, mut nav_target, mut nav)) = monsters.get_mut(entity) else {
            continue;
        };

        if !nav.is_ready() {
            continue;
        }

        match *state {
            MonsterState::Wandering => {
                // Target мог прийти пока adapter был offline: досылаем
                if let Some(pending) = nav_target.position {
                    nav_target.request(&mut nav, pending);
                }

                let arrived = nav_target.position.is_none() || nav.is_finished();
                if !arrived && !nav.is_obstructed() {
                    continue;
                }

                if tracking.second_hand {
                    crate::log(&format!("AI: {:?} reached reported position, resuming wander", entity));
                    tracking.second_hand = false;
                }

                let destination = pick_wander_destination(&mut rng.rng, &config.wander_bounds);
                nav_target.request(&mut nav, destination);
            }

            MonsterState::Chasing | MonsterState::Running => {
                // Stale player reference → считаем потерянным
                if let Some(player) = tracking.target_player {
                    match players.get(player) {
                        Ok(transform) => tracking.last_known_player_position = Some(transform.translation),
                        Err(_) => tracking.lose_player(),
                    }
                }

                if let Some(destination) = tracking.last_known_player_position {
                    nav_target.request(&mut nav, destination);
                }

                if !tracking.has_direct_sighting() && nav.is_finished() {
                    let from = *state;
                    let to = next_state(TransitionRules::from(profile), from, FsmTrigger::LostAndArrived);
                    *state = to;
                    enter_state(
                        entity,
                        profile,
                        from,
                        to,
                        &mut tracking,
                        &mut nav_target,
                        &mut queue,
                        counter.tick,
                        &config,
                    );
                }
            }

            MonsterState::Screaming | MonsterState::Attacking => {}
        }
    }
}

/// Система: navigation → MovementOutput (velocity + yaw facing)
///
/// `direction = normalize(next_waypoint - position)`, `velocity = direction * speed`.
/// Facing только по yaw (pitch = 0, агент остаётся вертикальным).
/// Host применяет MovementOutput в своём movement step.
pub fn drive_movement(
    mut monsters: Query<(&MonsterProfile, &MonsterState, &NavAgent, &Transform, &mut MovementOutput), With<Monster>>,
) {
    for (profile, state, nav, transform, mut output) in monsters.iter_mut() {
        if !nav.is_ready() {
            output.halt();
            continue;
        }

        let speed = state.speed(&profile.speeds);
        if speed <= 0.0 || nav.is_finished() {
            output.halt();
            continue;
        }

        let position = transform.translation;
        let waypoint = nav.next_waypoint();
        let direction = (waypoint - position).normalize_or_zero();

        output.velocity = direction * speed;
        if let Some(facing) = yaw_facing(position, waypoint) {
            output.facing = facing;
        }
    }
}
