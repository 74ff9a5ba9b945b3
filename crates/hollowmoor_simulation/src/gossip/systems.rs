//! Gossip systems: membership lifecycle + sighting relay

use bevy::prelude::*;

use super::{GossipDirectory, SightingBroadcast};
use crate::ai::systems::receive_peer_sighting;
use crate::ai::{MonsterState, Tracking};
use crate::components::{Monster, NavigationTarget, Player};
use crate::config::{MonsterProfile, SimulationConfig};
use crate::navigation::NavAgent;
use crate::schedules::{ResumptionQueue, TickCounter};

/// Система: убрать из directory монстров, despawned host'ом
pub fn prune_departed_monsters(mut removed: RemovedComponents<Monster>, mut directory: ResMut<GossipDirectory>) {
    for entity in removed.read() {
        if directory.unregister(entity) {
            crate::log(&format!("Gossip: {:?} departed, unregistered", entity));
        }
    }
}

/// Система: регистрация монстров, у которых navmesh готов
///
/// Агенты готовятся в разные тики: регистрация откладывается до `is_ready()`,
/// порядок регистрации внутри тика = MonsterId.
pub fn register_ready_monsters(
    monsters: Query<(Entity, &Monster, &NavAgent)>,
    mut directory: ResMut<GossipDirectory>,
) {
    let mut ready: Vec<_> = monsters
        .iter()
        .filter(|(entity, _, nav)| nav.is_ready() && !directory.contains(*entity))
        .map(|(entity, monster, _)| (monster.id, entity))
        .collect();
    ready.sort();

    for (id, entity) in ready {
        directory.register(entity);
        crate::log(&format!(
            "Gossip: {:?} (#{}) joined, {} members",
            entity,
            id.0,
            directory.len()
        ));
    }
}

/// Система: reconciliation (prune мёртвых + link недостающих пар)
pub fn reconcile_gossip(live: Query<(), With<Monster>>, mut directory: ResMut<GossipDirectory>) {
    let report = directory.reconcile(|agent| live.contains(agent));

    if report.linked > 0 || !report.pruned.is_empty() {
        crate::log(&format!(
            "Gossip reconcile: linked {} subscriptions, pruned {:?}",
            report.linked, report.pruned
        ));
    }
}

/// Система: fanout SightingBroadcast всем подписчикам origin'а
///
/// Snapshot получателей на момент broadcast, каждый перепроверяется перед
/// доставкой. Получатели без direct sighting принимают позицию, даже если
/// их navmesh сейчас не готов.
pub fn relay_sightings(
    mut sightings: EventReader<SightingBroadcast>,
    directory: Res<GossipDirectory>,
    mut monsters: Query<(
        &MonsterProfile,
        &mut MonsterState,
        &mut Tracking,
        &mut NavigationTarget,
        &mut NavAgent,
    )>,
    players: Query<(), With<Player>>,
    mut queue: ResMut<ResumptionQueue>,
    counter: Res<TickCounter>,
    config: Res<SimulationConfig>,
) {
    for sighting in sightings.read() {
        let mut fanout = directory.broadcast(sighting.origin, sighting.position);

        while let Some(recipient) = fanout.next_recipient(&directory) {
            let Ok((profile, mut state, mut tracking, mut nav_target, mut nav)) = monsters.get_mut(recipient) else {
                continue;
            };

            // Navmesh не готов: позиция и state всё равно применяются, set_target
            // сделает update_navigation_targets когда adapter оживёт

            let direct_player_alive = tracking.target_player.is_some_and(|p| players.contains(p));

            let applied = receive_peer_sighting(
                recipient,
                profile,
                &mut state,
                &mut tracking,
                &mut nav_target,
                &mut nav,
                fanout.position,
                direct_player_alive,
                &mut queue,
                counter.tick,
                &config,
            );

            if applied {
                crate::log(&format!(
                    "Gossip: {:?} → {:?} sighting at {:?}",
                    sighting.origin, recipient, fanout.position
                ));
            }
        }
    }
}
