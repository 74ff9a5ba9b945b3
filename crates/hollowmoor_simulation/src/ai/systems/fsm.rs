//! FSM AI systems (zone transitions, scheduled resumptions).

use bevy::prelude::*;

use crate::ai::transitions::{next_state, FsmTrigger, TransitionRules};
use crate::ai::{MonsterState, Tracking};
use crate::capture::{resolve_capture, CaptureResolution, PlayerCaptured, SessionOutcome};
use crate::components::{NavigationTarget, Player};
use crate::config::{MonsterProfile, SimulationConfig};
use crate::gossip::SightingBroadcast;
use crate::schedules::{ResumptionKind, ResumptionQueue, TickCounter};
use crate::zones::{ZoneEvent, ZoneEventKind};

/// Side effects входа в новое состояние
///
/// - Screaming: ScreamElapsed через `scream_secs`
/// - Attacking: ResolveCapture через `attack_windup_secs`
/// - Wandering: сбросить tracking + navigation target (новый случайный на следующем шаге)
pub(crate) fn enter_state(
    entity: Entity,
    profile: &MonsterProfile,
    from: MonsterState,
    to: MonsterState,
    tracking: &mut Tracking,
    nav_target: &mut NavigationTarget,
    queue: &mut ResumptionQueue,
    now: u64,
    config: &SimulationConfig,
) {
    if from == to {
        return;
    }

    crate::log(&format!("AI: {:?} ({}) {:?} → {:?}", entity, profile.name, from, to));

    match to {
        MonsterState::Screaming => {
            let delay = config.secs_to_ticks(profile.scream_secs);
            queue.schedule(now, delay, entity, ResumptionKind::ScreamElapsed);
        }
        MonsterState::Attacking => {
            let delay = config.secs_to_ticks(profile.attack_windup_secs);
            queue.schedule(now, delay, entity, ResumptionKind::ResolveCapture);
        }
        MonsterState::Wandering => {
            tracking.lose_player();
            tracking.second_hand = false;
            nav_target.clear();
        }
        MonsterState::Chasing | MonsterState::Running => {}
    }
}

/// Позиция лично замеченного и всё ещё существующего игрока
pub(crate) fn live_player_position(
    tracking: &Tracking,
    players: &Query<&Transform, With<Player>>,
) -> Option<Vec3> {
    let player = tracking.target_player?;
    players.get(player).ok().map(|t| t.translation)
}

/// Система: ZoneEvent → FSM transitions
///
/// События уже отсортированы sensor'ом (MonsterId → Detect/Run/Attack).
/// Переход в Chasing/Running по direct sighting пушит SightingBroadcast.
pub fn apply_zone_events(
    mut zone_events: EventReader<ZoneEvent>,
    mut monsters: Query<(&MonsterProfile, &mut MonsterState, &mut Tracking, &mut NavigationTarget)>,
    players: Query<&Transform, With<Player>>,
    mut queue: ResMut<ResumptionQueue>,
    counter: Res<TickCounter>,
    config: Res<SimulationConfig>,
    mut sightings: EventWriter<SightingBroadcast>,
) {
    for event in zone_events.read() {
        let Ok((profile, mut state, mut tracking, mut nav_target)) = monsters.get_mut(event.monster) else {
            continue;
        };

        let from = *state;
        let had_direct = tracking.has_direct_sighting();

        // Замороженные состояния не трогают tracking: таймер доигрывается как начат
        if !from.is_frozen() {
            if event.kind.is_enter() {
                let position = players.get(event.actor).ok().map(|t| t.translation);
                tracking.see_player(event.actor, position);
            } else if event.kind == ZoneEventKind::DetectExit {
                tracking.lose_player();
            }
        }

        let to = next_state(TransitionRules::from(profile), from, FsmTrigger::Zone(event.kind));
        if to != from {
            *state = to;
            enter_state(
                event.monster,
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

        let newly_direct = !had_direct && tracking.has_direct_sighting();
        if to.is_pursuit() && (to != from || newly_direct) {
            if let Some(position) = live_player_position(&tracking, &players) {
                sightings.write(SightingBroadcast {
                    origin: event.monster,
                    position,
                });
            }
        }
    }
}

/// Система: обработка созревших resumptions
///
/// Fire-and-forget: таймер срабатывает независимо от того, что произошло
/// с зонами. Resumption для despawned агента: no-op.
pub fn fire_resumptions(
    mut queue: ResMut<ResumptionQueue>,
    counter: Res<TickCounter>,
    config: Res<SimulationConfig>,
    mut monsters: Query<(&MonsterProfile, &mut MonsterState, &mut Tracking, &mut NavigationTarget)>,
    players: Query<&Transform, With<Player>>,
    mut sightings: EventWriter<SightingBroadcast>,
    mut captures: EventWriter<PlayerCaptured>,
    mut outcome: ResMut<SessionOutcome>,
) {
    let now = counter.tick;

    for due in queue.drain_due(now) {
        let Ok((profile, mut state, mut tracking, mut nav_target)) = monsters.get_mut(due.agent) else {
            crate::log(&format!("Resumption {:?} for departed agent {:?} skipped", due.kind, due.agent));
            continue;
        };

        let rules = TransitionRules::from(profile);
        let from = *state;

        match due.kind {
            ResumptionKind::ScreamElapsed => {
                if from != MonsterState::Screaming {
                    continue;
                }
                let to = next_state(rules, from, FsmTrigger::ScreamElapsed);
                *state = to;
                enter_state(
                    due.agent,
                    profile,
                    from,
                    to,
                    &mut tracking,
                    &mut nav_target,
                    &mut queue,
                    now,
                    &config,
                );

                if let Some(position) = live_player_position(&tracking, &players) {
                    sightings.write(SightingBroadcast {
                        origin: due.agent,
                        position,
                    });
                }
            }

            ResumptionKind::ResolveCapture => {
                if from != MonsterState::Attacking {
                    continue;
                }
                let live_player = tracking.target_player.filter(|p| players.contains(*p));

                match resolve_capture(due.agent, live_player) {
                    CaptureResolution::Captured(event) => {
                        crate::log_info(&format!(
                            "💀 {:?} ({}) captured player {:?}",
                            event.monster, profile.name, event.player
                        ));
                        outcome.latch(SessionOutcome::Captured {
                            monster: event.monster,
                            player: event.player,
                        });
                        captures.write(event);
                    }
                    CaptureResolution::Fizzled => {
                        let to = next_state(rules, from, FsmTrigger::CaptureFizzled);
                        *state = to;
                        enter_state(
                            due.agent,
                            profile,
                            from,
                            to,
                            &mut tracking,
                            &mut nav_target,
                            &mut queue,
                            now,
                            &config,
                        );
                    }
                }
            }
        }
    }
}
