//! Zone Sensor: host volume overlaps → semantic ZoneEvent
//!
//! Host (Area3D body_entered/body_exited) пишет `HostZoneOverlap`.
//! Sensor оставляет только player актёров и переводит в `ZoneEvent`.
//!
//! # Tie-break
//! Overlaps одного тика применяются в фиксированном порядке:
//! MonsterId → зона (Detect, Run, Attack) → порядок поступления.
//! Пересекающиеся границы зон могут сработать в одном тике, порядок нужен
//! для воспроизводимости.

use bevy::prelude::*;

use crate::components::{Monster, Player};

/// Вид trigger volume. Порядок вариантов = порядок применения в тике.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub enum ZoneKind {
    Detect,
    Run,
    Attack,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 3] = [ZoneKind::Detect, ZoneKind::Run, ZoneKind::Attack];
}

/// Категория актёра в overlap (host group)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorCategory {
    Player,
    Other,
}

/// Семантическое событие зоны
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ZoneEventKind {
    DetectEnter,
    DetectExit,
    RunEnter,
    RunExit,
    AttackEnter,
}

impl ZoneEventKind {
    pub const ALL: [ZoneEventKind; 5] = [
        ZoneEventKind::DetectEnter,
        ZoneEventKind::DetectExit,
        ZoneEventKind::RunEnter,
        ZoneEventKind::RunExit,
        ZoneEventKind::AttackEnter,
    ];

    pub fn zone(self) -> ZoneKind {
        match self {
            ZoneEventKind::DetectEnter | ZoneEventKind::DetectExit => ZoneKind::Detect,
            ZoneEventKind::RunEnter | ZoneEventKind::RunExit => ZoneKind::Run,
            ZoneEventKind::AttackEnter => ZoneKind::Attack,
        }
    }

    pub fn is_enter(self) -> bool {
        matches!(
            self,
            ZoneEventKind::DetectEnter | ZoneEventKind::RunEnter | ZoneEventKind::AttackEnter
        )
    }
}

/// Фильтр + перевод одного overlap
///
/// Не-player актёры молча отбрасываются. У attack зоны нет exit listener'а.
pub fn on_overlap(zone: ZoneKind, entered: bool, actor: ActorCategory) -> Option<ZoneEventKind> {
    if actor != ActorCategory::Player {
        return None;
    }

    match (zone, entered) {
        (ZoneKind::Detect, true) => Some(ZoneEventKind::DetectEnter),
        (ZoneKind::Detect, false) => Some(ZoneEventKind::DetectExit),
        (ZoneKind::Run, true) => Some(ZoneEventKind::RunEnter),
        (ZoneKind::Run, false) => Some(ZoneEventKind::RunExit),
        (ZoneKind::Attack, true) => Some(ZoneEventKind::AttackEnter),
        (ZoneKind::Attack, false) => None,
    }
}

/// Inbound от host: актёр вошёл/вышел из зоны монстра
#[derive(Event, Debug, Clone)]
pub struct HostZoneOverlap {
    /// Монстр, которому принадлежит зона
    pub monster: Entity,
    pub zone: ZoneKind,
    /// true = entered, false = exited
    pub entered: bool,
    /// Кто вошёл/вышел
    pub actor: Entity,
}

/// Семантическое событие для FSM (только player актёры)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ZoneEvent {
    pub monster: Entity,
    pub kind: ZoneEventKind,
    pub actor: Entity,
}

/// Система: HostZoneOverlap → ZoneEvent (с tie-break сортировкой)
pub fn sense_zone_overlaps(
    mut overlaps: EventReader<HostZoneOverlap>,
    monsters: Query<&Monster>,
    players: Query<(), With<Player>>,
    mut zone_events: EventWriter<ZoneEvent>,
) {
    let mut pending = Vec::new();

    for (arrival, overlap) in overlaps.read().enumerate() {
        // Монстр уже despawned: stale overlap
        let Ok(monster) = monsters.get(overlap.monster) else {
            continue;
        };

        let category = if players.contains(overlap.actor) {
            ActorCategory::Player
        } else {
            ActorCategory::Other
        };

        let Some(kind) = on_overlap(overlap.zone, overlap.entered, category) else {
            continue;
        };

        pending.push((monster.id, overlap.zone, arrival, ZoneEvent {
            monster: overlap.monster,
            kind,
            actor: overlap.actor,
        }));
    }

    pending.sort_by_key(|(id, zone, arrival, _)| (*id, *zone, *arrival));

    for (_, _, _, event) in pending {
        zone_events.write(event);
    }
}
