//! MonsterTick schedule, tick counter, scheduled resumptions
//!
//! # Архитектура
//!
//! **FixedUpdate** → run_monster_tick → **MonsterTick** (один логический тик)
//!   ├─ TickSet::Prepare    : tick counter, navmesh sync, gossip register/reconcile
//!   ├─ TickSet::HostInput  : host overlaps (headless host пишет сюда)
//!   ├─ TickSet::Sense      : zone sensor
//!   ├─ TickSet::Decide     : resumptions, FSM transitions, gossip fanout
//!   ├─ TickSet::Navigate   : navigation targets, velocity/facing
//!   ├─ TickSet::HostOutput : host movement step (headless host)
//!   └─ TickSet::Present    : animation cues, victory teardown
//!
//! Тесты гоняют MonsterTick напрямую (`crate::step`), без wall-clock.
//! Все ожидания (scream, attack wind-up): записи в ResumptionQueue, тик не блокируется.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

pub mod resumptions;
pub mod timer_systems;

pub use resumptions::{ResumptionHandle, ResumptionKind, ResumptionQueue, ScheduledResumption};

/// Custom schedule: один логический тик всех монстров
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonsterTick;

/// Фазы тика (выполняются строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Prepare,
    HostInput,
    Sense,
    Decide,
    Navigate,
    HostOutput,
    Present,
}

/// Глобальный tick counter (детерминистичный, wraparound safe)
///
/// Инкрементируется в начале каждого MonsterTick. Первый тик = 1.
#[derive(Resource, Default, Debug)]
pub struct TickCounter {
    pub tick: u64,
}
