//! AI компоненты: state machine, tracking

// NOTE: MonsterState и Tracking определены в crate::ai::components
// Экспортируем их здесь для единообразия импорта из crate::components

pub use crate::ai::{AnimationCue, MonsterState, Tracking};
