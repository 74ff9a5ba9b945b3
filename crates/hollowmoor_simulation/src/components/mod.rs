//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Monster, MonsterId, Player, AnimationRig
//! - movement: NavigationTarget, MovementOutput
//! - ai: MonsterState, Tracking (живут в crate::ai, здесь re-export)

pub mod actor;
pub mod ai;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use movement::*;
