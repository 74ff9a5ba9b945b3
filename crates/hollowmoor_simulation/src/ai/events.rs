//! AI Events: outbound события для host
//!
//! Host подписывается и проигрывает clip/звук по имени.

use bevy::prelude::*;

use crate::ai::AnimationCue;

/// Монстр сменил animation/audio cue
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CueChanged {
    pub monster: Entity,
    pub cue: AnimationCue,
    /// Имя clip'а из AnimationRig
    pub clip: String,
}
