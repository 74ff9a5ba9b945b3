//! Kinematic movement step (headless аналог move_and_slide)

use bevy::prelude::*;

use crate::components::{Monster, MovementOutput};
use crate::config::SimulationConfig;

/// Применяет MovementOutput: position += velocity * dt, rotation = facing
pub fn integrate_motion(
    mut monsters: Query<(&MovementOutput, &mut Transform), With<Monster>>,
    config: Res<SimulationConfig>,
) {
    let dt = config.tick_secs();

    for (output, mut transform) in monsters.iter_mut() {
        transform.translation += output.velocity * dt;
        transform.rotation = output.facing;
    }
}
