//! Timer systems: tick counter и запуск MonsterTick из FixedUpdate

use bevy::prelude::{ResMut, World};

use super::{MonsterTick, TickCounter};

/// System: Increment tick counter (MonsterTick, запускается ПЕРВЫМ)
pub fn increment_tick_counter(mut counter: ResMut<TickCounter>) {
    counter.tick = counter.tick.wrapping_add(1);
}

/// System: Run MonsterTick schedule каждый FixedUpdate
///
/// Exclusive system (требует &mut World для run_schedule).
pub fn run_monster_tick(world: &mut World) {
    world.run_schedule(MonsterTick);
}
