//! Headless navigator: прямая линия до target, без navmesh
//!
//! Используется demo binary и тестами вместо host NavigationAgent.
//! Warm-up имитирует первые кадры после загрузки, когда navmesh ещё не запечён.

use bevy::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::NavigationAdapter;

/// Внешние флаги navigator'а (тест/скрипт держит клон Arc)
#[derive(Debug, Default)]
pub struct NavigatorFlags {
    /// Raycast "упирается" в стену
    pub obstructed: AtomicBool,
    /// Navmesh выгружен (is_ready → false независимо от warm-up)
    pub offline: AtomicBool,
}

impl NavigatorFlags {
    pub fn set_obstructed(&self, value: bool) {
        self.obstructed.store(value, Ordering::Relaxed);
    }

    pub fn set_offline(&self, value: bool) {
        self.offline.store(value, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub struct StraightLineNavigator {
    origin: Vec3,
    target: Option<Vec3>,
    /// Сколько sync() тиков до готовности navmesh
    warmup_ticks: u32,
    /// Дистанция (XZ) на которой считаем что дошли
    arrive_radius: f32,
    flags: Arc<NavigatorFlags>,
}

impl Default for StraightLineNavigator {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            target: None,
            warmup_ticks: 0,
            arrive_radius: 0.5,
            flags: Arc::new(NavigatorFlags::default()),
        }
    }
}

impl StraightLineNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navmesh станет готов через `ticks` вызовов sync()
    pub fn with_warmup(mut self, ticks: u32) -> Self {
        self.warmup_ticks = ticks;
        self
    }

    pub fn with_arrive_radius(mut self, radius: f32) -> Self {
        self.arrive_radius = radius;
        self
    }

    pub fn flags(&self) -> Arc<NavigatorFlags> {
        Arc::clone(&self.flags)
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

impl NavigationAdapter for StraightLineNavigator {
    fn is_ready(&self) -> bool {
        self.warmup_ticks == 0 && !self.flags.offline.load(Ordering::Relaxed)
    }

    fn set_target(&mut self, position: Vec3) {
        self.target = Some(position);
    }

    fn next_waypoint(&self) -> Vec3 {
        self.target.unwrap_or(self.origin)
    }

    fn is_finished(&self) -> bool {
        let Some(target) = self.target else {
            return true;
        };
        let dx = target.x - self.origin.x;
        let dz = target.z - self.origin.z;
        (dx * dx + dz * dz).sqrt() <= self.arrive_radius
    }

    fn is_obstructed(&self) -> bool {
        self.flags.obstructed.load(Ordering::Relaxed)
    }

    fn sync(&mut self, origin: Vec3) {
        self.origin = origin;
        self.warmup_ticks = self.warmup_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_gates_readiness() {
        let mut nav = StraightLineNavigator::new().with_warmup(2);
        assert!(!nav.is_ready());
        nav.sync(Vec3::ZERO);
        assert!(!nav.is_ready());
        nav.sync(Vec3::ZERO);
        assert!(nav.is_ready());
    }

    #[test]
    fn test_finished_uses_horizontal_distance() {
        let mut nav = StraightLineNavigator::new().with_arrive_radius(1.0);
        assert!(nav.is_finished()); // Нет target

        nav.set_target(Vec3::new(0.0, 5.0, 0.5));
        nav.sync(Vec3::ZERO);
        assert!(nav.is_finished());

        nav.set_target(Vec3::new(4.0, 0.0, 0.0));
        assert!(!nav.is_finished());
        assert_eq!(nav.next_waypoint(), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_flags_shared_through_arc() {
        let nav = StraightLineNavigator::new();
        let flags = nav.flags();
        flags.set_obstructed(true);
        assert!(nav.is_obstructed());
        flags.set_offline(true);
        assert!(!nav.is_ready());
    }
}
