//! Movement компоненты: navigation target, выход для host movement step

use bevy::prelude::*;

use crate::navigation::NavAgent;

/// Последний target, запрошенный у navigation adapter
///
/// `None`: target ещё не выбран (Wandering выберет случайный на следующем тике).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationTarget {
    pub position: Option<Vec3>,
}

impl NavigationTarget {
    /// Запоминает target и передаёт в adapter (если navmesh готов)
    ///
    /// Adapter допускает повторный set_target с тем же значением.
    pub fn request(&mut self, nav: &mut NavAgent, position: Vec3) {
        self.position = Some(position);
        if nav.is_ready() {
            nav.set_target(position);
        }
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

/// Выход тика для host: velocity + facing (yaw-only)
///
/// ECS пишет, host применяет в своём movement step (move_and_slide и т.п.).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementOutput {
    /// м/с, world space
    pub velocity: Vec3,
    /// Поворот вокруг Y к следующему waypoint (pitch всегда 0)
    pub facing: Quat,
}

impl Default for MovementOutput {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            facing: Quat::IDENTITY,
        }
    }
}

impl MovementOutput {
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}

/// Yaw-only поворот, смотрящий из `from` на `to`
///
/// Y разница игнорируется, чтобы агент оставался вертикальным.
/// Возвращает `None` если точки совпадают в плоскости XZ.
pub fn yaw_facing(from: Vec3, to: Vec3) -> Option<Quat> {
    let horizontal = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if horizontal.length_squared() < 1e-6 {
        return None;
    }
    Some(Transform::IDENTITY.looking_to(horizontal, Vec3::Y).rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_facing_ignores_height() {
        let rotation = yaw_facing(Vec3::ZERO, Vec3::new(0.0, 10.0, -5.0)).unwrap();
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-4);
        assert!(forward.y.abs() < 1e-6);
    }

    #[test]
    fn test_yaw_facing_turns_toward_x() {
        let rotation = yaw_facing(Vec3::ZERO, Vec3::new(3.0, -2.0, 0.0)).unwrap();
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_yaw_facing_degenerate() {
        assert!(yaw_facing(Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 5.0, 1.0)).is_none());
    }
}
