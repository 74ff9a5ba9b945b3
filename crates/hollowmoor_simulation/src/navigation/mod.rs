//! Navigation adapter: граница с host navmesh
//!
//! Pathfinding делает host (NavigationAgent3D и т.п.), ECS только спрашивает:
//! готов ли navmesh, следующий waypoint, дошли ли. Пока `is_ready()` == false
//! остальные вызовы не делаются вообще (тик пропускается, повтор на следующем).

use bevy::prelude::*;

pub mod straight_line;

pub use straight_line::{NavigatorFlags, StraightLineNavigator};

/// Контракт host pathfinding для одного агента
pub trait NavigationAdapter: Send + Sync {
    /// Navmesh запечён и агент может строить пути
    fn is_ready(&self) -> bool;

    /// Запросить новый путь. Повторный вызов с тем же target допустим.
    fn set_target(&mut self, position: Vec3);

    /// Лучший текущий шаг к target (стабилен без нового set_target)
    fn next_waypoint(&self) -> Vec3;

    /// Агент фактически дошёл до target
    fn is_finished(&self) -> bool;

    /// Raycast по ходу движения упёрся в препятствие
    fn is_obstructed(&self) -> bool {
        false
    }

    /// Host сообщает текущую позицию агента (вызывается каждый тик до запросов)
    fn sync(&mut self, _origin: Vec3) {}
}

/// Component: navigation adapter агента
///
/// Обязателен при construction (см. `MonsterBlueprint`).
#[derive(Component)]
pub struct NavAgent(pub Box<dyn NavigationAdapter>);

impl NavAgent {
    pub fn new(adapter: impl NavigationAdapter + 'static) -> Self {
        Self(Box::new(adapter))
    }
}

impl std::ops::Deref for NavAgent {
    type Target = dyn NavigationAdapter;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for NavAgent {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

/// Система: host sync позиций в adapters (первой в тике)
pub fn sync_navigation_origins(mut agents: Query<(&Transform, &mut NavAgent)>) {
    for (transform, mut nav) in agents.iter_mut() {
        nav.sync(transform.translation);
    }
}
