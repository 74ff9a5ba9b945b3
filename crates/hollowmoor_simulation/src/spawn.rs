//! Monster construction
//!
//! Монстр без navigation adapter или animation rig не создаётся вообще:
//! `MonsterBlueprint::spawn` возвращает `SpawnError` вместо полусобранного агента.

use bevy::prelude::*;

use crate::components::{AnimationRig, Monster, MonsterIdAllocator};
use crate::config::MonsterProfile;
use crate::error::SpawnError;
use crate::host::ZoneRadii;
use crate::navigation::{NavAgent, NavigationAdapter};

/// Builder монстра
///
/// # Example
/// ```ignore
/// let stalker = MonsterBlueprint::new(MonsterProfile::stalker())
///     .at(Vec3::new(10.0, 0.0, 5.0))
///     .with_navigation(StraightLineNavigator::new().with_warmup(2))
///     .with_profile_rig()
///     .spawn(app.world_mut())?;
/// ```
pub struct MonsterBlueprint {
    profile: MonsterProfile,
    position: Vec3,
    navigation: Option<NavAgent>,
    rig: Option<AnimationRig>,
    zones: Option<ZoneRadii>,
}

impl MonsterBlueprint {
    pub fn new(profile: MonsterProfile) -> Self {
        Self {
            profile,
            position: Vec3::ZERO,
            navigation: None,
            rig: None,
            zones: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_navigation(mut self, adapter: impl NavigationAdapter + 'static) -> Self {
        self.navigation = Some(NavAgent::new(adapter));
        self
    }

    pub fn with_rig(mut self, rig: AnimationRig) -> Self {
        self.rig = Some(rig);
        self
    }

    /// Rig с clip names из профиля
    pub fn with_profile_rig(mut self) -> Self {
        self.rig = Some(AnimationRig::new(self.profile.clips.clone()));
        self
    }

    /// Proximity зоны для headless host (движок держит свои Area3D)
    pub fn with_zones(mut self, zones: ZoneRadii) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Создать entity. Ошибка если нет navigation или rig.
    pub fn spawn(self, world: &mut World) -> Result<Entity, SpawnError> {
        let Some(navigation) = self.navigation else {
            return Err(SpawnError::MissingNavigation {
                profile: self.profile.name,
            });
        };
        let Some(rig) = self.rig else {
            return Err(SpawnError::MissingAnimationRig {
                profile: self.profile.name,
            });
        };

        let id = world
            .get_resource_or_insert_with(MonsterIdAllocator::default)
            .allocate();
        let name = self.profile.name.clone();

        let mut entity = world.spawn((
            Monster { id },
            self.profile,
            navigation,
            rig,
            Transform::from_translation(self.position),
        ));
        if let Some(zones) = self.zones {
            entity.insert(zones);
        }
        let entity = entity.id();

        crate::log(&format!("Spawned {} #{} as {:?} at {:?}", name, id.0, entity, self.position));
        Ok(entity)
    }
}
