//! Proximity zones: сферические detect/run/attack зоны вокруг монстра
//!
//! Poll-based: каждый тик считаем кто внутри каждой зоны → сравниваем с prev
//! state → entered/exited overlaps.

use bevy::prelude::*;
use std::collections::{BTreeSet, HashMap};

use crate::components::Monster;
use crate::zones::{HostZoneOverlap, ZoneKind};

/// Радиусы зон монстра (метры)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ZoneRadii {
    pub detect: f32,
    pub run: f32,
    pub attack: f32,
}

impl Default for ZoneRadii {
    fn default() -> Self {
        Self {
            detect: 15.0,
            run: 7.0,
            attack: 1.5,
        }
    }
}

impl ZoneRadii {
    pub fn radius(&self, zone: ZoneKind) -> f32 {
        match zone {
            ZoneKind::Detect => self.detect,
            ZoneKind::Run => self.run,
            ZoneKind::Attack => self.attack,
        }
    }
}

/// ProximityTracking resource: кто внутри какой зоны
///
/// Key = (monster, zone), Value = актёры внутри (BTreeSet: детерминированный
/// порядок diff'ов).
#[derive(Resource, Debug, Default)]
pub struct ProximityTracking {
    pub inside: HashMap<(Entity, ZoneKind), BTreeSet<Entity>>,
}

/// Poll proximity зон → HostZoneOverlap
///
/// Актёры = все entity с Transform, кроме самих монстров. Категорию (player
/// или нет) определяет zone sensor.
pub fn poll_proximity_zones(
    monsters: Query<(Entity, &Monster, &Transform, &ZoneRadii)>,
    actors: Query<(Entity, &Transform), Without<Monster>>,
    mut tracking: ResMut<ProximityTracking>,
    mut overlaps: EventWriter<HostZoneOverlap>,
) {
    // Despawned монстры: зоны исчезли вместе с ними
    tracking.inside.retain(|(monster, _), _| monsters.contains(*monster));

    let mut order: Vec<_> = monsters.iter().map(|(entity, monster, ..)| (monster.id, entity)).collect();
    order.sort();

    for (_, observer) in order {
        let Ok((_, _, transform, radii)) = monsters.get(observer) else {
            continue;
        };
        let center = transform.translation;

        for zone in ZoneKind::ALL {
            let radius = radii.radius(zone);
            let current: BTreeSet<Entity> = actors
                .iter()
                .filter(|(_, actor)| actor.translation.distance(center) <= radius)
                .map(|(entity, _)| entity)
                .collect();

            let prev = tracking.inside.entry((observer, zone)).or_default();

            for actor in current.difference(prev) {
                overlaps.write(HostZoneOverlap {
                    monster: observer,
                    zone,
                    entered: true,
                    actor: *actor,
                });
            }

            for actor in prev.difference(&current) {
                overlaps.write(HostZoneOverlap {
                    monster: observer,
                    zone,
                    entered: false,
                    actor: *actor,
                });
            }

            *prev = current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radii_nested() {
        let radii = ZoneRadii::default();
        assert!(radii.radius(ZoneKind::Detect) > radii.radius(ZoneKind::Run));
        assert!(radii.radius(ZoneKind::Run) > radii.radius(ZoneKind::Attack));
    }
}
