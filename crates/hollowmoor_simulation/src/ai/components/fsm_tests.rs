//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{AnimationCue, MonsterState, Tracking};
    use crate::config::MonsterProfile;
    use bevy::prelude::*;

    #[test]
    fn test_monster_state_default() {
        assert_eq!(MonsterState::default(), MonsterState::Wandering);
    }

    #[test]
    fn test_speed_derived_from_state() {
        let speeds = MonsterProfile::stalker().speeds;
        assert_eq!(MonsterState::Wandering.speed(&speeds), 2.0);
        assert_eq!(MonsterState::Chasing.speed(&speeds), 3.5);
        assert_eq!(MonsterState::Running.speed(&speeds), 7.0);
        assert_eq!(MonsterState::Screaming.speed(&speeds), 0.0);
        assert_eq!(MonsterState::Attacking.speed(&speeds), 0.0);
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(MonsterState::Wandering.cue(), AnimationCue::Walk);
        assert_eq!(MonsterState::Chasing.cue(), AnimationCue::Walk);
        assert_eq!(MonsterState::Running.cue(), AnimationCue::Run);
        assert_eq!(MonsterState::Attacking.cue(), AnimationCue::Attack);
        assert_eq!(MonsterState::Screaming.cue(), AnimationCue::Scream);
    }

    #[test]
    fn test_direct_sighting_clears_second_hand() {
        let mut tracking = Tracking::default();
        assert!(!tracking.is_spotted());

        tracking.adopt_report(Vec3::new(1.0, 0.0, 2.0));
        assert!(tracking.second_hand);
        assert!(!tracking.has_direct_sighting());

        let player = Entity::from_raw(7);
        tracking.see_player(player, Some(Vec3::X));
        assert!(!tracking.second_hand);
        assert_eq!(tracking.target_player, Some(player));
        assert_eq!(tracking.last_known_player_position, Some(Vec3::X));

        tracking.lose_player();
        assert!(!tracking.has_direct_sighting());
        assert_eq!(tracking.last_known_player_position, Some(Vec3::X));
    }

    #[test]
    fn test_adopt_report_idempotent() {
        let mut once = Tracking::default();
        once.adopt_report(Vec3::new(4.0, 0.0, -3.0));

        let mut twice = Tracking::default();
        twice.adopt_report(Vec3::new(4.0, 0.0, -3.0));
        twice.adopt_report(Vec3::new(4.0, 0.0, -3.0));

        assert_eq!(once, twice);
    }
}
