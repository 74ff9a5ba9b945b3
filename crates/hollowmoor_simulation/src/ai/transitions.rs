//! Transition function монстра (pure, total)
//!
//! Любая пара (state, trigger) даёт определённое следующее состояние
//! (возможно то же самое). Side effects (таймеры, broadcast, navigation)
//! делают системы в `ai::systems`.
//!
//! Stalker и Crawler отличаются только `TransitionRules`.

use crate::ai::MonsterState;
use crate::config::{GossipResponse, MonsterProfile, RunResponse};
use crate::zones::ZoneEventKind;

/// Что заставляет FSM пересчитать состояние
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsmTrigger {
    /// Zone sensor (только player актёры)
    Zone(ZoneEventKind),
    /// Peer сообщил позицию игрока
    PeerSighting,
    /// Scream таймер истёк
    ScreamElapsed,
    /// Игрок потерян и путь до last known позиции пройден
    LostAndArrived,
    /// Attack wind-up истёк, но игрока больше нет
    CaptureFizzled,
}

impl FsmTrigger {
    /// Все триггеры (для проверки тотальности)
    pub fn all() -> Vec<FsmTrigger> {
        let mut triggers: Vec<FsmTrigger> = ZoneEventKind::ALL.iter().map(|k| FsmTrigger::Zone(*k)).collect();
        triggers.extend([
            FsmTrigger::PeerSighting,
            FsmTrigger::ScreamElapsed,
            FsmTrigger::LostAndArrived,
            FsmTrigger::CaptureFizzled,
        ]);
        triggers
    }
}

/// Различия вариантов, влияющие на переходы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRules {
    pub run_response: RunResponse,
    pub gossip_response: GossipResponse,
}

impl From<&MonsterProfile> for TransitionRules {
    fn from(profile: &MonsterProfile) -> Self {
        Self {
            run_response: profile.run_response,
            gossip_response: profile.gossip_response,
        }
    }
}

impl TransitionRules {
    fn on_run_enter(self) -> MonsterState {
        match self.run_response {
            RunResponse::Scream => MonsterState::Screaming,
            RunResponse::Run => MonsterState::Running,
        }
    }
}

/// Следующее состояние для (state, trigger)
pub fn next_state(rules: TransitionRules, state: MonsterState, trigger: FsmTrigger) -> MonsterState {
    use FsmTrigger::*;
    use MonsterState::*;
    use ZoneEventKind::*;

    match state {
        Wandering => match trigger {
            Zone(DetectEnter) => Chasing,
            Zone(RunEnter) => rules.on_run_enter(),
            Zone(AttackEnter) => Attacking,
            PeerSighting => match rules.gossip_response {
                GossipResponse::EnterChase => Chasing,
                GossipResponse::AdoptTarget => Wandering,
            },
            Zone(DetectExit) | Zone(RunExit) | ScreamElapsed | LostAndArrived | CaptureFizzled => Wandering,
        },

        Chasing => match trigger {
            Zone(DetectExit) => Wandering,
            Zone(RunEnter) => rules.on_run_enter(),
            Zone(AttackEnter) => Attacking,
            LostAndArrived => Wandering,
            Zone(DetectEnter) | Zone(RunExit) | PeerSighting | ScreamElapsed | CaptureFizzled => Chasing,
        },

        // Scream таймер не прерывается zone событиями
        Screaming => match trigger {
            ScreamElapsed => Running,
            _ => Screaming,
        },

        Running => match trigger {
            Zone(DetectEnter) | Zone(RunExit) => Chasing,
            Zone(AttackEnter) => Attacking,
            LostAndArrived => Wandering,
            Zone(DetectExit) | Zone(RunEnter) | PeerSighting | ScreamElapsed | CaptureFizzled => Running,
        },

        // Заморожен до resolve capture
        Attacking => match trigger {
            CaptureFizzled => Wandering,
            _ => Attacking,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stalker() -> TransitionRules {
        TransitionRules::from(&MonsterProfile::stalker())
    }

    fn crawler() -> TransitionRules {
        TransitionRules::from(&MonsterProfile::crawler())
    }

    /// Ожидаемая строка таблицы: следующее состояние на каждый trigger в порядке
    /// `FsmTrigger::all()` (DetectEnter, DetectExit, RunEnter, RunExit,
    /// AttackEnter, PeerSighting, ScreamElapsed, LostAndArrived, CaptureFizzled)
    fn expected_row(rules: TransitionRules, state: MonsterState) -> [MonsterState; 9] {
        use MonsterState::*;

        let on_run = match rules.run_response {
            RunResponse::Scream => Screaming,
            RunResponse::Run => Running,
        };
        let on_gossip = match rules.gossip_response {
            GossipResponse::EnterChase => Chasing,
            GossipResponse::AdoptTarget => Wandering,
        };

        match state {
            Wandering => [Chasing, Wandering, on_run, Wandering, Attacking, on_gossip, Wandering, Wandering, Wandering],
            Chasing => [Chasing, Wandering, on_run, Chasing, Attacking, Chasing, Chasing, Wandering, Chasing],
            Screaming => [Screaming, Screaming, Screaming, Screaming, Screaming, Screaming, Running, Screaming, Screaming],
            Running => [Chasing, Running, Running, Chasing, Attacking, Running, Running, Wandering, Running],
            Attacking => [Attacking, Attacking, Attacking, Attacking, Attacking, Attacking, Attacking, Attacking, Wandering],
        }
    }

    #[test]
    fn test_every_pair_matches_table() {
        for rules in [stalker(), crawler()] {
            for state in MonsterState::ALL {
                let expected = expected_row(rules, state);
                let triggers = FsmTrigger::all();
                assert_eq!(triggers.len(), expected.len());

                for (trigger, want) in triggers.into_iter().zip(expected) {
                    assert_eq!(
                        next_state(rules, state, trigger),
                        want,
                        "{:?} / {:?} / {:?}",
                        rules.run_response,
                        state,
                        trigger
                    );
                }
            }
        }
    }

    #[test]
    fn test_trigger_list_complete() {
        assert_eq!(FsmTrigger::all().len(), 9);
    }

    #[test]
    fn test_detect_enter_starts_chase() {
        for rules in [stalker(), crawler()] {
            assert_eq!(
                next_state(rules, MonsterState::Wandering, FsmTrigger::Zone(ZoneEventKind::DetectEnter)),
                MonsterState::Chasing
            );
        }
    }

    #[test]
    fn test_run_enter_is_variant_dependent() {
        let trigger = FsmTrigger::Zone(ZoneEventKind::RunEnter);
        assert_eq!(next_state(stalker(), MonsterState::Chasing, trigger), MonsterState::Screaming);
        assert_eq!(next_state(crawler(), MonsterState::Chasing, trigger), MonsterState::Running);
    }

    #[test]
    fn test_peer_sighting_is_variant_dependent() {
        assert_eq!(
            next_state(stalker(), MonsterState::Wandering, FsmTrigger::PeerSighting),
            MonsterState::Chasing
        );
        assert_eq!(
            next_state(crawler(), MonsterState::Wandering, FsmTrigger::PeerSighting),
            MonsterState::Wandering
        );
    }

    #[test]
    fn test_screaming_only_leaves_on_timer() {
        for trigger in FsmTrigger::all() {
            let next = next_state(stalker(), MonsterState::Screaming, trigger);
            if trigger == FsmTrigger::ScreamElapsed {
                assert_eq!(next, MonsterState::Running);
            } else {
                assert_eq!(next, MonsterState::Screaming, "trigger {:?}", trigger);
            }
        }
    }

    #[test]
    fn test_attacking_frozen_until_fizzle() {
        for trigger in FsmTrigger::all() {
            let next = next_state(crawler(), MonsterState::Attacking, trigger);
            let expected = if trigger == FsmTrigger::CaptureFizzled {
                MonsterState::Wandering
            } else {
                MonsterState::Attacking
            };
            assert_eq!(next, expected, "trigger {:?}", trigger);
        }
    }

    #[test]
    fn test_running_returns_to_chase_or_wander() {
        let rules = crawler();
        assert_eq!(
            next_state(rules, MonsterState::Running, FsmTrigger::Zone(ZoneEventKind::RunExit)),
            MonsterState::Chasing
        );
        assert_eq!(
            next_state(rules, MonsterState::Running, FsmTrigger::Zone(ZoneEventKind::DetectEnter)),
            MonsterState::Chasing
        );
        // Потерял игрока: бежит до конца пути
        assert_eq!(
            next_state(rules, MonsterState::Running, FsmTrigger::Zone(ZoneEventKind::DetectExit)),
            MonsterState::Running
        );
        assert_eq!(
            next_state(rules, MonsterState::Running, FsmTrigger::LostAndArrived),
            MonsterState::Wandering
        );
    }

    #[test]
    fn test_detect_exit_drops_chase() {
        assert_eq!(
            next_state(stalker(), MonsterState::Chasing, FsmTrigger::Zone(ZoneEventKind::DetectExit)),
            MonsterState::Wandering
        );
    }
}
