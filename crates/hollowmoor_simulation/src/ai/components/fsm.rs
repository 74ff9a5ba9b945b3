//! FSM AI components (state machine, tracking, cues).

use bevy::prelude::*;

use crate::config::SpeedTable;

/// Monster FSM состояния (ровно одно активно)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component)]
pub enum MonsterState {
    /// Бродит к случайным точкам в пределах world bounds
    #[default]
    Wandering,

    /// Преследует игрока (direct или по gossip)
    Chasing,

    /// Бежит за игроком на повышенной скорости
    Running,

    /// Кричит (speed 0), по таймеру → Running. Только Stalker.
    Screaming,

    /// Атака: заморожен до resolve capture
    Attacking,
}

impl MonsterState {
    pub const ALL: [MonsterState; 5] = [
        MonsterState::Wandering,
        MonsterState::Chasing,
        MonsterState::Running,
        MonsterState::Screaming,
        MonsterState::Attacking,
    ];

    /// Скорость выводится из состояния, отдельно не задаётся
    pub fn speed(self, speeds: &SpeedTable) -> f32 {
        match self {
            MonsterState::Wandering => speeds.wander,
            MonsterState::Chasing => speeds.chase,
            MonsterState::Running => speeds.run,
            MonsterState::Screaming | MonsterState::Attacking => 0.0,
        }
    }

    /// Animation/audio cue для состояния
    pub fn cue(self) -> AnimationCue {
        match self {
            MonsterState::Wandering | MonsterState::Chasing => AnimationCue::Walk,
            MonsterState::Running => AnimationCue::Run,
            MonsterState::Attacking => AnimationCue::Attack,
            MonsterState::Screaming => AnimationCue::Scream,
        }
    }

    /// Преследование: каждый тик re-target к игроку
    pub fn is_pursuit(self) -> bool {
        matches!(self, MonsterState::Chasing | MonsterState::Running)
    }

    /// Замороженные состояния: ждут resumption, zone события не меняют tracking
    pub fn is_frozen(self) -> bool {
        matches!(self, MonsterState::Screaming | MonsterState::Attacking)
    }
}

/// Animation/audio cue (host выбирает clip/звук)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationCue {
    Walk,
    Run,
    Attack,
    Scream,
}

/// Component: что монстр знает об игроке
///
/// Обновляется zone событиями (direct) и gossip (second-hand).
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Tracking {
    /// Игрок, замеченный лично. Despawned entity = потерян.
    ///
    /// Есть в Chasing/Running/Attacking, а также в Screaming: крик замораживает
    /// tracking, и Running после крика продолжает за тем же игроком.
    /// Сбрасывается при входе в Wandering.
    pub target_player: Option<Entity>,
    /// Последняя известная позиция (своя или от peer'а)
    pub last_known_player_position: Option<Vec3>,
    /// Позиция получена по gossip, лично не видел
    pub second_hand: bool,
}

impl Tracking {
    /// Лично заметил игрока
    pub fn see_player(&mut self, player: Entity, position: Option<Vec3>) {
        self.target_player = Some(player);
        if position.is_some() {
            self.last_known_player_position = position;
        }
        self.second_hand = false;
    }

    /// Потерял игрока из виду (last known позиция остаётся)
    pub fn lose_player(&mut self) {
        self.target_player = None;
    }

    pub fn has_direct_sighting(&self) -> bool {
        self.target_player.is_some()
    }

    /// Peer сообщил позицию. Повторное применение той же позиции ничего не меняет.
    pub fn adopt_report(&mut self, position: Vec3) {
        self.last_known_player_position = Some(position);
        self.second_hand = true;
    }

    /// Знает ли куда идти (direct или second-hand)
    pub fn is_spotted(&self) -> bool {
        self.target_player.is_some() || self.second_hand
    }
}
