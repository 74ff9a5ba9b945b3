//! Session и monster tuning (RON).
//!
//! Формат: `data/monsters.ron`: `SessionDocument { simulation, monsters }`.
//! Без файла используются встроенные пресеты `MonsterProfile::stalker()` / `crawler()`.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ai::AnimationCue;
use crate::error::ConfigError;

/// Какой монстр: два варианта с одной формой FSM
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MonsterVariant {
    /// Variant A: кричит при входе в run zone
    Stalker,
    /// Variant B: сразу бежит
    Crawler,
}

impl MonsterVariant {
    /// Встроенный профиль варианта
    pub fn profile(self) -> MonsterProfile {
        match self {
            MonsterVariant::Stalker => MonsterProfile::stalker(),
            MonsterVariant::Crawler => MonsterProfile::crawler(),
        }
    }
}

/// Реакция на вход игрока в run zone
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RunResponse {
    /// Screaming (speed 0) → Running по таймеру
    Scream,
    /// Сразу Running
    Run,
}

/// Реакция на peer sighting (gossip)
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GossipResponse {
    /// Wandering → Chasing к сообщённой позиции
    EnterChase,
    /// Только navigation target + spotted флаг, state не меняется
    AdoptTarget,
}

/// Скорости по состояниям (м/с). Screaming/Attacking всегда 0.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SpeedTable {
    pub wander: f32,
    pub chase: f32,
    pub run: f32,
}

/// Имена animation clips на каждый cue (host проигрывает по имени)
#[derive(Deserialize, Debug, Clone, PartialEq, Reflect)]
pub struct ClipNames {
    pub walk: String,
    pub run: String,
    pub attack: String,
    pub scream: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            walk: "Walk".to_string(),
            run: "Run".to_string(),
            attack: "Attack".to_string(),
            scream: "Scream".to_string(),
        }
    }
}

impl ClipNames {
    pub fn clip_for(&self, cue: AnimationCue) -> &str {
        match cue {
            AnimationCue::Walk => &self.walk,
            AnimationCue::Run => &self.run,
            AnimationCue::Attack => &self.attack,
            AnimationCue::Scream => &self.scream,
        }
    }
}

/// Tuning одного монстра (component на agent'е)
#[derive(Component, Deserialize, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MonsterProfile {
    pub name: String,
    pub variant: MonsterVariant,
    pub speeds: SpeedTable,
    pub run_response: RunResponse,
    /// Длительность Screaming (секунды)
    pub scream_secs: f32,
    /// Задержка от входа в attack zone до capture (секунды)
    pub attack_windup_secs: f32,
    pub gossip_response: GossipResponse,
    #[serde(default)]
    pub clips: ClipNames,
}

impl MonsterProfile {
    pub fn stalker() -> Self {
        Self {
            name: "stalker".to_string(),
            variant: MonsterVariant::Stalker,
            speeds: SpeedTable {
                wander: 2.0,
                chase: 3.5,
                run: 7.0,
            },
            run_response: RunResponse::Scream,
            scream_secs: 5.0,
            attack_windup_secs: 2.0,
            gossip_response: GossipResponse::EnterChase,
            clips: ClipNames::default(),
        }
    }

    pub fn crawler() -> Self {
        Self {
            name: "crawler".to_string(),
            variant: MonsterVariant::Crawler,
            speeds: SpeedTable {
                wander: 1.5,
                chase: 4.0,
                run: 6.0,
            },
            run_response: RunResponse::Run,
            scream_secs: 0.0,
            attack_windup_secs: 1.0,
            gossip_response: GossipResponse::AdoptTarget,
            clips: ClipNames {
                walk: "Crawl".to_string(),
                run: "Scuttle".to_string(),
                attack: "Grab".to_string(),
                scream: "Hiss".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [self.speeds.wander, self.speeds.chase, self.speeds.run];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "monster '{}' has a negative or non-finite speed",
                self.name
            )));
        }
        if self.scream_secs < 0.0 || self.attack_windup_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "monster '{}' has a negative timer duration",
                self.name
            )));
        }
        if self.run_response == RunResponse::Scream && self.scream_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "monster '{}' screams but scream_secs is not positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// Прямоугольник (XZ) в котором Wandering выбирает случайные точки
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub floor_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -60.0,
            max_x: 60.0,
            min_z: -60.0,
            max_z: 60.0,
            floor_y: 0.0,
        }
    }
}

impl WorldBounds {
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.z >= self.min_z && point.z <= self.max_z
    }
}

/// Параметры сессии (tick rate, seed, bounds)
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Частота MonsterTick (Hz)
    pub tick_hz: f64,
    pub seed: u64,
    #[serde(default)]
    pub wander_bounds: WorldBounds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            wander_bounds: WorldBounds::default(),
        }
    }
}

impl SimulationConfig {
    /// Длина одного тика (секунды)
    pub fn tick_secs(&self) -> f32 {
        (1.0 / self.tick_hz) as f32
    }

    /// Секунды → тики (`round(secs * tick_hz)`)
    pub fn secs_to_ticks(&self, secs: f32) -> u64 {
        (secs as f64 * self.tick_hz).round().max(0.0) as u64
    }

    /// tick_hz > 0 и конечен, bounds конечны и min <= max
    ///
    /// Вызывается loader'ом и `SimulationPlugin` (конфиг мог быть вставлен руками).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(ConfigError::Invalid(format!("tick_hz must be positive, got {}", self.tick_hz)));
        }
        let bounds = &self.wander_bounds;
        let edges = [bounds.min_x, bounds.max_x, bounds.min_z, bounds.max_z, bounds.floor_y];
        if edges.iter().any(|edge| !edge.is_finite()) {
            return Err(ConfigError::Invalid(format!("wander_bounds must be finite, got {:?}", bounds)));
        }
        if bounds.min_x > bounds.max_x || bounds.min_z > bounds.max_z {
            return Err(ConfigError::Invalid("wander_bounds min exceeds max".to_string()));
        }
        Ok(())
    }
}

/// Корневой RON документ
#[derive(Deserialize, Debug, Clone)]
pub struct SessionDocument {
    pub simulation: SimulationConfig,
    pub monsters: Vec<MonsterProfile>,
}

impl SessionDocument {
    pub fn from_ron_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let document: SessionDocument = ron::from_str(source).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;

        document.simulation.validate()?;
        for profile in &document.monsters {
            profile.validate()?;
        }
        Ok(document)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let document = Self::from_ron_str(&source, &path.display().to_string())?;
        crate::log_info(&format!(
            "Loaded session config {:?}: {} monster profiles",
            path,
            document.monsters.len()
        ));
        Ok(document)
    }

    /// Разбить на (config resource, catalog resource)
    pub fn into_resources(self) -> (SimulationConfig, MonsterCatalog) {
        let mut catalog = MonsterCatalog::default();
        for profile in self.monsters {
            catalog.profiles.insert(profile.name.clone(), profile);
        }
        (self.simulation, catalog)
    }
}

/// Resource: профили монстров по имени
#[derive(Resource, Debug, Clone)]
pub struct MonsterCatalog {
    pub profiles: HashMap<String, MonsterProfile>,
}

impl Default for MonsterCatalog {
    fn default() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }
}

impl MonsterCatalog {
    /// Каталог из встроенных пресетов
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for profile in [MonsterProfile::stalker(), MonsterProfile::crawler()] {
            catalog.profiles.insert(profile.name.clone(), profile);
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Result<&MonsterProfile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = include_str!("../data/monsters.ron");

    #[test]
    fn test_bundled_document_matches_presets() {
        let document = SessionDocument::from_ron_str(BUNDLED, "data/monsters.ron").expect("bundled config parses");
        assert_eq!(document.simulation.tick_hz, 60.0);
        assert_eq!(document.monsters.len(), 2);

        let (_, catalog) = document.into_resources();
        assert_eq!(catalog.get("stalker").unwrap(), &MonsterProfile::stalker());
        assert_eq!(catalog.get("crawler").unwrap(), &MonsterProfile::crawler());
    }

    #[test]
    fn test_secs_to_ticks_rounds() {
        let config = SimulationConfig::default();
        assert_eq!(config.secs_to_ticks(5.0), 300);
        assert_eq!(config.secs_to_ticks(1.0), 60);
        assert_eq!(config.secs_to_ticks(0.0), 0);

        let coarse = SimulationConfig { tick_hz: 10.0, ..default() };
        assert_eq!(coarse.secs_to_ticks(0.26), 3);
    }

    #[test]
    fn test_invalid_tick_rate_rejected() {
        let source = r#"(simulation: (tick_hz: 0.0, seed: 1), monsters: [])"#;
        let result = SessionDocument::from_ron_str(source, "inline");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let source = r#"(
            simulation: (
                tick_hz: 60.0,
                seed: 1,
                wander_bounds: (min_x: NaN, max_x: 10.0, min_z: -10.0, max_z: 10.0, floor_y: 0.0),
            ),
            monsters: [],
        )"#;
        let result = SessionDocument::from_ron_str(source, "inline");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = SimulationConfig::default();
        config.wander_bounds.max_z = f32::INFINITY;
        assert!(config.validate().is_err());
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_error_reports_origin() {
        let result = SessionDocument::from_ron_str("(simulation: ", "broken.ron");
        match result {
            Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, "broken.ron"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_screamer_without_duration_rejected() {
        let mut profile = MonsterProfile::stalker();
        profile.scream_secs = 0.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_unknown_profile() {
        let catalog = MonsterCatalog::builtin();
        assert!(matches!(catalog.get("wendigo"), Err(ConfigError::UnknownProfile(_))));
    }
}
