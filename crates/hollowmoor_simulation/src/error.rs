//! Error types для construction и загрузки конфигов.
//!
//! Tick-time сбои (navmesh не готов, stale entity, не-player актор) ошибками не
//! считаются: системы их пропускают и пробуют на следующем тике.

use thiserror::Error;

/// Нарушение preconditions при создании монстра
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// Blueprint без navigation adapter
    #[error("monster '{profile}' has no navigation adapter")]
    MissingNavigation { profile: String },

    /// Blueprint без animation rig
    #[error("monster '{profile}' has no animation rig")]
    MissingAnimationRig { profile: String },
}

/// Ошибки загрузки session/monster конфигов (RON)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Файл не прочитался
    #[error("Failed to read config '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Значения вне допустимого диапазона
    #[error("Invalid config value: {0}")]
    Invalid(String),

    /// Профиль с таким именем не найден в каталоге
    #[error("Unknown monster profile '{0}'")]
    UnknownProfile(String),
}
