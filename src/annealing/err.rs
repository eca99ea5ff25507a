//! Errors raised by the annealing engine.

use crate::models::NotFoundError;

/// An invalid [`AnnealingConfig`](super::AnnealingConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveInitialTemperature(f64),
    NonPositiveFinalTemperature(f64),
    FinalNotBelowInitial { initial: f64, last: f64 },
    CoolingRateOutOfRange(f64),
    ZeroSampleInterval,
    ZeroIterationCap,
    InvalidPenaltyWeight { name: &'static str, weight: f64 },
    NoMoves,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveInitialTemperature(t) => {
                write!(f, "Initial temperature must be positive, got {}", t)
            }
            ConfigError::NonPositiveFinalTemperature(t) => {
                write!(f, "Final temperature must be positive, got {}", t)
            }
            ConfigError::FinalNotBelowInitial { initial, last } => write!(
                f,
                "Final temperature {} must be below the initial temperature {}",
                last, initial
            ),
            ConfigError::CoolingRateOutOfRange(r) => {
                write!(f, "Cooling rate must be in (0, 1), got {}", r)
            }
            ConfigError::ZeroSampleInterval => write!(f, "Sample interval must be at least 1"),
            ConfigError::ZeroIterationCap => write!(f, "Iteration cap must be at least 1"),
            ConfigError::InvalidPenaltyWeight { name, weight } => write!(
                f,
                "Penalty weight '{}' must be finite and non-negative, got {}",
                name, weight
            ),
            ConfigError::NoMoves => write!(f, "At least one neighborhood move must be enabled"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A failure while running the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Config(ConfigError),
    NotFound(NotFoundError),
    NotStarted,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "Invalid configuration: {}", e),
            EngineError::NotFound(e) => write!(f, "Unknown point: {}", e),
            EngineError::NotStarted => write!(f, "The search has not been started"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(e) => Some(e),
            EngineError::NotFound(e) => Some(e),
            EngineError::NotStarted => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<NotFoundError> for EngineError {
    fn from(e: NotFoundError) -> Self {
        EngineError::NotFound(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let e = ConfigError::CoolingRateOutOfRange(1.5);
        assert_eq!(e.to_string(), "Cooling rate must be in (0, 1), got 1.5");
    }

    #[test]
    fn test_engine_error_from_and_source() {
        let e: EngineError = NotFoundError::new(9).into();
        assert_eq!(e, EngineError::NotFound(NotFoundError::new(9)));
        assert!(e.source().is_some());
        assert!(e.to_string().contains("Point 9"));

        let e: EngineError = ConfigError::NoMoves.into();
        assert!(matches!(e, EngineError::Config(ConfigError::NoMoves)));
        assert!(EngineError::NotStarted.source().is_none());
    }
}
