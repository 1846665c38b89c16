//! Learning hyperparameters

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyperparameters of the training run.
///
/// The defaults are the values the mouse has always been trained with.
/// A JSON file may override any subset of them:
///
/// ```json
/// { "learning_rate": 0.3, "episodes": 5000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hyperparameters {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Number of training episodes
    pub episodes: usize,
}

impl Hyperparameters {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.2;
    pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
    pub const DEFAULT_EPSILON: f64 = 0.1;
    pub const DEFAULT_EPISODES: usize = 20_000;

    /// Check every value lies in its admissible range
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning rate {} must be in (0, 1]", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount factor {} must be in [0, 1]", self.discount_factor),
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon {} must be in [0, 1]", self.epsilon),
            });
        }
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episode budget must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Load hyperparameters from a JSON file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let params: Self = serde_json::from_reader(BufReader::new(file))?;
        params.validate()?;
        Ok(params)
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            discount_factor: Self::DEFAULT_DISCOUNT_FACTOR,
            epsilon: Self::DEFAULT_EPSILON,
            episodes: Self::DEFAULT_EPISODES,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let params = Hyperparameters::default();
        assert_eq!(params.learning_rate, 0.2);
        assert_eq!(params.discount_factor, 0.9);
        assert_eq!(params.epsilon, 0.1);
        assert_eq!(params.episodes, 20_000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = Hyperparameters {
            epsilon: 1.5,
            ..Hyperparameters::default()
        };
        assert!(params.validate().is_err());

        let params = Hyperparameters {
            learning_rate: 0.0,
            ..Hyperparameters::default()
        };
        assert!(params.validate().is_err());

        let params = Hyperparameters {
            episodes: 0,
            ..Hyperparameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "learning_rate": 0.5, "episodes": 100 }}"#).unwrap();

        let params = Hyperparameters::load(file.path()).unwrap();
        assert_eq!(params.learning_rate, 0.5);
        assert_eq!(params.episodes, 100);
        assert_eq!(params.discount_factor, 0.9);
    }

    #[test]
    fn test_load_rejects_misspelled_key() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "epsilion": 0.3 }}"#).unwrap();

        let err = Hyperparameters::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("epsilion"));
    }
}
