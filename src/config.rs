use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    algo::QTableAgentConfig,
    decay::{Constant, Exponential, Linear, Schedule},
    ensure_interval,
    error::ConfigError,
    exploration::EpsilonGreedy,
};

/// How epsilon changes over the episodes, starting from [`Config::epsilon`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleConfig {
    #[default]
    Constant,
    Exponential { rate: f64, end: f64 },
    Linear { rate: f64, end: f64 },
}

/// Everything a training run needs, as read from a TOML file
///
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Map file
    ///
    /// **Default**: `map.csv`
    pub map: PathBuf,
    /// Probability of taking the greedy action
    ///
    /// **Default**: `0.9`
    pub epsilon: f64,
    /// Learning rate
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// Discount factor
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
    /// Number of training episodes
    ///
    /// **Default**: `10000`
    pub episodes: u32,
    /// Step limit per episode, `0` for none
    ///
    /// **Default**: `1000000`
    pub max_steps: u64,
    /// Seed for the random number generator, drawn at random when absent
    pub seed: Option<u64>,
    /// Draw the last episode
    ///
    /// **Default**: `true`
    pub visualize: bool,
    /// Pause between drawn steps in milliseconds
    ///
    /// **Default**: `100`
    pub delay_ms: u64,
    /// **Default**: constant
    pub schedule: ScheduleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: PathBuf::from("map.csv"),
            epsilon: 0.9,
            alpha: 0.1,
            gamma: 0.9,
            episodes: 10_000,
            max_steps: 1_000_000,
            seed: None,
            visualize: true,
            delay_ms: 100,
            schedule: ScheduleConfig::Constant,
        }
    }
}

impl Config {
    /// Read a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        log::debug!("read config from {}", path.display());
        Ok(config)
    }

    /// Check that hyperparameters are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let &Self {
            epsilon,
            alpha,
            gamma,
            episodes,
            ..
        } = self;
        ensure_interval!(epsilon, 0.0, 1.0);
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        if episodes == 0 {
            return Err(ConfigError::NoEpisodes);
        }
        if let ScheduleConfig::Exponential { end, .. } | ScheduleConfig::Linear { end, .. } =
            self.schedule
        {
            ensure_interval!(end, 0.0, 1.0);
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build the epsilon schedule
    pub fn schedule(&self) -> Result<Schedule, ConfigError> {
        Ok(match self.schedule {
            ScheduleConfig::Constant => Schedule::Constant(Constant::new(self.epsilon)),
            ScheduleConfig::Exponential { rate, end } => {
                Schedule::Exponential(Exponential::new(rate, self.epsilon, end)?)
            }
            ScheduleConfig::Linear { rate, end } => {
                Schedule::Linear(Linear::new(rate, self.epsilon, end)?)
            }
        })
    }

    /// Validate and build the agent configuration
    pub fn agent_config(&self) -> Result<QTableAgentConfig, ConfigError> {
        self.validate()?;
        Ok(QTableAgentConfig {
            exploration: EpsilonGreedy::new(self.schedule()?),
            alpha: self.alpha,
            gamma: self.gamma,
            max_steps: (self.max_steps > 0).then_some(self.max_steps),
        })
    }
}
