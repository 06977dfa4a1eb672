//! Tunable parameters.
//!
//! Options are set by name, in the same spirit as engine options: names are
//! case-insensitive and spaces, dashes and underscores are interchangeable.
//! `Config::from_env` reads each option from `HAPTIC_CHESS_<NAME>`.

use std::time::Duration;

use crate::error::ConfigError;

/// Default search depth passed to the suggestion service
pub const DEFAULT_DEPTH: u32 = 13;

/// Default suggestion endpoint
pub const DEFAULT_ENDPOINT: &str = "https://stockfish.online/api/stockfish.php";

/// Prefix for environment variables read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "HAPTIC_CHESS_";

const DEFAULT_UNIT_MS: u64 = 200;
const DEFAULT_POLL_MS: u64 = 100;

/// Names accepted by [`Config::apply_option`], in normalized form
pub const OPTION_NAMES: [&str; 10] = [
    "unit",
    "dit units",
    "dah units",
    "intra gap units",
    "inter gap units",
    "depth",
    "endpoint",
    "poll interval ms",
    "await playback",
    "suggester",
];

/// Where suggested moves come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggesterKind {
    /// HTTP best-move service
    #[default]
    Online,
    /// Uniformly random legal move, no network
    Random,
}

/// Session configuration.
///
/// Pulse timings are multiples of `unit`: a dit lasts one unit, a dah three,
/// symbols within a group are one unit apart and groups three units apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base pulse duration
    pub unit: Duration,
    pub dit_units: u32,
    pub dah_units: u32,
    /// Pause between symbols of the same group
    pub intra_gap_units: u32,
    /// Pause before the first symbol of a new group
    pub inter_gap_units: u32,
    /// Search depth requested from the suggestion service
    pub depth: u32,
    /// Suggestion service URL
    pub endpoint: String,
    /// Backstop re-check interval while waiting for input
    pub poll_interval: Duration,
    /// Suspend until a pulse sequence has finished playing
    pub await_playback: bool,
    pub suggester: SuggesterKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: Duration::from_millis(DEFAULT_UNIT_MS),
            dit_units: 1,
            dah_units: 3,
            intra_gap_units: 1,
            inter_gap_units: 3,
            depth: DEFAULT_DEPTH,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            await_playback: true,
            suggester: SuggesterKind::Online,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl Config {
    #[inline]
    #[must_use]
    pub fn dit(&self) -> Duration {
        self.unit.saturating_mul(self.dit_units)
    }

    #[inline]
    #[must_use]
    pub fn dah(&self) -> Duration {
        self.unit.saturating_mul(self.dah_units)
    }

    #[inline]
    #[must_use]
    pub fn intra_gap(&self) -> Duration {
        self.unit.saturating_mul(self.intra_gap_units)
    }

    #[inline]
    #[must_use]
    pub fn inter_gap(&self) -> Duration {
        self.unit.saturating_mul(self.inter_gap_units)
    }

    /// Whether every pulse and gap fits in a `Duration`.
    fn timings_fit(&self) -> bool {
        [
            self.dit_units,
            self.dah_units,
            self.intra_gap_units,
            self.inter_gap_units,
        ]
        .iter()
        .all(|units| self.unit.checked_mul(*units).is_some())
    }

    /// Set a single option by name.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let normalized = normalize(name);
        let invalid = || ConfigError::InvalidValue {
            name: normalized.clone(),
            value: value.to_string(),
        };
        let previous = (
            self.unit,
            self.dit_units,
            self.dah_units,
            self.intra_gap_units,
            self.inter_gap_units,
        );
        match normalized.as_str() {
            "unit" => {
                let secs: f64 = parse_value(&normalized, value)?;
                if secs <= 0.0 {
                    return Err(invalid());
                }
                self.unit = Duration::try_from_secs_f64(secs).map_err(|_| invalid())?;
            }
            "dit units" => self.dit_units = parse_value(&normalized, value)?,
            "dah units" => self.dah_units = parse_value(&normalized, value)?,
            "intra gap units" => self.intra_gap_units = parse_value(&normalized, value)?,
            "inter gap units" => self.inter_gap_units = parse_value(&normalized, value)?,
            "depth" => {
                let depth: u32 = parse_value(&normalized, value)?;
                if depth == 0 {
                    return Err(invalid());
                }
                self.depth = depth;
            }
            "endpoint" => {
                let endpoint = value.trim();
                if endpoint.is_empty() {
                    return Err(invalid());
                }
                self.endpoint = endpoint.to_string();
            }
            "poll interval ms" => {
                let ms: u64 = parse_value(&normalized, value)?;
                self.poll_interval = Duration::from_millis(ms.max(1));
            }
            "await playback" => {
                self.await_playback = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" | "on" => true,
                    "false" | "0" | "no" | "off" => false,
                    _ => return Err(invalid()),
                };
            }
            "suggester" => {
                self.suggester = match value.trim().to_ascii_lowercase().as_str() {
                    "online" => SuggesterKind::Online,
                    "random" => SuggesterKind::Random,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(ConfigError::UnknownOption { name: name.to_string() }),
        }
        if !self.timings_fit() {
            (
                self.unit,
                self.dit_units,
                self.dah_units,
                self.intra_gap_units,
                self.inter_gap_units,
            ) = previous;
            return Err(invalid());
        }
        log::debug!("option '{normalized}' set to '{}'", value.trim());
        Ok(())
    }

    /// Build a configuration from defaults plus `(name, value)` pairs.
    pub fn from_options<'a, I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Config::default();
        for (name, value) in options {
            config.apply_option(name, value)?;
        }
        Ok(config)
    }

    /// Build a configuration from `HAPTIC_CHESS_*` environment variables.
    ///
    /// `HAPTIC_CHESS_POLL_INTERVAL_MS=50` sets option "poll interval ms".
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Config::default();
        for (key, value) in vars {
            if let Some(name) = key.strip_prefix(ENV_PREFIX) {
                config.apply_option(name, &value)?;
            }
        }
        Ok(config)
    }
}
