use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::profile::ScoreOptions;
use crate::results::{ResultPolicy, SubmissionLimits};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub results: ResultsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = ScoringConfig {
            scale_min: parse_var("SCORING_SCALE_MIN", 1.0)?,
            scale_max: parse_var("SCORING_SCALE_MAX", 5.0)?,
            ignore_invalid: parse_flag("SCORING_IGNORE_INVALID", false)?,
            min_answers: parse_var("SUBMISSION_MIN_ANSWERS", 10)?,
            max_answers: parse_var("SUBMISSION_MAX_ANSWERS", 400)?,
            item_catalog_path: env::var("ITEM_CATALOG_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };
        scoring.validate()?;

        let ttl_days: u64 = parse_var("RESULT_TTL_DAYS", 30)?;
        if ttl_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RESULT_TTL_DAYS",
                reason: "must be at least one day",
            });
        }
        let ttl_secs = ttl_days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(ConfigError::InvalidValue {
                key: "RESULT_TTL_DAYS",
                reason: "is too large",
            })?;
        let rate_limit_max: u32 = parse_var("RATE_LIMIT_MAX", 5)?;
        if rate_limit_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RATE_LIMIT_MAX",
                reason: "must allow at least one request",
            });
        }
        let rate_limit_window: u64 = parse_var("RATE_LIMIT_WINDOW_SECS", 3600)?;
        if rate_limit_window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RATE_LIMIT_WINDOW_SECS",
                reason: "must be at least one second",
            });
        }

        let results = ResultsConfig {
            ttl: Duration::from_secs(ttl_secs),
            rate_limit: RateLimitConfig {
                max_requests: rate_limit_max,
                window: Duration::from_secs(rate_limit_window),
            },
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                public_base_url,
            },
            telemetry: TelemetryConfig { log_level },
            scoring,
            results,
        })
    }

    /// Scoring and retention policy handed to the result service.
    pub fn result_policy(&self) -> ResultPolicy {
        ResultPolicy {
            score_options: self.scoring.score_options(),
            limits: SubmissionLimits {
                min_answers: self.scoring.min_answers,
                max_answers: self.scoring.max_answers,
            },
            ttl: self.results.ttl,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            ConfigError::InvalidValue {
                key,
                reason: "could not be parsed",
            }
        }),
        _ => Ok(default),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key,
                reason: "expected a boolean",
            }),
        },
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin used when building badge and profile links.
    pub public_base_url: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Answer scale, submission bounds, and item catalog source.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub scale_min: f64,
    pub scale_max: f64,
    pub ignore_invalid: bool,
    pub min_answers: usize,
    pub max_answers: usize,
    /// Replaces the bundled catalog when set.
    pub item_catalog_path: Option<PathBuf>,
}

impl ScoringConfig {
    pub fn score_options(&self) -> ScoreOptions {
        ScoreOptions {
            scale_min: self.scale_min,
            scale_max: self.scale_max,
            ignore_invalid: self.ignore_invalid,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.score_options()
            .validate()
            .map_err(|_| ConfigError::InvalidScale {
                min: self.scale_min,
                max: self.scale_max,
            })?;
        if self.min_answers > self.max_answers {
            return Err(ConfigError::InvalidValue {
                key: "SUBMISSION_MIN_ANSWERS",
                reason: "must not exceed SUBMISSION_MAX_ANSWERS",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ResultsConfig {
    pub ttl: Duration,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue {
        key: &'static str,
        reason: &'static str,
    },
    InvalidScale { min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, reason } => write!(f, "{key} {reason}"),
            ConfigError::InvalidScale { min, max } => write!(
                f,
                "SCORING_SCALE_MIN ({min}) must be finite and below SCORING_SCALE_MAX ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidValue { .. }
            | ConfigError::InvalidScale { .. } => None,
        }
    }
}
