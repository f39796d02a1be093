//! Configuration loader
//!
//! Loads the engine configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the process environment when one exists
//! 2. Reads the file named by `GOALPULSE_CONFIG`, else searches standard paths
//! 3. Falls back to the built-in defaults when no file is found
//! 4. Applies `GOALPULSE_*` environment overrides on top
//! 5. Validates the result; an incoherent config is never returned
//!
//! ## Environment Variables
//! - `GOALPULSE_CONFIG`: Explicit config file path
//! - `GOALPULSE_COMPLETED_PROGRESS`: Progress treated as completed
//! - `GOALPULSE_AT_RISK_MIN_DEVIATION`: Lowest deviation still at risk
//! - `GOALPULSE_LOW_RISK_MIN_RATIO`: Progress/target ratio for low risk
//! - `GOALPULSE_MEDIUM_RISK_MIN_RATIO`: Progress/target ratio for medium risk
//! - `GOALPULSE_IMPACT_OUTGOING_WEIGHT`: Weight of outgoing dependency edges
//! - `GOALPULSE_IMPACT_INCOMING_WEIGHT`: Weight of incoming dependency edges
//! - `GOALPULSE_IMPACT_HIGH_BAND_MIN`: Minimum score of the high band
//! - `GOALPULSE_IMPACT_MEDIUM_BAND_MIN`: Minimum score of the medium band
//! - `GOALPULSE_REVIEW_CADENCE_DAYS`: Days from creation to the first review
//! - `GOALPULSE_REVIEW_HORIZON_DAYS`: Pending-review lookahead in days
//! - `GOALPULSE_CRITICAL_GOAL_LIMIT`: Number of critical goals reported
//! - `GOALPULSE_HIERARCHY_MAX_DEPTH`: Deepest parent chain accepted
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./goalpulse.toml` or `./goalpulse.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent directory
//! 4. The same names relative to the executable location

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use goalpulse_domain::{EngineConfig, GoalPulseError, Result};

const CONFIG_PATH_VAR: &str = "GOALPULSE_CONFIG";
const CONFIG_FILE_NAMES: [&str; 4] =
    ["goalpulse.toml", "goalpulse.json", "config.toml", "config.json"];

/// Load configuration with the layered strategy described above
///
/// # Errors
/// Returns `GoalPulseError::Config` if:
/// - `GOALPULSE_CONFIG` names a missing or unreadable file
/// - A discovered file has an invalid format
/// - An override variable does not parse
/// - The merged configuration fails validation
pub fn load() -> Result<EngineConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let mut config = match explicit.or_else(discover_config_path) {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            EngineConfig::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    tracing::info!("Engine configuration loaded");
    Ok(config)
}

/// Load configuration from environment variables only
///
/// Unset variables keep their default value.
///
/// # Errors
/// Returns `GoalPulseError::Config` if a variable has an invalid value or
/// the result fails validation.
pub fn load_from_env() -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Format is detected by
/// extension (`.toml` or `.json`); sections and keys left out of the file
/// keep their defaults.
///
/// # Errors
/// Returns `GoalPulseError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The parsed configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<EngineConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(GoalPulseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => discover_config_path().ok_or_else(|| {
            GoalPulseError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| GoalPulseError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// # Errors
/// Returns `GoalPulseError::Config` if the format is unsupported or parsing
/// fails.
fn parse_config(contents: &str, path: &Path) -> Result<EngineConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| GoalPulseError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| GoalPulseError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(GoalPulseError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn discover_config_path() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
            dirs.push(exe_dir.join(".."));
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Overlay `GOALPULSE_*` variables onto `config`
///
/// The result is not validated; callers validate once all layers are merged.
///
/// # Errors
/// Returns `GoalPulseError::Config` naming the first variable that fails to
/// parse.
pub fn apply_env_overrides(config: &mut EngineConfig) -> Result<()> {
    let classifier = &mut config.classifier;
    override_from_env("GOALPULSE_COMPLETED_PROGRESS", &mut classifier.completed_progress)?;
    override_from_env("GOALPULSE_AT_RISK_MIN_DEVIATION", &mut classifier.at_risk_min_deviation)?;
    override_from_env("GOALPULSE_LOW_RISK_MIN_RATIO", &mut classifier.low_risk_min_ratio)?;
    override_from_env("GOALPULSE_MEDIUM_RISK_MIN_RATIO", &mut classifier.medium_risk_min_ratio)?;

    let impact = &mut config.impact;
    override_from_env("GOALPULSE_IMPACT_OUTGOING_WEIGHT", &mut impact.outgoing_weight)?;
    override_from_env("GOALPULSE_IMPACT_INCOMING_WEIGHT", &mut impact.incoming_weight)?;
    override_from_env("GOALPULSE_IMPACT_HIGH_BAND_MIN", &mut impact.high_band_min)?;
    override_from_env("GOALPULSE_IMPACT_MEDIUM_BAND_MIN", &mut impact.medium_band_min)?;

    override_from_env("GOALPULSE_REVIEW_CADENCE_DAYS", &mut config.review.default_cadence_days)?;
    override_from_env("GOALPULSE_REVIEW_HORIZON_DAYS", &mut config.review.horizon_days)?;
    override_from_env("GOALPULSE_CRITICAL_GOAL_LIMIT", &mut config.rollup.critical_goal_limit)?;
    override_from_env("GOALPULSE_HIERARCHY_MAX_DEPTH", &mut config.hierarchy.max_depth)?;

    Ok(())
}

/// Replace `target` with the parsed value of `key` when the variable is set
///
/// # Errors
/// Returns `GoalPulseError::Config` if the value does not parse.
fn override_from_env<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(());
    };
    *target = raw
        .trim()
        .parse()
        .map_err(|e| GoalPulseError::Config(format!("Invalid value for {key}: {e}")))?;
    tracing::debug!(key, "Applied environment override");
    Ok(())
}
