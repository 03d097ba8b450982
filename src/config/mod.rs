//! Layered application settings and the gateway's credential gate

mod app_config;
mod gateway_config;

use std::io::ErrorKind;
use std::path::Path;

pub use app_config::{AppConfig, GatewaySettings, LogFormat, LoggingConfig, OpenAiSettings};
pub use gateway_config::{
    API_KEY_PREFIX, API_KEY_VAR, ApiKey, ConfigValidationError, DEBUG_VAR, GatewayConfig,
};

/// Local override file read at startup
pub const DEFAULT_ENV_FILE: &str = "secrets.env";

/// What applying an override file did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFileReport {
    pub found: bool,
    /// Lines that did not parse, as written
    pub skipped_lines: Vec<String>,
}

/// Apply `KEY=VALUE` lines from an override file to the process environment.
///
/// Variables already set by the surrounding environment win, and lines that do
/// not parse are skipped and reported.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<EnvFileReport, dotenvy::Error> {
    let entries = match dotenvy::from_filename_iter(path.as_ref()) {
        Ok(entries) => entries,
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            return Ok(EnvFileReport::default());
        }
        Err(e) => return Err(e),
    };

    let mut report = EnvFileReport {
        found: true,
        skipped_lines: Vec::new(),
    };

    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_none() {
                    // SAFETY: runs during startup, before anything else reads the environment
                    unsafe { std::env::set_var(&key, value) };
                }
            }
            Err(dotenvy::Error::LineParse(line, _)) => report.skipped_lines.push(line),
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
