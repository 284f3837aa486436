use serde::Deserialize;
use config::{Config, ConfigError, Environment, Map};

use crate::error::{Error, Result};

// Constants
pub const ENV_PREFIX: &str = "GITLAB";
pub const TOKEN_VAR: &str = "GITLAB_PRODESP_TOKEN";
const DEFAULT_URL: &str = "https://gitlab.prodesp.sp.gov.br";
const DEFAULT_PROJECT_PREFIX: &str = "ssp/dipol/";
const DEFAULT_TIMEOUT: u64 = 30;

/// Process-wide settings, read once at startup.
///
/// Every field comes from a `GITLAB_*` environment variable:
/// `GITLAB_URL`, `GITLAB_PROJECT_PREFIX`, `GITLAB_TIMEOUT` and `GITLAB_PRODESP_TOKEN`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
  pub url:            String,
  pub project_prefix: String,
  pub timeout:        u64,
  #[serde(rename = "prodesp_token")]
  access_token:       Option<String>
}

impl Settings {
  /// Loads settings from the process environment.
  pub fn from_env() -> Result<Self> {
    Self::load(None)
  }

  /// Loads settings from the given variables instead of the process environment.
  pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>
  {
    let vars: Map<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    Self::load(Some(vars))
  }

  fn load(vars: Option<Map<String, String>>) -> Result<Self> {
    let config = Config::builder()
      .add_source(Environment::with_prefix(ENV_PREFIX).source(vars))
      .set_default("url", DEFAULT_URL)?
      .set_default("project_prefix", DEFAULT_PROJECT_PREFIX)?
      .set_default("timeout", DEFAULT_TIMEOUT)?
      .build()?;

    let settings: Self = config.try_deserialize()?;

    if settings.timeout == 0 {
      return Err(Error::Config(ConfigError::Message("GITLAB_TIMEOUT must be at least 1 second".to_string())));
    }

    Ok(settings)
  }

  /// The access token, or [`Error::MissingToken`] when it is unset or empty.
  pub fn access_token(&self) -> Result<&str> {
    match self.access_token.as_deref() {
      Some(token) if !token.is_empty() => Ok(token),
      _ => Err(Error::MissingToken)
    }
  }

  /// Prefix + partial path, e.g. `ssp/dipol/` + `frontend/dipol-de`.
  pub fn project_path(&self, partial_project_path: &str) -> String {
    format!("{}{}", self.project_prefix, partial_project_path)
  }
}
