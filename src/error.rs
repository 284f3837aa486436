//! Error type for the mr-diff CLI tool.
//!
//! Every fallible step returns one of these variants; only `main` turns them
//! into a diagnostic and an exit status.

use std::io;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::TOKEN_VAR;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Environment variable '{}' is not set.\nPlease set it to your GitLab personal access token.", TOKEN_VAR)]
  MissingToken,

  #[error("The value of '{}' is not a valid HTTP header value", TOKEN_VAR)]
  InvalidToken,

  #[error("Invalid configuration: {0}")]
  Config(#[from] config::ConfigError),

  #[error("Invalid GitLab URL: {0}")]
  Url(#[from] url::ParseError),

  #[error("GitLab URL cannot carry a path: {0}")]
  UrlCannotBeABase(String),

  #[error("'{0}' cannot be used as a project path or merge request IID")]
  DotSegment(String),

  #[error("Error making request to the GitLab API: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("GitLab API request failed with status {status}{}", detail(.message))]
  Api {
    status:  StatusCode,
    message: Option<String>
  },

  #[error("Failed to decode GitLab API response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("Failed to write diff output: {0}")]
  Output(#[from] io::Error)
}

fn detail(message: &Option<String>) -> String {
  message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl Error {
  /// A closed stdout (`mr-diff ... | head`) is not worth reporting.
  pub fn is_broken_pipe(&self) -> bool {
    matches!(self, Error::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
  }
}
