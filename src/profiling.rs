use std::time::{Duration, Instant};

use colored::Colorize;

/// Reports how long a scope took, on stderr, when debug logging is enabled.
pub struct Profile {
  start: Instant,
  name:  String
}

impl Profile {
  pub fn new(name: impl Into<String>) -> Self {
    Self { start: Instant::now(), name: name.into() }
  }

  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }
}

impl Drop for Profile {
  fn drop(&mut self) {
    if log::log_enabled!(log::Level::Debug) {
      log::debug!("{} took {:.2?}", self.name.blue(), self.elapsed());
    }
  }
}
