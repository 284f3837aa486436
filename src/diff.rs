//! Merge request diff records as returned by the GitLab API.

use serde::Deserialize;

use crate::error::Result;

/// One changed file of a merge request.
///
/// `old_path` is empty for added files and `new_path` for deleted ones.
/// Other fields GitLab sends along (`a_mode`, `new_file`, ...) are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DiffRecord {
  pub old_path: String,
  pub new_path: String,
  pub diff:     String
}

impl DiffRecord {
  pub fn new(old_path: impl Into<String>, new_path: impl Into<String>, diff: impl Into<String>) -> Self {
    Self {
      old_path: old_path.into(),
      new_path: new_path.into(),
      diff:     diff.into()
    }
  }

  /// Body lines, split on `\n` only. A trailing newline yields a final empty line.
  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.diff.split('\n')
  }
}

/// Decodes the body of `GET .../merge_requests/:iid/diffs`.
///
/// Every element must carry string `old_path`, `new_path` and `diff` fields.
pub fn parse_diffs(body: &[u8]) -> Result<Vec<DiffRecord>> {
  Ok(serde_json::from_slice(body)?)
}
