use std::io::Write;

pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod gitlab;
pub mod profiling;
pub mod style;

// Re-exports
pub use crate::config::Settings;
pub use crate::diff::DiffRecord;
pub use crate::error::{Error, Result};
pub use crate::gitlab::GitLab;
pub use crate::profiling::Profile;

/// Fetches the diffs of one merge request and writes them to `out` as a git diff.
///
/// The token is resolved before anything touches the network. Nothing is
/// written to `out` unless the fetch succeeds. Returns the number of files written.
pub async fn run<W: Write>(settings: &Settings, partial_project_path: &str, mr_iid: &str, out: &mut W) -> Result<usize> {
  let token = settings.access_token()?;
  let project_path = settings.project_path(partial_project_path);

  log::info!("Fetching diffs of {}!{}", project_path, mr_iid);

  let gitlab = GitLab::new(settings, token)?;
  let diffs = gitlab.merge_request_diffs(&project_path, mr_iid).await?;

  format::write_diffs(out, &diffs)?;
  Ok(diffs.len())
}
