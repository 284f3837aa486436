//! Renders merge request diffs as `git diff` output.

use std::io::Write;

use crate::diff::DiffRecord;
use crate::error::Result;
use crate::style::Styled;

/// Writes every record in order, each as a git header, its body and a blank line.
///
/// Nothing is written for an empty slice.
pub fn write_diffs<W: Write>(out: &mut W, diffs: &[DiffRecord]) -> Result<()> {
  for record in diffs {
    write_record(out, record)?;
  }

  out.flush()?;
  Ok(())
}

fn write_record<W: Write>(out: &mut W, record: &DiffRecord) -> Result<()> {
  writeln!(out, "diff --git a/{} b/{}", record.old_path, record.new_path)?;
  writeln!(out, "--- a/{}", record.old_path)?;
  writeln!(out, "+++ b/{}", record.new_path)?;

  for line in record.lines() {
    writeln!(out, "{}", line.styled())?;
  }

  writeln!(out)?;
  Ok(())
}
