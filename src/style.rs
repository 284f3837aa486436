use colored::{ColoredString, Colorize};

pub trait Styled {
  fn styled(&self) -> ColoredString;
}

impl Styled for str {
  /// Green for additions, red for removals, untouched otherwise.
  fn styled(&self) -> ColoredString {
    if self.starts_with('+') {
      self.green()
    } else if self.starts_with('-') {
      self.red()
    } else {
      self.normal()
    }
  }
}
