use serde::{Deserialize, Serialize};
use std::fmt;

/// What a recognition call should produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
  #[default]
  PlainText,
  /// HTML with positional metadata for every recognized word.
  Hocr,
}

impl OutputMode {
  pub fn is_hocr(self) -> bool {
    matches!(self, OutputMode::Hocr)
  }

  /// Extension of the file the CLI writes for this mode.
  pub fn file_extension(self) -> &'static str {
    match self {
      OutputMode::PlainText => "txt",
      OutputMode::Hocr => "html",
    }
  }
}

impl fmt::Display for OutputMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OutputMode::PlainText => f.write_str("plaintext"),
      OutputMode::Hocr => f.write_str("hocr"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hocr_flag_and_extension() {
    assert!(OutputMode::Hocr.is_hocr());
    assert!(!OutputMode::PlainText.is_hocr());
    assert_eq!(OutputMode::Hocr.file_extension(), "html");
    assert_eq!(OutputMode::default().file_extension(), "txt");
  }

  #[test]
  fn test_serde_names_match_display() {
    let json = serde_json::to_string(&OutputMode::Hocr).unwrap();
    assert_eq!(json, format!("\"{}\"", OutputMode::Hocr));
    let mode: OutputMode = serde_json::from_str("\"plaintext\"").unwrap();
    assert_eq!(mode, OutputMode::PlainText);
  }
}
