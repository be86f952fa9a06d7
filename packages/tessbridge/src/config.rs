//! Adapter configuration: where the language data lives and which language
//! to load.
use serde::{Deserialize, Serialize};
use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR};
use tessbridge_ocr::EngineConfig;

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Directory name searched next to the executable when no path is given.
pub const DATA_DIR_NAME: &str = "tessdata";

/// Directory the application was started from: the one holding the running
/// executable, or the working directory if that cannot be resolved.
pub fn startup_dir() -> PathBuf {
  std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(Path::to_path_buf))
    .or_else(|| std::env::current_dir().ok())
    .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `path` ending in exactly one separator.
pub fn normalize_dir(path: &str) -> String {
  let trimmed = path.trim_end_matches(is_separator);
  let mut dir = String::with_capacity(trimmed.len() + 1);
  dir.push_str(trimmed);
  dir.push(MAIN_SEPARATOR);
  dir
}

/// Immutable language settings handed to the engine on `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAdapterConfig")]
pub struct AdapterConfig {
  language_data_path: String,
  language: String,
}

/// Unvalidated form, so deserialized configs go through [`AdapterConfig::new`].
#[derive(Deserialize)]
struct RawAdapterConfig {
  #[serde(default)]
  language_data_path: String,
  #[serde(default)]
  language: String,
}

impl From<RawAdapterConfig> for AdapterConfig {
  fn from(raw: RawAdapterConfig) -> Self {
    Self::new(raw.language_data_path, raw.language)
  }
}

impl AdapterConfig {
  /// An empty `language_data_path` means `<startup dir>/tessdata/`; an empty
  /// `language` means English.
  pub fn new(language_data_path: impl AsRef<str>, language: impl AsRef<str>) -> Self {
    let language_data_path = match language_data_path.as_ref() {
      "" => startup_dir().join(DATA_DIR_NAME).to_string_lossy().into_owned(),
      path => path.to_string(),
    };
    let language = match language.as_ref().trim() {
      "" => DEFAULT_LANGUAGE.to_string(),
      lang => lang.to_string(),
    };

    Self {
      language_data_path: normalize_dir(&language_data_path),
      language,
    }
  }

  pub fn language_data_path(&self) -> &str {
    &self.language_data_path
  }

  pub fn language(&self) -> &str {
    &self.language
  }

  pub fn engine_config(&self) -> EngineConfig<'_> {
    EngineConfig {
      data_path: &self.language_data_path,
      language: &self.language,
    }
  }
}

impl Default for AdapterConfig {
  fn default() -> Self {
    Self::new("", "")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sep() -> String {
    MAIN_SEPARATOR.to_string()
  }

  #[test]
  fn test_empty_path_uses_startup_tessdata() {
    let config = AdapterConfig::new("", "eng");
    let expected = format!("{}{}", startup_dir().join("tessdata").display(), sep());
    assert_eq!(config.language_data_path(), expected);
    assert!(!config.language_data_path().ends_with(&format!("{}{}", sep(), sep())));
  }

  #[test]
  fn test_missing_separator_is_appended() {
    let config = AdapterConfig::new("data", "eng");
    assert_eq!(config.language_data_path(), format!("data{}", sep()));
  }

  #[test]
  fn test_existing_separator_is_kept_once() {
    let once = AdapterConfig::new(format!("data{}", sep()), "eng");
    assert_eq!(once.language_data_path(), format!("data{}", sep()));

    let twice = AdapterConfig::new(once.language_data_path(), "eng");
    assert_eq!(twice.language_data_path(), once.language_data_path());

    let many = AdapterConfig::new(format!("data{0}{0}{0}", sep()), "eng");
    assert_eq!(many.language_data_path(), format!("data{}", sep()));
  }

  #[test]
  fn test_root_directory() {
    assert_eq!(normalize_dir(&sep()), sep());
  }

  #[test]
  fn test_language_defaults_to_english() {
    assert_eq!(AdapterConfig::new("data", "").language(), "eng");
    assert_eq!(AdapterConfig::new("data", "deu+eng").language(), "deu+eng");
    assert_eq!(AdapterConfig::default().language(), DEFAULT_LANGUAGE);
  }

  #[test]
  fn test_engine_config_view() {
    let config = AdapterConfig::new("data", "fra");
    let view = config.engine_config();
    assert_eq!(view.data_path, config.language_data_path());
    assert_eq!(view.language, "fra");
  }

  #[test]
  fn test_deserialize_normalizes() {
    let config: AdapterConfig =
      serde_json::from_str(r#"{"language_data_path": "data", "language": "spa"}"#).unwrap();
    assert_eq!(config.language_data_path(), format!("data{}", sep()));
    assert_eq!(config.language(), "spa");

    let defaulted: AdapterConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(defaulted, AdapterConfig::default());
  }
}
