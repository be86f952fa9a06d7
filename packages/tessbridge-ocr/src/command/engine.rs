use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use tracing::debug;

use crate::bitmap::Bitmap;
use crate::engine::{EngineConfig, OcrEngine, OcrError, PageSegMode, Result};

use super::process::{self, ImageSource, Invocation};

pub const DEFAULT_PROGRAM: &str = "tesseract";

struct Session {
    data_path: String,
    language: String,
    mode: PageSegMode,
}

/// Runs the `tesseract` executable once per recognition.
pub struct CommandEngine {
    program: OsString,
    options: BTreeMap<String, String>,
    session: Option<Session>,
}

impl CommandEngine {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Uses `program` instead of the `tesseract` found on `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            options: BTreeMap::new(),
            session: None,
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(OcrError::NotActive)
    }

    fn invoke(
        &self,
        source: ImageSource<'_>,
        hocr: bool,
        dpi: Option<i32>,
        input: Option<&[u8]>,
    ) -> Result<String> {
        let session = self.session()?;
        let args = Invocation {
            source,
            data_path: &session.data_path,
            language: &session.language,
            mode: session.mode,
            options: &self.options,
            hocr,
            dpi,
        }
        .args();
        process::run(&self.program, &args, input)
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for CommandEngine {
    fn activate(&mut self, config: &EngineConfig<'_>, mode: PageSegMode) -> Result<()> {
        let dir = Path::new(config.data_path);
        if !dir.is_dir() {
            return Err(OcrError::EngineInitFailed(format!(
                "language data directory {} does not exist",
                dir.display()
            )));
        }

        let mut languages = 0;
        for lang in config.languages() {
            let data = dir.join(format!("{lang}.traineddata"));
            if !data.is_file() {
                return Err(OcrError::EngineInitFailed(format!(
                    "no language data for '{}' at {}",
                    lang,
                    data.display()
                )));
            }
            languages += 1;
        }
        if languages == 0 {
            return Err(OcrError::EngineInitFailed("no language given".into()));
        }

        process::probe(&self.program).map_err(|e| OcrError::EngineInitFailed(e.to_string()))?;

        debug!(
            "activated {} with {} from {}",
            self.program.to_string_lossy(),
            config.language,
            config.data_path
        );
        self.session = Some(Session {
            data_path: config.data_path.to_string(),
            language: config.language.to_string(),
            mode,
        });
        Ok(())
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(OcrError::InvalidInput(format!("bad variable name '{key}'")));
        }
        self.options.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn recognize_file(&mut self, path: &Path, hocr: bool) -> Result<String> {
        self.session()?;
        if !path.is_file() {
            return Err(OcrError::InvalidInput(format!(
                "{} is not a readable file",
                path.display()
            )));
        }
        self.invoke(ImageSource::File(path), hocr, None, None)
    }

    fn recognize_image(&mut self, image: &Bitmap, hocr: bool) -> Result<String> {
        self.session()?;
        let png = image.encode_png()?;
        let dpi = image.resolution().and_then(|r| r.ppi());
        self.invoke(ImageSource::Stdin, hocr, dpi, Some(&png))
    }

    fn shutdown(&mut self) {
        self.session = None;
        self.options.clear();
    }
}
