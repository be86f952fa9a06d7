//! Backend linking libtesseract through the `tesseract` crate.

use std::path::Path;

use tesseract::{PageSegMode as TessPsm, Tesseract};
use tracing::debug;

use crate::bitmap::Bitmap;
use crate::engine::{EngineConfig, OcrEngine, OcrError, PageSegMode, Result};

fn tess_psm(mode: PageSegMode) -> TessPsm {
    match mode {
        PageSegMode::OsdOnly => TessPsm::PsmOsdOnly,
        PageSegMode::AutoOsd => TessPsm::PsmAutoOsd,
        PageSegMode::AutoOnly => TessPsm::PsmAutoOnly,
        PageSegMode::Auto => TessPsm::PsmAuto,
        PageSegMode::SingleColumn => TessPsm::PsmSingleColumn,
        PageSegMode::SingleBlockVertText => TessPsm::PsmSingleBlockVertText,
        PageSegMode::SingleBlock => TessPsm::PsmSingleBlock,
        PageSegMode::SingleLine => TessPsm::PsmSingleLine,
        PageSegMode::SingleWord => TessPsm::PsmSingleWord,
        PageSegMode::CircleWord => TessPsm::PsmCircleWord,
        PageSegMode::SingleChar => TessPsm::PsmSingleChar,
    }
}

/// In-process Tesseract session.
///
/// The binding consumes its handle on every builder step, so a failed step
/// leaves the engine inactive until [`OcrEngine::activate`] runs again.
#[derive(Default)]
pub struct TessApiEngine {
    api: Option<Tesseract>,
}

impl TessApiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.api.is_some()
    }

    fn step<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(Tesseract) -> Result<Tesseract>,
    {
        let api = self.api.take().ok_or(OcrError::NotActive)?;
        match f(api) {
            Ok(api) => {
                self.api = Some(api);
                Ok(())
            }
            Err(e) => {
                debug!("tesseract handle dropped after failure: {}", e);
                Err(e)
            }
        }
    }

    fn read(&mut self, hocr: bool) -> Result<String> {
        let api = self.api.as_mut().ok_or(OcrError::NotActive)?;
        let text = if hocr {
            api.get_hocr_text(0)
                .map_err(|e| OcrError::EngineError(e.to_string()))?
        } else {
            api.get_text()
                .map_err(|e| OcrError::EngineError(e.to_string()))?
        };
        Ok(text)
    }
}

impl OcrEngine for TessApiEngine {
    fn activate(&mut self, config: &EngineConfig<'_>, mode: PageSegMode) -> Result<()> {
        let mut api = Tesseract::new(Some(config.data_path), Some(config.language))
            .map_err(|e| OcrError::EngineInitFailed(e.to_string()))?;
        api.set_page_seg_mode(tess_psm(mode));
        debug!("libtesseract session for {} ready", config.language);
        self.api = Some(api);
        Ok(())
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        self.step(|api| {
            api.set_variable(key, value)
                .map_err(|e| OcrError::InvalidInput(format!("{key}={value}: {e}")))
        })
    }

    fn recognize_file(&mut self, path: &Path, hocr: bool) -> Result<String> {
        let path = path
            .to_str()
            .ok_or_else(|| OcrError::InvalidInput("non-utf8 path".into()))?;
        self.step(|api| {
            api.set_image(path)
                .map_err(|e| OcrError::InvalidInput(format!("{path}: {e}")))
        })?;
        self.read(hocr)
    }

    fn recognize_image(&mut self, image: &Bitmap, hocr: bool) -> Result<String> {
        let png = image.encode_png()?;
        let ppi = image.resolution().and_then(|r| r.ppi());
        self.step(|api| {
            let api = api
                .set_image_from_mem(&png)
                .map_err(|e| OcrError::InvalidInput(e.to_string()))?;
            Ok(match ppi {
                Some(ppi) => api.set_source_resolution(ppi),
                None => api,
            })
        })?;
        self.read(hocr)
    }

    fn shutdown(&mut self) {
        self.api = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psm_mapping_keeps_auto() {
        assert!(matches!(tess_psm(PageSegMode::Auto), TessPsm::PsmAuto));
        assert!(matches!(tess_psm(PageSegMode::SingleLine), TessPsm::PsmSingleLine));
    }

    #[test]
    fn test_inactive_engine_rejects_work() {
        let mut engine = TessApiEngine::new();
        assert!(!engine.is_active());
        assert!(matches!(
            engine.recognize_file(Path::new("page.png"), false),
            Err(OcrError::NotActive)
        ));
        assert!(matches!(
            engine.set_option("tessedit_create_hocr", "true"),
            Err(OcrError::NotActive)
        ));
    }

    #[test]
    fn test_activate_missing_directory() {
        let mut engine = TessApiEngine::new();
        let config = EngineConfig {
            data_path: "/nonexistent/tessdata/",
            language: "eng",
        };
        assert!(engine.activate(&config, PageSegMode::Auto).is_err());
        assert!(!engine.is_active());
    }
}
