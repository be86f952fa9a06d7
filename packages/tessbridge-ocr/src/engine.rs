use std::fmt;
use std::path::Path;

use image::ColorType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitmap::Bitmap;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to initialize OCR engine: {0}")]
    EngineInitFailed(String),
    #[error("engine is not active")]
    NotActive,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("engine error: {0}")]
    EngineError(String),
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;

/// Page segmentation modes, numbered as the engine numbers them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSegMode {
    /// Orientation and script detection only.
    OsdOnly = 0,
    /// Automatic page segmentation with orientation and script detection.
    AutoOsd = 1,
    /// Automatic page segmentation, but no OSD or OCR.
    AutoOnly = 2,
    /// Fully automatic page segmentation, but no OSD.
    #[default]
    Auto = 3,
    SingleColumn = 4,
    SingleBlockVertText = 5,
    SingleBlock = 6,
    SingleLine = 7,
    SingleWord = 8,
    CircleWord = 9,
    SingleChar = 10,
}

impl PageSegMode {
    pub fn from_i32(value: i32) -> Option<Self> {
        use PageSegMode::*;
        let mode = match value {
            0 => OsdOnly,
            1 => AutoOsd,
            2 => AutoOnly,
            3 => Auto,
            4 => SingleColumn,
            5 => SingleBlockVertText,
            6 => SingleBlock,
            7 => SingleLine,
            8 => SingleWord,
            9 => CircleWord,
            10 => SingleChar,
            _ => return None,
        };
        Some(mode)
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for PageSegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Borrowed activation parameters handed to [`OcrEngine::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig<'a> {
    /// Directory holding `<lang>.traineddata`, ending with a separator.
    pub data_path: &'a str,
    /// Language identifier, possibly `+`-joined (`eng+deu`).
    pub language: &'a str,
}

impl EngineConfig<'_> {
    /// Individual language codes of a `+`-joined identifier.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.language.split('+').filter(|l| !l.is_empty())
    }
}

/// The handful of calls an OCR backend has to answer.
///
/// All methods take `&mut self`: a backend is a single-owner session and is
/// never shared between threads by the adapter.
pub trait OcrEngine {
    /// Loads language data and makes the session usable.
    fn activate(&mut self, config: &EngineConfig<'_>, mode: PageSegMode) -> Result<()>;

    /// Sets an engine variable such as `tessedit_create_hocr`.
    fn set_option(&mut self, key: &str, value: &str) -> Result<()>;

    fn recognize_file(&mut self, path: &Path, hocr: bool) -> Result<String>;

    fn recognize_image(&mut self, image: &Bitmap, hocr: bool) -> Result<String>;

    /// Releases the session. Further use is up to the backend.
    fn shutdown(&mut self);

    /// Whether `color` can be handed to [`OcrEngine::recognize_image`] as is.
    fn accepts(&self, color: ColorType) -> bool {
        matches!(color, ColorType::L8 | ColorType::Rgb8 | ColorType::Rgba8)
    }
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn activate(&mut self, config: &EngineConfig<'_>, mode: PageSegMode) -> Result<()> {
        (**self).activate(config, mode)
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_option(key, value)
    }

    fn recognize_file(&mut self, path: &Path, hocr: bool) -> Result<String> {
        (**self).recognize_file(path, hocr)
    }

    fn recognize_image(&mut self, image: &Bitmap, hocr: bool) -> Result<String> {
        (**self).recognize_image(image, hocr)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }

    fn accepts(&self, color: ColorType) -> bool {
        (**self).accepts(color)
    }
}
