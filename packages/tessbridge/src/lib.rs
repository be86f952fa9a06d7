//! # tessbridge
//!
//! A small adapter that lets a desktop application use the Tesseract OCR
//! engine without knowing anything about it beyond two strings and an output
//! mode.
//!
//! ## Features
//!
//! - **Configuration**: language data directory (defaulting to `tessdata/`
//!   next to the executable) and language code, normalized once at construction
//! - **Lifecycle**: `init` / `end` around a single engine session
//! - **Recognition**: from an image file or an in-memory [`Bitmap`], as plain
//!   text or hOCR markup
//! - **Pluggable engines**: anything implementing [`OcrEngine`]; the
//!   `tesseract` executable is used by default
//!
//! ## Quick Start
//!
//! ```ignore
//! use tessbridge::prelude::*;
//!
//! let mut adapter = RecognitionAdapter::with_command_engine(AdapterConfig::new("", "eng"));
//! if adapter.init() {
//!     let text = adapter.recognize_file("scan.png", OutputMode::PlainText);
//!     let hocr = adapter.recognize_file("scan.png", OutputMode::Hocr);
//!     adapter.end();
//! }
//! ```
//!
//! Failures surface as `false` from `init` and an empty string from the
//! recognition calls. The `try_` variants return the underlying
//! [`OcrError`] instead.

pub mod adapter;
pub mod config;
pub mod output;

pub use adapter::{AdapterState, RecognitionAdapter, HOCR_OPTION, SEGMENTATION_MODE};
pub use config::{normalize_dir, startup_dir, AdapterConfig, DATA_DIR_NAME, DEFAULT_LANGUAGE};
pub use output::OutputMode;
pub use tessbridge_ocr::{
  Bitmap, CommandEngine, EngineConfig, OcrEngine, OcrError, PageSegMode, Resolution, WeakBitmap,
  DEFAULT_PROGRAM,
};

#[cfg(feature = "tesseract")]
pub use tessbridge_ocr::TessApiEngine;

pub use tessbridge_ocr::image;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use tessbridge::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    AdapterConfig, AdapterState, Bitmap, CommandEngine, OcrEngine, OcrError, OutputMode,
    RecognitionAdapter, Resolution,
  };
}
