//! Engine side of tessbridge: the [`OcrEngine`] capability trait and the
//! backends implementing it.
//!
//! [`CommandEngine`] drives the `tesseract` executable and is always built.
//! [`TessApiEngine`] links libtesseract and needs the `tesseract` feature.

pub mod bitmap;
pub mod command;
pub mod engine;

#[cfg(feature = "tesseract")]
pub mod linked;

pub use bitmap::{Bitmap, Resolution, WeakBitmap};
pub use command::{CommandEngine, DEFAULT_PROGRAM};
pub use engine::{EngineConfig, OcrEngine, OcrError, PageSegMode, Result};

#[cfg(feature = "tesseract")]
pub use linked::TessApiEngine;

pub use image;
