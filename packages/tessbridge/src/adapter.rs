//! The recognition adapter: owns one engine session and turns host calls into
//! engine calls.
//!
//! Host-facing methods ([`RecognitionAdapter::init`],
//! [`RecognitionAdapter::recognize_file`], [`RecognitionAdapter::recognize_image`])
//! report failure only as `false` or an empty string. Each is a wrapper over a
//! `try_` method returning the cause, which is logged before being dropped.
use std::path::Path;

use tessbridge_ocr::{Bitmap, CommandEngine, OcrEngine, PageSegMode, Result};
use tracing::{debug, warn};

use crate::config::AdapterConfig;
use crate::output::OutputMode;

/// Engine variable toggling hOCR generation.
pub const HOCR_OPTION: &str = "tessedit_create_hocr";

/// Segmentation mode requested on every `init`.
pub const SEGMENTATION_MODE: PageSegMode = PageSegMode::Auto;

/// Lifecycle of the owned engine session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
  /// Engine acquired but not activated, or activation failed.
  Constructed,
  Active,
  Released,
}

pub struct RecognitionAdapter<E> {
  config: AdapterConfig,
  engine: E,
  state: AdapterState,
}

impl RecognitionAdapter<CommandEngine> {
  /// Adapter over the `tesseract` executable found on `PATH`.
  pub fn with_command_engine(config: AdapterConfig) -> Self {
    Self::new(config, CommandEngine::new())
  }
}

impl<E: OcrEngine> RecognitionAdapter<E> {
  /// Takes ownership of `engine` without activating it.
  pub fn new(config: AdapterConfig, engine: E) -> Self {
    debug!(
      "adapter created for '{}' with data at {}",
      config.language(),
      config.language_data_path()
    );
    Self {
      config,
      engine,
      state: AdapterState::Constructed,
    }
  }

  pub fn config(&self) -> &AdapterConfig {
    &self.config
  }

  pub fn state(&self) -> AdapterState {
    self.state
  }

  pub fn engine(&self) -> &E {
    &self.engine
  }

  /// Activates the engine. Returns `false` on any failure.
  pub fn init(&mut self) -> bool {
    match self.try_init() {
      Ok(()) => true,
      Err(e) => {
        warn!("OCR engine initialization failed: {}", e);
        false
      }
    }
  }

  pub fn try_init(&mut self) -> Result<()> {
    self
      .engine
      .activate(&self.config.engine_config(), SEGMENTATION_MODE)?;
    self.state = AdapterState::Active;
    debug!("OCR engine active");
    Ok(())
  }

  /// Releases the engine session.
  pub fn end(&mut self) {
    self.engine.shutdown();
    self.state = AdapterState::Released;
    debug!("OCR engine released");
  }

  /// Recognizes the image file at `path`. Any failure yields `""`.
  pub fn recognize_file(&mut self, path: impl AsRef<Path>, output: OutputMode) -> String {
    let path = path.as_ref();
    self.try_recognize_file(path, output).unwrap_or_else(|e| {
      warn!("recognition of {} failed: {}", path.display(), e);
      String::new()
    })
  }

  pub fn try_recognize_file(
    &mut self,
    path: impl AsRef<Path>,
    output: OutputMode,
  ) -> Result<String> {
    let value = if output.is_hocr() { "true" } else { "false" };
    self.engine.set_option(HOCR_OPTION, value)?;
    self.engine.recognize_file(path.as_ref(), output.is_hocr())
  }

  /// Recognizes an in-memory bitmap. Any failure yields `""`.
  pub fn recognize_image(&mut self, image: &Bitmap, output: OutputMode) -> String {
    self.try_recognize_image(image, output).unwrap_or_else(|e| {
      warn!(
        "recognition of {}x{} bitmap failed: {}",
        image.width(),
        image.height(),
        e
      );
      String::new()
    })
  }

  /// Bitmaps the engine cannot take as they are get copied into a 32-bit
  /// RGBA bitmap first. The copy never outlives this call.
  pub fn try_recognize_image(&mut self, image: &Bitmap, output: OutputMode) -> Result<String> {
    if self.engine.accepts(image.color()) {
      return self.engine.recognize_image(image, output.is_hocr());
    }

    debug!(
      "converting {:?} bitmap to RGBA8 for the engine",
      image.color()
    );
    let converted = image.to_rgba8();
    self.engine.recognize_image(&converted, output.is_hocr())
  }
}
