//! Backend that shells out to the `tesseract` executable.

mod engine;
mod process;

pub use engine::{CommandEngine, DEFAULT_PROGRAM};
