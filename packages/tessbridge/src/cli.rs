//! Command line arguments backing the `tessbridge` binary.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "tessbridge",
  about = "Recognize text in images with Tesseract, as plain text or hOCR",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,

  /// Log engine calls and failures
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Recognize one image
  Recognize {
    /// Image file to read
    image: PathBuf,

    /// Write `<OUTPUT_BASE>.txt` (or `.html` with --hocr) instead of printing
    output_base: Option<PathBuf>,

    /// Language code(s), `+`-joined for several
    #[arg(long, short = 'l', default_value = "eng")]
    lang: String,

    /// Directory holding `<lang>.traineddata` [default: tessdata next to the executable]
    #[arg(long, env = "TESSDATA_DIR")]
    tessdata_dir: Option<PathBuf>,

    /// Produce hOCR markup instead of plain text
    #[arg(long)]
    hocr: bool,

    /// How to print the result
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Tesseract executable to run
    #[arg(long, default_value = tessbridge::DEFAULT_PROGRAM)]
    tesseract: String,

    /// Decode the image here and hand the engine pixels instead of a path
    #[arg(long)]
    in_memory: bool,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
  Text,
  Json,
}
