mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, Format};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tessbridge::{AdapterConfig, Bitmap, CommandEngine, OutputMode, RecognitionAdapter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// JSON shape printed by `recognize --format json`.
#[derive(Serialize)]
struct Recognition<'a> {
  image: String,
  mode: OutputMode,
  language: &'a str,
  text: &'a str,
}

fn main() {
  let args = Args::parse();
  init_tracing(args.verbose);

  if let Err(e) = run(args.command) {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Version => {
      println!("tessbridge {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Recognize {
      image,
      output_base,
      lang,
      tessdata_dir,
      hocr,
      format,
      tesseract,
      in_memory,
    } => {
      let data_path = tessdata_dir
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default();
      let config = AdapterConfig::new(data_path, &lang);
      let output = if hocr {
        OutputMode::Hocr
      } else {
        OutputMode::PlainText
      };

      let mut adapter = RecognitionAdapter::new(config, CommandEngine::with_program(tesseract));
      adapter.try_init().with_context(|| {
        format!(
          "failed to initialize tesseract for '{}' with data from {}",
          adapter.config().language(),
          adapter.config().language_data_path()
        )
      })?;

      let result = if in_memory {
        Bitmap::open(&image).and_then(|bitmap| adapter.try_recognize_image(&bitmap, output))
      } else {
        adapter.try_recognize_file(&image, output)
      };
      adapter.end();
      let text = result.with_context(|| format!("failed to recognize {}", image.display()))?;

      let rendered = match format {
        Format::Text => text,
        Format::Json => {
          let record = Recognition {
            image: image.display().to_string(),
            mode: output,
            language: adapter.config().language(),
            text: &text,
          };
          let mut json = serde_json::to_string_pretty(&record)?;
          json.push('\n');
          json
        }
      };

      match output_base {
        Some(base) => {
          let extension = match format {
            Format::Text => output.file_extension(),
            Format::Json => "json",
          };
          let path = append_extension(&base, extension);
          std::fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
          debug!("wrote {}", path.display());
        }
        None => print!("{}", rendered),
      }
      Ok(())
    }
  }
}

/// `out` + `txt` is `out.txt`, and `scan.v2` + `txt` is `scan.v2.txt`.
fn append_extension(base: &Path, extension: &str) -> PathBuf {
  let mut path = OsString::from(base.as_os_str());
  path.push(".");
  path.push(extension);
  PathBuf::from(path)
}
