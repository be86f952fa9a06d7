use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, trace};

use crate::engine::{OcrError, PageSegMode, Result};

/// Variable that the command line expresses through the `hocr` config file.
pub(crate) const HOCR_VARIABLE: &str = "tessedit_create_hocr";

pub(crate) enum ImageSource<'a> {
    File(&'a Path),
    Stdin,
}

pub(crate) struct Invocation<'a> {
    pub source: ImageSource<'a>,
    pub data_path: &'a str,
    pub language: &'a str,
    pub mode: PageSegMode,
    pub options: &'a BTreeMap<String, String>,
    pub hocr: bool,
    pub dpi: Option<i32>,
}

impl Invocation<'_> {
    /// `<image> stdout [options...] [configfile]`, the order the executable
    /// expects: options must precede config files.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        match self.source {
            ImageSource::File(path) => args.push(path.as_os_str().to_owned()),
            ImageSource::Stdin => args.push("stdin".into()),
        }
        args.push("stdout".into());
        args.push("--tessdata-dir".into());
        args.push(self.data_path.into());
        args.push("-l".into());
        args.push(self.language.into());
        args.push("--psm".into());
        args.push(self.mode.to_string().into());
        if let Some(dpi) = self.dpi {
            args.push("--dpi".into());
            args.push(dpi.to_string().into());
        }
        for (key, value) in self.options {
            if key == HOCR_VARIABLE {
                continue;
            }
            args.push("-c".into());
            args.push(format!("{key}={value}").into());
        }
        if self.hocr {
            args.push("hocr".into());
        }
        args
    }
}

/// Runs `program` to completion, feeding `input` on stdin, and returns stdout.
pub(crate) fn run(program: &OsStr, args: &[OsString], input: Option<&[u8]>) -> Result<String> {
    let name = program.to_string_lossy();
    trace!("running {} {:?}", name, args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| OcrError::EngineError(format!("failed to start {}: {}", name, e)))?;

    // stdin is fed from its own thread so a child that writes before it has
    // read everything cannot block on a full stdout pipe.
    let output = thread::scope(|scope| {
        if let (Some(bytes), Some(mut stdin)) = (input, child.stdin.take()) {
            let name = &name;
            scope.spawn(move || {
                // A child that exits early closes the pipe; its status says why.
                if let Err(e) = stdin.write_all(bytes) {
                    debug!("writing image to {} failed: {}", name, e);
                }
            });
        }
        child.wait_with_output()
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::EngineError(format!(
            "{} exited with {}: {}",
            name,
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Checks that `program` starts and reports a version.
pub(crate) fn probe(program: &OsStr) -> Result<String> {
    let output = run(program, &[OsString::from("--version")], None)?;
    let version = output.lines().next().unwrap_or_default().trim().to_string();
    debug!("found {}", version);
    Ok(version)
}
