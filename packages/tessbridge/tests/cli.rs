//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("tessbridge");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("tessbridge "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("tessbridge");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("tessbridge "));
}

#[test]
fn test_version_short_flag() {
    let mut cmd = cargo_bin_cmd!("tessbridge");
    cmd.arg("-V");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("tessbridge "));
}

#[test]
fn test_recognize_without_language_data_fails() {
    let mut cmd = cargo_bin_cmd!("tessbridge");
    cmd.args([
        "recognize",
        "page.png",
        "--tessdata-dir",
        "/nonexistent/tessdata",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to initialize tesseract"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_recognize_requires_image() {
    let mut cmd = cargo_bin_cmd!("tessbridge");
    cmd.arg("recognize");

    cmd.assert().failure();
}

/// Runs the binary against a stand-in `tesseract` that echoes its arguments.
#[cfg(unix)]
mod with_fake_engine {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tessbridge::image::{DynamicImage, GrayAlphaImage};

    fn setup(dir: &Path) -> PathBuf {
        fs::write(dir.join("eng.traineddata"), b"").unwrap();
        let script = dir.join("fake-tesseract");
        fs::write(
            &script,
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then echo 'tesseract 5.3.0'; exit 0; fi\n\
             if [ \"$1\" = \"stdin\" ]; then cat > /dev/null; fi\n\
             echo \"recognized: $@\"\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[test]
    fn test_recognize_prints_text() {
        let dir = tempfile::tempdir().unwrap();
        let script = setup(dir.path());
        let image = dir.path().join("page.png");
        fs::write(&image, b"png").unwrap();

        let mut cmd = cargo_bin_cmd!("tessbridge");
        cmd.arg("recognize")
            .arg(&image)
            .arg("--tessdata-dir")
            .arg(dir.path())
            .arg("--tesseract")
            .arg(&script);

        cmd.assert()
            .success()
            .stdout(predicate::str::starts_with("recognized: "))
            .stdout(predicate::str::contains("--psm 3"));
    }

    #[test]
    fn test_recognize_writes_hocr_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = setup(dir.path());
        let image = dir.path().join("page.png");
        fs::write(&image, b"png").unwrap();
        let base = dir.path().join("out");

        let mut cmd = cargo_bin_cmd!("tessbridge");
        cmd.arg("recognize")
            .arg(&image)
            .arg(&base)
            .arg("--hocr")
            .arg("--tessdata-dir")
            .arg(dir.path())
            .arg("--tesseract")
            .arg(&script);

        cmd.assert().success().stdout(predicate::str::is_empty());

        let written = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(written.trim_end().ends_with("hocr"), "got: {}", written);
    }

    #[test]
    fn test_recognize_in_memory_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let script = setup(dir.path());
        let image = dir.path().join("page.png");
        DynamicImage::ImageLumaA8(GrayAlphaImage::new(16, 8))
            .save(&image)
            .unwrap();

        let mut cmd = cargo_bin_cmd!("tessbridge");
        cmd.arg("recognize")
            .arg(&image)
            .arg("--in-memory")
            .arg("--format")
            .arg("json")
            .arg("--tessdata-dir")
            .arg(dir.path())
            .arg("--tesseract")
            .arg(&script);

        let output = cmd.assert().success().get_output().stdout.clone();
        let record: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(record["mode"], "plaintext");
        assert_eq!(record["language"], "eng");
        assert!(record["text"]
            .as_str()
            .unwrap()
            .starts_with("recognized: stdin stdout"));
    }

    #[test]
    fn test_recognize_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let script = setup(dir.path());

        let mut cmd = cargo_bin_cmd!("tessbridge");
        cmd.arg("recognize")
            .arg(dir.path().join("missing.png"))
            .arg("--tessdata-dir")
            .arg(dir.path())
            .arg("--tesseract")
            .arg(&script);

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("failed to recognize"));
    }
}
