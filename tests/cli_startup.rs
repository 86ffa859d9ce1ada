use std::path::Path;
use std::process::Output;

use assert_cmd::Command;

// Startup failures happen before the terminal is touched, so piped stdin is enough.

fn run(config_home: &Path, args: &[&str], stdin: &str) -> Output {
    Command::cargo_bin("edgecue")
        .unwrap()
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .args(args)
        .write_stdin(stdin)
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_icon(dir: &Path) -> String {
    let path = dir.join("icon.png");
    image::RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 255]))
        .save(&path)
        .unwrap();
    path.display().to_string()
}

#[test]
fn non_integer_step_count_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let icon = write_icon(dir.path());
    let results = dir.path().join("results");

    let output = run(
        dir.path(),
        &["--icon", &icon, "--results-dir", results.to_str().unwrap()],
        "lots\n",
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Enter to steps to run the program:"));
    assert!(stderr(&output).contains("InvalidStepCount"), "{}", stderr(&output));
    assert!(!results.exists());
}

#[test]
fn oversized_step_flag_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let icon = write_icon(dir.path());
    let results = dir.path().join("results");
    let steps = usize::MAX.to_string();

    let output = run(
        dir.path(),
        &[
            "--steps",
            &steps,
            "--icon",
            &icon,
            "--results-dir",
            results.to_str().unwrap(),
        ],
        "",
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("InvalidStepCount"), "{}", stderr(&output));
    assert!(!results.exists());
}

#[test]
fn oversized_prompted_step_count_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let icon = write_icon(dir.path());

    let output = run(dir.path(), &["--icon", &icon], "4611686018427387905\n");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("InvalidStepCount"), "{}", stderr(&output));
}

#[test]
fn missing_icon_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("img").join("pk.jpg");
    let results = dir.path().join("results");

    let output = run(
        dir.path(),
        &[
            "--icon",
            missing.to_str().unwrap(),
            "--results-dir",
            results.to_str().unwrap(),
        ],
        "2\n",
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("MissingAsset"), "{}", stderr(&output));
    assert!(!results.exists());
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempfile::tempdir().unwrap();
    let icon = write_icon(dir.path());
    let results = dir.path().join("results");

    let output = run(
        dir.path(),
        &[
            "--steps",
            "1",
            "--icon",
            &icon,
            "--results-dir",
            results.to_str().unwrap(),
        ],
        "",
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("stdin must be a tty"), "{}", stderr(&output));
    assert!(!results.exists());
}

// ProjectDirs honours XDG_CONFIG_HOME only on Linux
#[cfg(target_os = "linux")]
#[test]
fn save_config_persists_overrides() {
    let dir = tempfile::tempdir().unwrap();

    // the run itself fails on the missing icon, after the settings were stored
    let output = run(
        dir.path(),
        &["--steps", "1", "--suffix", "pilot", "--icon", "nowhere.png", "--save-config"],
        "",
    );
    assert!(!output.status.success());

    let stored = std::fs::read_to_string(dir.path().join("edgecue").join("config.json")).unwrap();
    let cfg: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(cfg["file_suffix"], "pilot");
    assert_eq!(cfg["icon_path"], "nowhere.png");
}
