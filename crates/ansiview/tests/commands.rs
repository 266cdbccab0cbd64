use std::fs;

use ansiview::cli::Cli;
use ansiview_render::{set_theme_detector, ThemeKind};
use clap::Parser;
use serial_test::serial;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    ansiview::run(cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn write_log(dir: &TempDir) -> String {
    let path = dir.path().join("build.log");
    fs::write(&path, "\x1b[1;31mHi\x1b[0m\nplain\n").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_render_to_stdout() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);

    let html = run(&["ansiview", "render", &log, "--theme", "light"]).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>build.log</title>"));
    assert!(html.contains("<body class=\"theme-light\">"));
    assert!(html.contains(r#"<span class="b w"><span class="a c h ao">Hi</span></span>"#));
    assert!(html.contains(".theme-light .h {\n  color: #cd3131;\n}\n"));
    assert!(!html.contains('\x1b'));
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_render_to_file_with_config() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);
    let config = dir.path().join("styles.yaml");
    fs::write(
        &config,
        "font:\n  font-size: 20px\nstyles:\n  attribute-bold:\n    preview-style:\n      font-weight: 900\n",
    )
    .unwrap();
    let output = dir.path().join("build.html");

    let stdout = run(&[
        "ansiview",
        "render",
        &log,
        "--config",
        config.to_str().unwrap(),
        "--theme",
        "dark",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert!(stdout.is_empty());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains(".ao {\n  font-weight: 900;\n}\n"));
    assert!(html.contains(".ansiview {\n  font-size: 20px;\n}\n"));
    assert!(!html.contains(".theme-dark .h"));
}

#[test]
fn test_render_live_state() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);

    let html = run(&["ansiview", "render", &log, "--state", r#"{"scroll":12}"#]).unwrap();
    assert!(html.contains("window.ansiviewState = {\"scroll\":12};"));
    assert!(html.contains("<body>\n"));

    let err = run(&["ansiview", "render", &log, "--state", "{oops"]).unwrap_err();
    assert!(err.to_string().contains("--state"));
}

#[test]
#[serial]
fn test_render_auto_theme() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);

    set_theme_detector(|| ThemeKind::HighContrast);
    let html = run(&["ansiview", "render", &log]).unwrap();
    assert!(html.contains("<body class=\"theme-high-contrast\">"));
}

#[test]
fn test_render_unknown_style_key() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);
    let config = dir.path().join("styles.yaml");
    fs::write(&config, "styles:\n  attribute-italic: {}\n").unwrap();

    let err = run(&["ansiview", "render", &log, "-c", config.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("attribute-italic"));
}

#[test]
fn test_render_missing_file() {
    let err = run(&["ansiview", "render", "/nonexistent/build.log"]).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/build.log"));
}

#[test]
fn test_strip() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir);
    assert_eq!(run(&["ansiview", "strip", &log]).unwrap(), "Hi\nplain\n");
}

#[test]
fn test_sample() {
    let out = run(&["ansiview", "sample"]).unwrap();
    assert_eq!(out.lines().count(), 16);
    assert!(out.starts_with("\x1b[1;30m 1;30 \x1b[0m"));
}
