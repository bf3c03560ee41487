//! Configuration unit tests.

use std::path::PathBuf;

use super::*;
use crate::color::{BLACK, WHITE};

#[test]
fn default_config_roundtrip() {
    let cfg = Config::default();
    let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
    let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
    assert_eq!(parsed.font.family, "DejaVuSansMono");
    assert_eq!(parsed.font.fallback_paths.len(), 2);
    assert!(parsed.font.warmup.is_none());
    assert_eq!(parsed.grid.cell_width, 20);
    assert_eq!(parsed.grid.cell_height, 30);
    assert_eq!(parsed.grid.initial_text, "Hello, TermGrid!");
    assert_eq!(parsed.window.width, 800);
    assert_eq!(parsed.window.height, 600);
    assert!(parsed.window.resizable);
    assert_eq!(parsed.colors.foreground, "#FFFFFF");
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed: Config = toml::from_str("").expect("deserialize");
    assert_eq!(parsed.font.family, "DejaVuSansMono");
    assert_eq!(parsed.window.title, "TermGrid");
    assert!(parsed.grid.rows.is_none());
}

#[test]
fn partial_toml_uses_defaults() {
    let toml_str = r#"
[font]
family = "JetBrainsMono"
search_dirs = ["/opt/fonts"]
warmup = "abc"
"#;
    let parsed: Config = toml::from_str(toml_str).expect("deserialize");
    assert_eq!(parsed.font.family, "JetBrainsMono");
    assert_eq!(parsed.font.search_dirs, vec![PathBuf::from("/opt/fonts")]);
    assert_eq!(parsed.font.warmup.as_deref(), Some("abc"));
    // Untouched fields keep their defaults.
    assert_eq!(parsed.font.fallback_paths.len(), 2);
    assert_eq!(parsed.window.width, 800);
}

#[test]
fn default_shape_matches_default_window() {
    let cfg = Config::default();
    assert_eq!(cfg.grid.shape(cfg.window.width, cfg.window.height), (20, 40));
}

#[test]
fn explicit_shape_wins() {
    let grid = GridConfig {
        rows: Some(5),
        cols: Some(10),
        ..GridConfig::default()
    };
    assert_eq!(grid.shape(800, 600), (5, 10));
}

#[test]
fn derived_shape_never_zero() {
    let grid = GridConfig {
        cell_width: 0,
        cell_height: 1000,
        ..GridConfig::default()
    };
    let (rows, cols) = grid.shape(10, 10);
    assert_eq!(rows, 1);
    assert_eq!(cols, 10);
}

#[test]
fn colors_resolve_with_fallback() {
    let colors = ColorConfig {
        foreground: "#000".to_owned(),
        background: "not a color".to_owned(),
    };
    let resolved = colors.resolve();
    assert_eq!(resolved.text, BLACK);
    assert_eq!(resolved.background, BLACK);

    let defaults = ColorConfig::default().resolve();
    assert_eq!(defaults.text, WHITE);
}

#[test]
fn load_from_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = Config::load_from(&dir.path().join("config.toml"));
    assert_eq!(cfg.font.family, "DejaVuSansMono");
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid]\nrows = 3\ncols = 7\n").expect("write");
    let cfg = Config::load_from(&path);
    assert_eq!(cfg.grid.shape(800, 600), (3, 7));
}

#[test]
fn try_load_from_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid\nrows = ").expect("write");
    let err = Config::try_load_from(&path).expect_err("invalid toml");
    assert!(matches!(err, ConfigError::Parse { .. }));
    // The lenient loader falls back instead.
    assert_eq!(Config::load_from(&path).grid.cell_height, 30);
}
