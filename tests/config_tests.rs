// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photo_capture::Config;
use photo_capture::backends::SensorRotation;
use photo_capture::config::PhotoOutputFormat;
use photo_capture::{FlashMode, LensSelection};
use std::path::PathBuf;

fn temp_config_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("photo-capture-config-{}", uuid::Uuid::new_v4()))
        .join("config.json")
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.default_flash, FlashMode::Off);
    assert_eq!(config.default_lens, LensSelection::Back);
    assert_eq!(config.output_format, PhotoOutputFormat::Jpeg);
    assert!(config.photo_dir.is_none());
}

#[test]
fn test_missing_file_gives_defaults() {
    let config = Config::load_from(&temp_config_path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_then_load() {
    let path = temp_config_path();
    let config = Config {
        photo_dir: Some(PathBuf::from("/tmp/shots")),
        output_format: PhotoOutputFormat::Png,
        default_flash: FlashMode::On,
        default_lens: LensSelection::Front,
        sensor_rotation_degrees: 270,
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.photo_dir(), PathBuf::from("/tmp/shots"));
    assert_eq!(loaded.sensor_rotation(), SensorRotation::Rotate270);
    let settings = loaded.controller_settings();
    assert_eq!(settings.flash_mode, FlashMode::On);
    assert_eq!(settings.lens, LensSelection::Front);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_partial_file_fills_defaults() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "default_lens": "Front" }"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.default_lens, LensSelection::Front);
    assert_eq!(loaded.pattern_width, Config::default().pattern_width);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_malformed_file_is_config_error() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, photo_capture::AppError::Config(_)));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_invalid_rotation_falls_back_to_none() {
    let config = Config {
        sensor_rotation_degrees: 45,
        ..Config::default()
    };
    assert_eq!(config.sensor_rotation(), SensorRotation::None);
}
