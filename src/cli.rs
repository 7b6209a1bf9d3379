// SPDX-License-Identifier: GPL-3.0-only

//! Terminal host for the capture controller
//!
//! This module provides command-line functionality for:
//! - An interactive session (capture, review, save, flash, lens)
//! - Taking a single photo non-interactively

use photo_capture::backends::{
    DevicePermission, DirectoryGallery, FileSourceDevice, StaticPermission, TestPatternDevice,
};
use photo_capture::screen::{SaveToast, dispatch};
use photo_capture::{
    CaptureDevice, CaptureStateController, CommandError, Config, ControllerEvent, FlashMode,
    LensSelection, PermissionGate, ScreenCommand, ScreenView,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Options shared by all subcommands
pub struct Options {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// A parsed line of session input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Command(ScreenCommand),
    /// Press whichever flash button is on screen
    FlashButton,
    Status,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  capture (c)        take a photo
  save (s)           save the photo under review
  dismiss (d)        discard the photo under review
  flash [on|off]     press the flash button, or set a mode
  flip (f)           switch lens (double tap)
  status             show the current screen
  quit (q)           leave the session";

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    let input = match (verb.as_str(), arg) {
        ("capture" | "c" | "shoot", None) => Input::Command(ScreenCommand::Capture),
        ("save" | "s", None) => Input::Command(ScreenCommand::Save),
        ("dismiss" | "d" | "close", None) => Input::Command(ScreenCommand::Dismiss),
        ("flip" | "f" | "doubletap", None) => Input::Command(ScreenCommand::DoubleTap),
        ("flash", None) => Input::FlashButton,
        ("flash", Some(mode)) => {
            Input::Command(ScreenCommand::SetFlash(FlashMode::from_name(mode)?))
        }
        ("status", None) => Input::Status,
        ("help" | "?", None) => Input::Help,
        ("quit" | "q" | "exit", None) => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Wire up the controller and permission gate from config and options
fn build(
    options: Options,
) -> Result<(CaptureStateController, Arc<dyn PermissionGate>), Box<dyn std::error::Error>> {
    let config_path = options.config.unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;
    let rotation = config.sensor_rotation();

    let device: Arc<dyn CaptureDevice> = match &options.source {
        Some(path) => Arc::new(FileSourceDevice::new(path).with_rotation(rotation)),
        None => Arc::new(
            TestPatternDevice::new(config.pattern_width, config.pattern_height)
                .with_rotation(rotation),
        ),
    };

    // A file source is "accessible" when it can be opened
    let permission: Arc<dyn PermissionGate> = match &options.source {
        Some(path) => Arc::new(DevicePermission::new(path)),
        None => Arc::new(StaticPermission::granted()),
    };

    let photo_dir = options.output.unwrap_or_else(|| config.photo_dir());
    info!(path = %photo_dir.display(), "Photo directory");
    let gallery = Arc::new(
        DirectoryGallery::new(photo_dir)
            .with_format(config.output_format.into())
            .with_quality(config.quality),
    );

    let controller = CaptureStateController::new(device, gallery, config.controller_settings())?;
    Ok((controller, permission))
}

fn print_view(view: &ScreenView, toast: &SaveToast) {
    let now = Instant::now();
    if toast.is_visible(now) {
        println!("  [{}]", toast.text());
    }

    match view {
        ScreenView::NoPermission { title, hint } => {
            println!("{}", title);
            println!("{}", hint);
        }
        ScreenView::Live {
            lens,
            flash_control,
            capturing,
        } => {
            let flash = flash_control
                .map(|control| format!(", flash {} (button: {})", control.current, control.label()))
                .unwrap_or_default();
            let busy = if *capturing { " (capturing)" } else { "" };
            println!("Live preview: {} lens{}{}", lens, flash, busy);
        }
        ScreenView::Reviewing { image, saving } => {
            let busy = if *saving { " (saving)" } else { "" };
            println!(
                "Reviewing photo {}x{}{}: save (s) or dismiss (d)",
                image.width(),
                image.height(),
                busy
            );
        }
    }
}

/// Feed pending events into the toast, returning the latest saved path
fn drain_events(
    events: &mut broadcast::Receiver<ControllerEvent>,
    toast: &mut SaveToast,
) -> Option<PathBuf> {
    let mut saved = None;
    while let Ok(event) = events.try_recv() {
        debug!(?event, "Controller event");
        toast.observe(&event, Instant::now());
        if let ControllerEvent::PhotoSaved { path, .. } = event {
            saved = Some(path);
        }
    }
    saved
}

/// Run an interactive capture session on stdin/stdout
pub async fn run_session(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let (controller, permission) = build(options)?;

    if !permission.has_camera_permission() {
        print_view(&ScreenView::render(&controller, false), &SaveToast::new());
        if !permission.request_camera_permission().await {
            controller.dispose();
            return Ok(());
        }
    }

    let mut events = controller.subscribe_events();
    let mut toast = SaveToast::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    print_view(&ScreenView::render(&controller, true), &toast);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(input) = parse_input(&line) else {
            println!("Unknown command: {} (type 'help')", line.trim());
            continue;
        };

        let command = match input {
            Input::Quit => break,
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Status => {
                print_view(&ScreenView::render(&controller, true), &toast);
                continue;
            }
            Input::FlashButton => match ScreenView::render(&controller, true) {
                ScreenView::Live {
                    flash_control: Some(control),
                    ..
                } => control.command(),
                _ => {
                    println!("No flash button on this screen");
                    continue;
                }
            },
            Input::Command(command) => command,
        };

        match dispatch(&controller, command) {
            Ok(Some(task)) => task.await?,
            Ok(None) => {}
            Err(CommandError::NoImageToSave) => {}
            Err(e) => println!("{}", e),
        }

        drain_events(&mut events, &mut toast);
        print_view(&ScreenView::render(&controller, true), &toast);
    }

    controller.dispose();
    Ok(())
}

/// Take one photo and save it
pub async fn take_photo(
    options: Options,
    flash: bool,
    front: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (controller, permission) = build(options)?;

    if !permission.has_camera_permission() && !permission.request_camera_permission().await {
        return Err("Camera is not accessible".into());
    }

    if front {
        controller.set_lens_selection(LensSelection::Front);
    }
    if flash {
        controller.set_flash_mode(FlashMode::On);
    }

    let mut events = controller.subscribe_events();

    println!("Capturing...");
    controller.request_capture()?.await?;
    if !controller.state().is_reviewing() {
        return Err("Failed to capture photo".into());
    }

    controller.save_photo_to_gallery()?.await?;

    let mut toast = SaveToast::new();
    let saved = drain_events(&mut events, &mut toast);
    controller.dispose();

    match saved {
        Some(path) => {
            println!("Photo saved: {}", path.display());
            Ok(())
        }
        None => Err("Failed to save photo".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_input("c"),
            Some(Input::Command(ScreenCommand::Capture))
        );
        assert_eq!(
            parse_input("  Save "),
            Some(Input::Command(ScreenCommand::Save))
        );
        assert_eq!(
            parse_input("flip"),
            Some(Input::Command(ScreenCommand::DoubleTap))
        );
        assert_eq!(parse_input("quit"), Some(Input::Quit));
    }

    #[test]
    fn test_parse_flash() {
        assert_eq!(parse_input("flash"), Some(Input::FlashButton));
        assert_eq!(
            parse_input("flash on"),
            Some(Input::Command(ScreenCommand::SetFlash(FlashMode::On)))
        );
        assert_eq!(parse_input("flash torch"), None);
    }

    #[test]
    fn test_parse_rejects_unknown_and_extra_args() {
        assert_eq!(parse_input("zoom"), None);
        assert_eq!(parse_input("capture now"), None);
        assert_eq!(parse_input(""), None);
    }
}
