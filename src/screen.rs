// SPDX-License-Identifier: GPL-3.0-only

//! Presentation-facing screen model
//!
//! Maps controller state to what a host should draw, and host gestures to
//! controller commands. The host owns rendering; nothing here draws.

use crate::backends::CapturedImage;
use crate::constants::{strings, timing};
use crate::controller::{CaptureStateController, ControllerEvent};
use crate::errors::{CommandError, CommandResult};
use crate::flash::FlashMode;
use crate::lens::LensSelection;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::debug;

/// User intents forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Shutter button
    Capture,
    /// Close button on the review screen
    Dismiss,
    /// Download button on the review screen
    Save,
    /// Flash button
    SetFlash(FlashMode),
    /// Double tap on the live preview
    DoubleTap,
}

/// Flash button shown over the live preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashControl {
    /// Mode in effect now
    pub current: FlashMode,
    /// Mode a press switches to
    pub target: FlashMode,
}

impl FlashControl {
    fn for_mode(current: FlashMode) -> Self {
        Self {
            current,
            target: current.toggled(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.target {
            FlashMode::On | FlashMode::Auto => "Flash on",
            FlashMode::Off => "Flash off",
        }
    }

    /// Command a press produces
    pub fn command(&self) -> ScreenCommand {
        ScreenCommand::SetFlash(self.target)
    }
}

/// What the host should draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    /// Camera access missing
    NoPermission {
        title: &'static str,
        hint: &'static str,
    },
    /// Live preview with shutter and, for the back lens, a flash button
    Live {
        lens: LensSelection,
        flash_control: Option<FlashControl>,
        capturing: bool,
    },
    /// Review of the just-captured photo with dismiss and save buttons
    Reviewing { image: CapturedImage, saving: bool },
}

impl ScreenView {
    /// Build the view for the controller's current state
    pub fn render(controller: &CaptureStateController, permission_granted: bool) -> Self {
        if !permission_granted {
            return ScreenView::NoPermission {
                title: strings::NO_PERMISSION_TITLE,
                hint: strings::NO_PERMISSION_HINT,
            };
        }

        match controller.state().captured_image {
            Some(image) => ScreenView::Reviewing {
                image,
                saving: controller.is_saving(),
            },
            None => {
                let lens = controller.lens();
                let flash_control = lens
                    .supports_flash()
                    .then(|| FlashControl::for_mode(controller.flash_mode()));
                ScreenView::Live {
                    lens,
                    flash_control,
                    capturing: controller.is_capturing(),
                }
            }
        }
    }
}

/// Forward a host command to the controller
///
/// Commands the current screen does not offer are rejected with
/// [`CommandError::NotAvailable`]. Returns the spawned task for commands
/// that complete asynchronously.
pub fn dispatch(
    controller: &CaptureStateController,
    command: ScreenCommand,
) -> CommandResult<Option<JoinHandle<()>>> {
    let reviewing = controller.state().is_reviewing();
    debug!(?command, reviewing, "Dispatching screen command");

    match command {
        ScreenCommand::Capture if reviewing => Err(CommandError::NotAvailable("Capture")),
        ScreenCommand::Capture => controller.request_capture().map(Some),
        ScreenCommand::Dismiss => {
            controller.dismiss_captured_image();
            Ok(None)
        }
        ScreenCommand::Save => controller.save_photo_to_gallery().map(Some),
        ScreenCommand::SetFlash(_) if reviewing || !controller.lens().supports_flash() => {
            Err(CommandError::NotAvailable("Flash"))
        }
        ScreenCommand::SetFlash(mode) => {
            controller.set_flash_mode(mode);
            Ok(None)
        }
        ScreenCommand::DoubleTap if reviewing => Err(CommandError::NotAvailable("Lens switch")),
        ScreenCommand::DoubleTap => {
            controller.toggle_lens();
            Ok(None)
        }
    }
}

/// Transient "photo saved" confirmation
///
/// Shown when the gallery reports [`ControllerEvent::PhotoSaved`], not when
/// the save button is pressed. Pressing save used to show the toast up front,
/// so a failed write looked like a successful one. Failures stay silent on
/// screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveToast {
    shown_at: Option<Instant>,
}

impl SaveToast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &'static str {
        strings::PHOTO_SAVED
    }

    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    /// Show the toast when `event` reports a successful save
    pub fn observe(&mut self, event: &ControllerEvent, now: Instant) {
        if let ControllerEvent::PhotoSaved { .. } = event {
            self.show(now);
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown| now.saturating_duration_since(shown) < timing::TOAST_DURATION)
    }

    /// Opacity for fade in/out (0.0 hidden, 1.0 fully shown)
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(shown) = self.shown_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(shown);
        if elapsed >= timing::TOAST_DURATION + timing::TOAST_FADE {
            return 0.0;
        }
        let fade = timing::TOAST_FADE.as_secs_f32();
        if elapsed < timing::TOAST_FADE {
            elapsed.as_secs_f32() / fade
        } else if elapsed < timing::TOAST_DURATION {
            1.0
        } else {
            1.0 - (elapsed - timing::TOAST_DURATION).as_secs_f32() / fade
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn test_flash_control_targets_opposite_mode() {
        let off = FlashControl::for_mode(FlashMode::Off);
        assert_eq!(off.target, FlashMode::On);
        assert_eq!(off.label(), "Flash on");
        assert_eq!(off.command(), ScreenCommand::SetFlash(FlashMode::On));

        let on = FlashControl::for_mode(FlashMode::On);
        assert_eq!(on.target, FlashMode::Off);
        assert_eq!(on.label(), "Flash off");
    }

    #[test]
    fn test_toast_only_for_successful_save() {
        let now = Instant::now();
        let mut toast = SaveToast::new();
        toast.observe(
            &ControllerEvent::SaveFailed {
                id: Uuid::new_v4(),
                error: crate::errors::SaveError::WriteFailed("disk full".into()),
            },
            now,
        );
        assert!(!toast.is_visible(now));

        toast.observe(
            &ControllerEvent::PhotoSaved {
                id: Uuid::new_v4(),
                path: PathBuf::from("/tmp/IMG.jpg"),
            },
            now,
        );
        assert!(toast.is_visible(now));
        assert_eq!(toast.text(), strings::PHOTO_SAVED);
    }

    #[test]
    fn test_toast_expires() {
        let now = Instant::now();
        let mut toast = SaveToast::new();
        toast.show(now);
        assert!(toast.is_visible(now + Duration::from_millis(1999)));
        assert!(!toast.is_visible(now + timing::TOAST_DURATION));
        toast.hide();
        assert!(!toast.is_visible(now));
    }

    #[test]
    fn test_toast_opacity_fades() {
        let now = Instant::now();
        let mut toast = SaveToast::new();
        assert_eq!(toast.opacity(now), 0.0);
        toast.show(now);
        assert_eq!(toast.opacity(now), 0.0);
        assert!((toast.opacity(now + Duration::from_millis(500)) - 0.5).abs() < 1e-3);
        assert_eq!(toast.opacity(now + Duration::from_millis(1500)), 1.0);
        assert!((toast.opacity(now + Duration::from_millis(2500)) - 0.5).abs() < 1e-3);
        assert_eq!(toast.opacity(now + Duration::from_millis(3000)), 0.0);
    }
}
