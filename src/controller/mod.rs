// SPDX-License-Identifier: GPL-3.0-only

//! Capture state controller
//!
//! Single source of truth for the capture screen: the photo pending review,
//! the flash mode and the lens selection. All mutation goes through the
//! commands on [`CaptureStateController`]; side effects run on the tokio
//! runtime and feed their results back through the same state cells.
//!
//! ```text
//!   Live      ──request_capture ok──────▶ Reviewing
//!   Reviewing ──dismiss / save completes──▶ Live
//!   Live      ──request_capture err─────▶ Live (reported, no change)
//! ```

pub mod events;
pub mod state;

pub use events::{ControllerEvent, EventBus};
pub use state::{CapturePhase, CaptureState, StateCell};

use crate::backends::{CaptureDevice, CapturedImage, GallerySink};
use crate::errors::{AppError, AppResult, CaptureError, CommandError, CommandResult, SaveError};
use crate::flash::FlashMode;
use crate::lens::LensSelection;
use futures::Stream;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Initial flash and lens settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerSettings {
    pub flash_mode: FlashMode,
    pub lens: LensSelection,
}

/// Clears an in-flight flag when dropped, even if the task panics
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Inner {
    device: Arc<dyn CaptureDevice>,
    gallery: Arc<dyn GallerySink>,
    runtime: Handle,
    state: StateCell<CaptureState>,
    flash_mode: StateCell<FlashMode>,
    lens: StateCell<LensSelection>,
    events: EventBus,
    capture_in_flight: AtomicBool,
    save_in_flight: AtomicBool,
    disposed: AtomicBool,
}

impl Inner {
    /// Empty the review slot, handing back whatever it held
    fn take_image(&self) -> Option<CapturedImage> {
        let mut taken = None;
        self.state.modify(|state| {
            taken = state.captured_image.take();
            taken.is_some()
        });
        taken
    }

    fn finish_capture(&self, result: Result<CapturedImage, CaptureError>) {
        if self.disposed.load(Ordering::Acquire) {
            debug!("Controller disposed, discarding capture result");
            return;
        }

        match result {
            Ok(image) => {
                let id = image.id();
                info!(
                    %id,
                    width = image.width(),
                    height = image.height(),
                    "Photo captured"
                );
                let previous = self.state.replace(CaptureState {
                    captured_image: Some(image),
                });
                if let Some(released) = previous.captured_image {
                    debug!(id = %released.id(), "Released previous capture");
                }
                self.events.publish(ControllerEvent::PhotoCaptured { id });
            }
            Err(e) => {
                error!(error = %e, "Error capturing image");
                self.events.publish(ControllerEvent::CaptureFailed(e));
            }
        }
    }

    fn finish_save(&self, id: Uuid, result: Result<PathBuf, SaveError>) {
        if self.disposed.load(Ordering::Acquire) {
            debug!(%id, "Controller disposed, discarding save result");
            return;
        }

        match result {
            Ok(path) => {
                info!(%id, path = %path.display(), "Photo stored in gallery");
                self.events.publish(ControllerEvent::PhotoSaved { id, path });
            }
            Err(error) => {
                warn!(%id, error = %error, "Failed to store photo in gallery");
                self.events.publish(ControllerEvent::SaveFailed { id, error });
            }
        }

        // A newer capture may have taken the slot while the gallery was busy
        let cleared = self.state.modify(|state| {
            if state.captured_image.as_ref().map(CapturedImage::id) == Some(id) {
                state.captured_image = None;
                true
            } else {
                false
            }
        });
        if cleared {
            debug!(%id, "Review cleared after save");
        }
    }
}

/// Owner of the capture screen state
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct CaptureStateController {
    inner: Arc<Inner>,
}

impl CaptureStateController {
    /// Create a controller on the current tokio runtime
    pub fn new(
        device: Arc<dyn CaptureDevice>,
        gallery: Arc<dyn GallerySink>,
        settings: ControllerSettings,
    ) -> AppResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| AppError::Other(format!("No async runtime available: {}", e)))?;
        Ok(Self::with_runtime(runtime, device, gallery, settings))
    }

    /// Create a controller spawning its work onto `runtime`
    pub fn with_runtime(
        runtime: Handle,
        device: Arc<dyn CaptureDevice>,
        gallery: Arc<dyn GallerySink>,
        settings: ControllerSettings,
    ) -> Self {
        device.set_flash_mode(settings.flash_mode);
        device.set_lens_selection(settings.lens);

        info!(
            flash = %settings.flash_mode,
            lens = %settings.lens,
            "Capture controller ready"
        );

        Self {
            inner: Arc::new(Inner {
                device,
                gallery,
                runtime,
                state: StateCell::default(),
                flash_mode: StateCell::new(settings.flash_mode),
                lens: StateCell::new(settings.lens),
                events: EventBus::new(),
                capture_in_flight: AtomicBool::new(false),
                save_in_flight: AtomicBool::new(false),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Ask the device for one photo
    ///
    /// Returns immediately; the result lands in the state when the device
    /// completes. Rejected while another capture is still in flight.
    pub fn request_capture(&self) -> CommandResult<JoinHandle<()>> {
        self.ensure_not_disposed()?;

        if self
            .inner
            .capture_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Capture already in flight, ignoring request");
            return Err(CommandError::CaptureInProgress);
        }

        info!("Capturing photo...");
        let inner = Arc::clone(&self.inner);
        Ok(self.inner.runtime.spawn(async move {
            let _flight = InFlight(&inner.capture_in_flight);
            let result = inner.device.capture().await.map_err(CaptureError::from);
            inner.finish_capture(result);
        }))
    }

    /// Drop the photo pending review and return to the live preview
    ///
    /// No-op when nothing is pending.
    pub fn dismiss_captured_image(&self) {
        match self.inner.take_image() {
            Some(image) => debug!(id = %image.id(), "Captured image dismissed"),
            None => debug!("Nothing to dismiss"),
        }
    }

    /// Hand the pending photo to the gallery
    ///
    /// When the gallery finishes the review slot is cleared, whether or not
    /// the write succeeded, unless a newer capture has replaced the photo in
    /// the meantime. A failed write is only reported as
    /// [`ControllerEvent::SaveFailed`].
    pub fn save_photo_to_gallery(&self) -> CommandResult<JoinHandle<()>> {
        self.ensure_not_disposed()?;

        let Some(image) = self.inner.state.get().captured_image else {
            debug!("No captured image to save, ignoring request");
            return Err(CommandError::NoImageToSave);
        };

        if self
            .inner
            .save_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Save already in flight, ignoring request");
            return Err(CommandError::SaveInProgress);
        }

        let inner = Arc::clone(&self.inner);
        Ok(self.inner.runtime.spawn(async move {
            let _flight = InFlight(&inner.save_in_flight);
            let id = image.id();
            let result = inner.gallery.save(image).await.map_err(SaveError::from);
            inner.finish_save(id, result);
        }))
    }

    /// Overwrite the flash mode
    pub fn set_flash_mode(&self, mode: FlashMode) {
        debug!(flash = %mode, "Setting flash mode");
        self.inner.flash_mode.replace(mode);
        self.inner.device.set_flash_mode(mode);
    }

    /// Overwrite the lens selection
    pub fn set_lens_selection(&self, lens: LensSelection) {
        debug!(%lens, "Setting lens");
        self.inner.lens.replace(lens);
        self.inner.device.set_lens_selection(lens);
    }

    /// Swap front and back lens, returning the new selection
    pub fn toggle_lens(&self) -> LensSelection {
        let lens = self.inner.lens.get().toggled();
        self.set_lens_selection(lens);
        lens
    }

    /// Release any pending photo and stop accepting work
    ///
    /// Results of in-flight operations that complete afterwards are discarded.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(image) = self.inner.take_image() {
            debug!(id = %image.id(), "Released pending capture on dispose");
        }
        info!("Capture controller disposed");
    }

    fn ensure_not_disposed(&self) -> CommandResult<()> {
        if self.inner.disposed.load(Ordering::Acquire) {
            return Err(CommandError::Disposed);
        }
        Ok(())
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Snapshot of the capture state
    pub fn state(&self) -> CaptureState {
        self.inner.state.get()
    }

    pub fn phase(&self) -> CapturePhase {
        self.inner.state.get().phase()
    }

    pub fn flash_mode(&self) -> FlashMode {
        self.inner.flash_mode.get()
    }

    pub fn lens(&self) -> LensSelection {
        self.inner.lens.get()
    }

    pub fn is_capturing(&self) -> bool {
        self.inner.capture_in_flight.load(Ordering::Acquire)
    }

    pub fn is_saving(&self) -> bool {
        self.inner.save_in_flight.load(Ordering::Acquire)
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    pub fn subscribe_state(&self) -> watch::Receiver<CaptureState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_flash_mode(&self) -> watch::Receiver<FlashMode> {
        self.inner.flash_mode.subscribe()
    }

    pub fn subscribe_lens(&self) -> watch::Receiver<LensSelection> {
        self.inner.lens.subscribe()
    }

    /// Stream of capture state snapshots, starting with the current one
    pub fn state_changes(&self) -> impl Stream<Item = CaptureState> + Send + 'static {
        self.inner.state.changes()
    }

    /// Capture/save outcomes, including failures
    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.inner.events.subscribe()
    }
}

impl std::fmt::Debug for CaptureStateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureStateController")
            .field("phase", &self.phase())
            .field("flash_mode", &self.flash_mode())
            .field("lens", &self.lens())
            .field("capturing", &self.is_capturing())
            .field("saving", &self.is_saving())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
