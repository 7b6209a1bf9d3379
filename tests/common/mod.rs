// SPDX-License-Identifier: GPL-3.0-only

//! Scripted collaborators shared by the integration tests

#![allow(dead_code)]

use futures::future::BoxFuture;
use image::RgbaImage;
use photo_capture::backends::{BackendError, BackendResult};
use photo_capture::{
    CaptureDevice, CaptureStateController, CapturedImage, ControllerSettings, FlashMode,
    GallerySink, LensSelection,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Blocks an operation until the test releases it
struct Gate(Semaphore);

impl Gate {
    async fn pass(&self) -> Result<(), BackendError> {
        self.0
            .acquire()
            .await
            .map(|permit| permit.forget())
            .map_err(|e| BackendError::Other(e.to_string()))
    }
}

/// Capture device that replays scripted outcomes (success when the script runs out)
#[derive(Default)]
pub struct ScriptedDevice {
    script: Mutex<VecDeque<BackendResult<()>>>,
    gate: Option<Gate>,
    captures: AtomicUsize,
    flash_mode: Mutex<Option<FlashMode>>,
    lens: Mutex<Option<LensSelection>>,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(outcomes: Vec<BackendResult<()>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    /// Captures wait until `release` is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Gate(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.0.add_permits(count);
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub fn last_flash_mode(&self) -> Option<FlashMode> {
        *self.flash_mode.lock().unwrap()
    }

    pub fn last_lens(&self) -> Option<LensSelection> {
        *self.lens.lock().unwrap()
    }
}

impl CaptureDevice for ScriptedDevice {
    fn capture(&self) -> BoxFuture<'_, BackendResult<CapturedImage>> {
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.pass().await?;
            }
            self.captures.fetch_add(1, Ordering::SeqCst);
            let outcome = self.script.lock().unwrap().pop_front().unwrap_or(Ok(()));
            outcome.map(|()| CapturedImage::new(RgbaImage::new(4, 3)))
        })
    }

    fn set_flash_mode(&self, mode: FlashMode) {
        *self.flash_mode.lock().unwrap() = Some(mode);
    }

    fn set_lens_selection(&self, lens: LensSelection) {
        *self.lens.lock().unwrap() = Some(lens);
    }
}

/// Gallery that records saved image ids without keeping the pixels
#[derive(Default)]
pub struct RecordingGallery {
    saved: Mutex<Vec<Uuid>>,
    fail: bool,
    gate: Option<Gate>,
}

impl RecordingGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Gate(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.0.add_permits(count);
        }
    }

    pub fn saved(&self) -> Vec<Uuid> {
        self.saved.lock().unwrap().clone()
    }
}

impl GallerySink for RecordingGallery {
    fn save(&self, image: CapturedImage) -> BoxFuture<'_, BackendResult<PathBuf>> {
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.pass().await?;
            }
            self.saved.lock().unwrap().push(image.id());
            if self.fail {
                return Err(BackendError::IoError("disk full".to_string()));
            }
            Ok(PathBuf::from(format!("/gallery/{}.jpg", image.id())))
        })
    }
}

/// Controller on the current runtime with default settings
pub fn controller(
    device: &Arc<ScriptedDevice>,
    gallery: &Arc<RecordingGallery>,
) -> CaptureStateController {
    CaptureStateController::new(
        device.clone(),
        gallery.clone(),
        ControllerSettings::default(),
    )
    .unwrap()
}
