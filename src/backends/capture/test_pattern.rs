// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic capture device
//!
//! Renders a gradient whose tint depends on the selected lens and whose
//! brightness depends on the flash mode, so captures are distinguishable
//! without real hardware.

use super::DeviceSettings;
use crate::backends::types::{BackendError, BackendResult, CapturedImage, SensorRotation};
use crate::backends::CaptureDevice;
use crate::flash::FlashMode;
use crate::lens::LensSelection;
use futures::future::BoxFuture;
use image::{Rgba, RgbaImage};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Brightness added to every channel when the flash fires
const FLASH_BOOST: u8 = 40;

/// Capture device that renders a test pattern
pub struct TestPatternDevice {
    width: u32,
    height: u32,
    rotation: SensorRotation,
    settings: Mutex<DeviceSettings>,
    frame_counter: AtomicU32,
}

impl TestPatternDevice {
    /// Create a device producing `width`x`height` sensor frames
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            rotation: SensorRotation::None,
            settings: Mutex::new(DeviceSettings::default()),
            frame_counter: AtomicU32::new(0),
        }
    }

    /// Simulate a sensor mounted at `rotation`
    pub fn with_rotation(mut self, rotation: SensorRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Settings the next capture will use
    pub fn settings(&self) -> DeviceSettings {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of frames captured so far
    pub fn frames_captured(&self) -> u32 {
        self.frame_counter.load(Ordering::Relaxed)
    }

    fn render(width: u32, height: u32, settings: DeviceSettings, frame: u32) -> RgbaImage {
        let tint: u8 = match settings.lens {
            LensSelection::Back => 200,
            LensSelection::Front => 60,
        };
        let boost = match settings.flash_mode {
            FlashMode::Off => 0,
            FlashMode::On | FlashMode::Auto => FLASH_BOOST,
        };
        // Frame number shifts the gradient so consecutive shots differ
        let shift = (frame % 256) as u8;

        RgbaImage::from_fn(width, height, |x, y| {
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            Rgba([
                r.wrapping_add(shift).saturating_add(boost),
                g.saturating_add(boost),
                tint.saturating_add(boost),
                255,
            ])
        })
    }
}

impl CaptureDevice for TestPatternDevice {
    fn capture(&self) -> BoxFuture<'_, BackendResult<CapturedImage>> {
        let settings = self.settings();
        let frame = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        let (width, height, rotation) = (self.width, self.height, self.rotation);

        Box::pin(async move {
            let pixels = tokio::task::spawn_blocking(move || {
                let raw = Self::render(width, height, settings, frame);
                rotation.apply(raw)
            })
            .await
            .map_err(|e| BackendError::Other(format!("Render task error: {}", e)))?;

            debug!(
                frame,
                width = pixels.width(),
                height = pixels.height(),
                lens = %settings.lens,
                flash = %settings.flash_mode,
                "Test pattern captured"
            );
            Ok(CapturedImage::new(pixels))
        })
    }

    fn set_flash_mode(&self, mode: FlashMode) {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flash_mode = mode;
    }

    fn set_lens_selection(&self, lens: LensSelection) {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lens = lens;
    }
}
