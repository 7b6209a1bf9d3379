// SPDX-License-Identifier: GPL-3.0-only

//! Collaborator contracts for the capture controller
//!
//! The controller never touches hardware or storage directly. It talks to
//! three collaborators through the traits defined here:
//!
//! ```text
//! ┌─────────────────────────────┐
//! │   CaptureStateController    │
//! └──────┬──────────────┬───────┘
//!        │              │
//!        ▼              ▼
//! ┌──────────────┐ ┌──────────────┐      ┌────────────────┐
//! │CaptureDevice │ │ GallerySink  │      │ PermissionGate │ ← used by the host
//! └──────────────┘ └──────────────┘      └────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`capture`]: capture devices (test pattern, image file source)
//! - [`gallery`]: directory-backed photo store
//! - [`permission`]: permission gates

pub mod capture;
pub mod gallery;
pub mod permission;
pub mod types;

pub use capture::{FileSourceDevice, TestPatternDevice};
pub use gallery::DirectoryGallery;
pub use permission::{DevicePermission, StaticPermission};
pub use types::*;

use crate::flash::FlashMode;
use crate::lens::LensSelection;
use futures::future::BoxFuture;
use std::path::PathBuf;

/// A camera that produces one still image per request
pub trait CaptureDevice: Send + Sync {
    /// Take a single photo
    ///
    /// The returned image is already rotated upright as viewed.
    fn capture(&self) -> BoxFuture<'_, BackendResult<CapturedImage>>;

    /// Apply a flash mode to the next capture (fire-and-forget)
    fn set_flash_mode(&self, mode: FlashMode);

    /// Switch the lens feeding preview and capture (fire-and-forget)
    fn set_lens_selection(&self, lens: LensSelection);
}

/// Permanent storage for captured photos
pub trait GallerySink: Send + Sync {
    /// Persist an image, returning where it landed
    fn save(&self, image: CapturedImage) -> BoxFuture<'_, BackendResult<PathBuf>>;
}

/// Camera permission check used by the presentation host
pub trait PermissionGate: Send + Sync {
    /// Whether camera access is currently granted
    fn has_camera_permission(&self) -> bool;

    /// Ask for camera access, resolving to whether it was granted
    fn request_camera_permission(&self) -> BoxFuture<'_, bool>;
}
