// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission gates

use crate::backends::PermissionGate;
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Permission gate with a fixed answer
///
/// A request grants access when `grant_on_request` is set.
#[derive(Debug, Default)]
pub struct StaticPermission {
    granted: AtomicBool,
    grant_on_request: bool,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self {
            granted: AtomicBool::new(true),
            grant_on_request: true,
        }
    }

    pub fn denied() -> Self {
        Self::default()
    }

    /// Denied until the first request, which grants it
    pub fn granted_on_request() -> Self {
        Self {
            granted: AtomicBool::new(false),
            grant_on_request: true,
        }
    }
}

impl PermissionGate for StaticPermission {
    fn has_camera_permission(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }

    fn request_camera_permission(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            if self.grant_on_request {
                self.granted.store(true, Ordering::Release);
            }
            self.has_camera_permission()
        })
    }
}

/// Permission gate backed by read access to a device node or source file
///
/// There is nothing to prompt for; a request re-checks access.
#[derive(Debug, Clone)]
pub struct DevicePermission {
    path: PathBuf,
}

impl DevicePermission {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PermissionGate for DevicePermission {
    fn has_camera_permission(&self) -> bool {
        match std::fs::File::open(&self.path) {
            Ok(_) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Camera source not accessible");
                false
            }
        }
    }

    fn request_camera_permission(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            let path = self.path.clone();
            let granted = tokio::task::spawn_blocking(move || std::fs::File::open(path).is_ok())
                .await
                .unwrap_or(false);
            info!(path = %self.path.display(), granted, "Camera permission checked");
            granted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_permission_granted_on_request() {
        let gate = StaticPermission::granted_on_request();
        assert!(!gate.has_camera_permission());
        assert!(gate.request_camera_permission().await);
        assert!(gate.has_camera_permission());
    }

    #[tokio::test]
    async fn test_static_permission_denied_stays_denied() {
        let gate = StaticPermission::denied();
        assert!(!gate.request_camera_permission().await);
    }

    #[tokio::test]
    async fn test_device_permission_missing_path() {
        let gate = DevicePermission::new("/nonexistent/video0");
        assert!(!gate.has_camera_permission());
        assert!(!gate.request_camera_permission().await);
    }
}
