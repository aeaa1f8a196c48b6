// SPDX-License-Identifier: GPL-3.0-only

//! Platform share handoff
//!
//! The booth only constructs the artifact and its metadata; handing it to
//! the platform is delegated to a [`ShareProvider`]. A platform without
//! any provider reports [`ShareError::Unsupported`] instead of failing
//! silently, so callers can offer a download instead.

use crate::constants::share;
use crate::errors::ShareError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Metadata handed to the platform share target
#[derive(Debug, Clone)]
pub struct ShareRequest {
    /// On-disk location of the artifact being shared
    pub path: PathBuf,
    /// Suggested filename for the receiving side
    pub filename: String,
    /// MIME type of the artifact
    pub mime_type: String,
    /// Share title
    pub title: String,
    /// Share body text
    pub text: String,
}

impl ShareRequest {
    /// Build a request with the fixed booth title and text
    pub fn new(path: PathBuf, filename: String, mime_type: &str) -> Self {
        Self {
            path,
            filename,
            mime_type: mime_type.to_string(),
            title: share::TITLE.to_string(),
            text: share::TEXT.to_string(),
        }
    }
}

/// Platform sharing capability
pub trait ShareProvider: Send + Sync {
    /// Whether the platform can take a share request at all.
    ///
    /// Checked before the artifact is staged anywhere, so an unsupported
    /// platform costs nothing.
    fn is_available(&self) -> bool;

    /// Hand the artifact to the platform
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Share via the system opener (`xdg-open` and friends).
///
/// Opening the artifact with the default handler is the closest desktop
/// equivalent of a native share sheet: the user's configured application
/// takes over from there.
pub struct SystemOpener;

impl ShareProvider for SystemOpener {
    fn is_available(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            // `open` shells out to one of these on Linux; without them the
            // handoff cannot work
            has_opener(&["xdg-open", "gio", "gnome-open", "kde-open"])
        }
        #[cfg(not(target_os = "linux"))]
        {
            true
        }
    }

    fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        info!(
            path = %request.path.display(),
            mime_type = %request.mime_type,
            "Handing artifact to system opener"
        );
        open::that_detached(&request.path).map_err(|e| ShareError::Failed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "system-opener"
    }
}

/// Provider for platforms without any share capability
pub struct NoShare;

impl ShareProvider for NoShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Pick the default provider for this platform
pub fn default_provider() -> Box<dyn ShareProvider> {
    let provider = SystemOpener;
    if provider.is_available() {
        Box::new(provider)
    } else {
        debug!("No system opener found, sharing unsupported");
        Box::new(NoShare)
    }
}

/// Check PATH for any of the given opener binaries
#[cfg(target_os = "linux")]
fn has_opener(candidates: &[&str]) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var)
        .any(|dir| candidates.iter().any(|bin| is_executable(&dir.join(bin))))
}

#[cfg(target_os = "linux")]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_booth_metadata() {
        let request = ShareRequest::new(
            PathBuf::from("/tmp/out.jpg"),
            "captured-photo-with-frame.jpg".to_string(),
            "image/jpeg",
        );
        assert_eq!(request.title, "Check out this photo!");
        assert_eq!(request.text, "Here is a cool photo I took!");
        assert_eq!(request.mime_type, "image/jpeg");
    }

    #[test]
    fn test_no_share_is_unsupported() {
        let provider = NoShare;
        assert!(!provider.is_available());

        let request = ShareRequest::new(PathBuf::from("/tmp/out.jpg"), "x.jpg".into(), "image/jpeg");
        assert!(matches!(
            provider.share(&request),
            Err(ShareError::Unsupported)
        ));
    }
}
