//! Window preview capture collaborator
//!
//! Previews are rasterized snapshots of window contents used for taskbar
//! hover cards and task-view thumbnails. Capture is best-effort: a
//! failure is logged and swallowed, and consumers fall back to a live
//! (degraded) render of the window.

use thiserror::Error;

use crate::apps::AppId;

/// A captured window snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    /// Encoded image, typically a data URL the host can display directly
    pub data_url: String,
    /// Capture timestamp, for staleness display
    pub taken_at_ms: f64,
}

/// Why a capture attempt failed
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The window hosts content that cannot be rasterized (for example
    /// cross-origin frames)
    #[error("content of {0:?} cannot be captured")]
    Unsupported(AppId),
    /// The capture backend itself failed
    #[error("capture backend failed: {0}")]
    Backend(String),
}

/// Rasterizes window contents on request.
///
/// Implemented by the rendering host; the shell only decides *when* to
/// capture (on defocus and before minimize, throttled).
pub trait PreviewCapture {
    fn capture(&mut self, id: AppId, now_ms: f64) -> Result<Preview, CaptureError>;
}

/// Capture backend that always declines.
///
/// Useful for headless hosts and tests of the fallback path: every
/// window simply renders live.
#[derive(Default)]
pub struct NoCapture;

impl PreviewCapture for NoCapture {
    fn capture(&mut self, id: AppId, _now_ms: f64) -> Result<Preview, CaptureError> {
        Err(CaptureError::Unsupported(id))
    }
}
