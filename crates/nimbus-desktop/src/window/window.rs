//! Window struct and animation lifecycle

use crate::apps::{AppId, AppPayload};
use crate::desktop::DesktopId;
use crate::math::Rect;
use crate::preview::Preview;
use crate::transition::ENTER_FRAME_COUNT;

/// Animation lifecycle of a window's mounted representation.
///
/// `Hidden` means nothing is rendered. An opening window enters through
/// `Entering`, which counts presented frames so the pre-transition state
/// is painted before the transition runs; a closing window lingers in
/// `Exiting` until the exit animation's duration elapses, then unmounts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Hidden,
    Entering {
        frames: u8,
    },
    Steady,
    Exiting {
        since_ms: f64,
    },
}

/// State of one application's window slot
#[derive(Clone, Debug)]
pub struct Window {
    /// Owning application (identity, immutable)
    pub id: AppId,
    /// Whether the window exists, as opposed to fully closed
    pub is_open: bool,
    /// Temporarily hidden with state preserved
    pub is_minimized: bool,
    pub is_maximized: bool,
    /// Stacking order; the focused window holds the session maximum
    pub z_index: u32,
    /// Position and size while not maximized
    pub bounds: Rect,
    /// Bounds captured when maximizing, reapplied exactly on restore
    pub restore_bounds: Option<Rect>,
    /// Which virtual desktop owns this window
    pub desktop: DesktopId,
    /// Open-time payload, preserved across minimize/restore
    pub payload: AppPayload,
    /// Cached content snapshot for taskbar/task-view thumbnails
    pub preview: Option<Preview>,
    /// Animation lifecycle
    pub phase: Phase,
    /// Timestamp of the last preview capture, for throttling
    pub(crate) last_capture_ms: f64,
    /// Bumped on every state mutation; lets tests observe no-ops
    pub(crate) revision: u64,
}

impl Window {
    /// Create the closed slot for an application
    pub fn new(id: AppId) -> Self {
        Self {
            id,
            is_open: false,
            is_minimized: false,
            is_maximized: false,
            z_index: 1,
            bounds: id.default_bounds(),
            restore_bounds: None,
            desktop: 0,
            payload: AppPayload::None,
            preview: None,
            phase: Phase::Hidden,
            last_capture_ms: f64::NEG_INFINITY,
            revision: 0,
        }
    }

    /// Whether anything is mounted for this window
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Whether the enter transition has completed
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Steady
    }

    /// Whether the window still sits at its factory placement
    #[inline]
    pub fn at_default_bounds(&self) -> bool {
        self.bounds == self.id.default_bounds()
    }

    /// Mutation counter; unchanged revision means untouched state
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.revision += 1;
    }

    /// Advance the enter animation by one presented frame.
    /// Returns true when the window just became visible.
    pub(crate) fn frame_presented(&mut self) -> bool {
        if let Phase::Entering { frames } = self.phase {
            let frames = frames + 1;
            if frames >= ENTER_FRAME_COUNT {
                self.phase = Phase::Steady;
                self.touch();
                return true;
            }
            self.phase = Phase::Entering { frames };
            self.touch();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_window_is_closed_and_hidden() {
        let w = Window::new(AppId::Gallery);
        assert!(!w.is_open);
        assert!(!w.is_minimized);
        assert!(!w.is_rendered());
        assert!(w.at_default_bounds());
        assert_eq!(w.payload, AppPayload::None);
    }

    #[test]
    fn test_enter_needs_two_frames() {
        let mut w = Window::new(AppId::Gallery);
        w.phase = Phase::Entering { frames: 0 };

        assert!(!w.frame_presented());
        assert_eq!(w.phase, Phase::Entering { frames: 1 });
        assert!(!w.is_visible());

        assert!(w.frame_presented());
        assert_eq!(w.phase, Phase::Steady);
        assert!(w.is_visible());
    }

    #[test]
    fn test_frame_signal_ignored_outside_entering() {
        let mut w = Window::new(AppId::Gallery);
        w.phase = Phase::Steady;
        let before = w.revision();

        assert!(!w.frame_presented());
        assert_eq!(w.revision(), before);
    }
}
