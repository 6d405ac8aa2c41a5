//! Virtual desktop (workspace) model
//!
//! Exactly two desktops exist. Each window belongs to one; switching the
//! current desktop changes which subset of windows is rendered, never
//! the windows themselves.

/// Index of a virtual desktop
pub type DesktopId = u8;

/// Number of virtual desktops
pub const DESKTOP_COUNT: u8 = 2;

/// Whether an index names a valid desktop
#[inline]
pub fn is_valid_desktop(desktop: DesktopId) -> bool {
    desktop < DESKTOP_COUNT
}
