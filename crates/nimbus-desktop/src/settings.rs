//! Session settings read at shell construction
//!
//! Persisted preferences live outside this crate; the shell only reads
//! the fields that influence layout: the taskbar edge and auto-hide
//! flag decide the maximize work area and the direction minimized
//! windows animate toward. Everything else passes through untouched.

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};

/// Height of the taskbar chrome in pixels
pub const TASKBAR_HEIGHT: f32 = 48.0;

/// Which screen edge the taskbar occupies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskbarPosition {
    Top,
    #[default]
    Bottom,
}

/// How taskbar icons are laid out along the bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskbarAlignment {
    Start,
    #[default]
    Center,
}

/// Taskbar layout preferences
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskbarSettings {
    #[serde(default)]
    pub position: TaskbarPosition,
    #[serde(default)]
    pub auto_hide: bool,
    #[serde(default)]
    pub alignment: TaskbarAlignment,
}

/// Session-wide settings snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    #[serde(default)]
    pub wallpaper: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub taskbar: TaskbarSettings,
}

impl TaskbarSettings {
    /// Screen area available to maximized windows.
    ///
    /// With auto-hide the bar reserves nothing; otherwise the bar's edge
    /// is subtracted from the screen.
    pub fn work_area(&self, screen: Size) -> Rect {
        if self.auto_hide {
            return Rect::new(0.0, 0.0, screen.width, screen.height);
        }
        match self.position {
            TaskbarPosition::Top => {
                Rect::new(0.0, TASKBAR_HEIGHT, screen.width, screen.height - TASKBAR_HEIGHT)
            }
            TaskbarPosition::Bottom => {
                Rect::new(0.0, 0.0, screen.width, screen.height - TASKBAR_HEIGHT)
            }
        }
    }

    /// Vertical offset a minimizing window animates toward: off-screen
    /// past whichever edge holds the taskbar.
    pub fn minimize_offset_y(&self, screen: Size, window_height: f32) -> f32 {
        match self.position {
            TaskbarPosition::Top => -window_height,
            TaskbarPosition::Bottom => screen.height,
        }
    }
}
