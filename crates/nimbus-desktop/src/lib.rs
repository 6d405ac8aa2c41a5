//! Window and desktop management for the Nimbus web desktop
//!
//! This crate is the shell core of a browser-hosted desktop
//! environment: the window state machine (open/close, minimize/restore,
//! maximize, focus, drag and resize, enter/exit animation phases), the
//! two-desktop workspace model, the task view overlay, and the task
//! manager view model.
//!
//! The shell is deliberately headless. It never reads a clock and never
//! draws: the host drives it with [`DesktopShell::tick`] and
//! [`DesktopShell::frame_presented`], feeds it pointer input, and
//! renders the [`WindowFrame`] snapshots it hands back. Synthetic
//! process tracking lives in the companion `nimbus-process` crate; the
//! shell registers windows and chrome there and honors the commands the
//! task manager broadcasts.

pub mod apps;
pub mod content;
pub mod desktop;
pub mod input;
pub mod math;
pub mod preview;
pub mod settings;
pub mod taskmgr;
pub mod taskview;
pub mod transition;
pub mod window;

mod engine;

pub use apps::{AppId, AppPayload, ChromeId};
pub use content::{AppCatalog, ContentProvider};
pub use desktop::{DesktopId, DESKTOP_COUNT};
pub use engine::{
    DesktopShell, ShellConfig, TaskbarButton, VisualState, WindowFrame,
};
pub use math::{Rect, Size, Vec2};
pub use preview::{CaptureError, NoCapture, Preview, PreviewCapture};
pub use settings::{SystemSettings, TaskbarPosition, TaskbarSettings, TASKBAR_HEIGHT};
pub use taskmgr::{ProcessGroups, TaskManager, HISTORY_LEN};
pub use taskview::{TaskView, TaskViewAction, TaskViewMenuItem};
pub use transition::{
    ENTER_FRAME_COUNT, PREVIEW_THROTTLE_MS, RESTART_DELAY_MS, WINDOW_ANIMATION_MS,
};
pub use window::{Phase, ResizeEdge, Window, WindowMap, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
