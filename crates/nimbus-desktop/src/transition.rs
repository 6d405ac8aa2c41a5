//! Animation timing constants
//!
//! These durations are shared between the window state machine and
//! whatever renders the transitions; changing one side without the other
//! desynchronizes unmount from the visual exit.

/// Duration of window enter/exit and minimize transitions in
/// milliseconds. Exiting windows stay rendered this long after close so
/// the exit animation can play; the task view uses the same grace period
/// for its deferred unmount.
pub const WINDOW_ANIMATION_MS: f64 = 300.0;

/// Delay between a restart command's stop and its revive
pub const RESTART_DELAY_MS: f64 = 2_000.0;

/// Minimum spacing between preview captures of one window
pub const PREVIEW_THROTTLE_MS: f64 = 1_000.0;

/// Paint signals an entering window waits for before its transition
/// starts. Two frames guarantee the pre-transition state was committed;
/// one frame risks the transition starting from the target state and
/// never becoming visible.
pub const ENTER_FRAME_COUNT: u8 = 2;
