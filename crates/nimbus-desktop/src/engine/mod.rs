//! Desktop shell coordinating all components
//!
//! This module is split into focused submodules:
//! - `windows`: window lifecycle operations and taskbar dispatch
//! - `input`: pointer drag/resize handling
//! - `commands`: command-channel handling and restart revives
//! - `lifecycle`: tick, frame signals, metrics and chrome registration
//! - `rendering`: per-frame snapshots for the rendering host

mod commands;
mod input;
mod lifecycle;
mod rendering;
mod windows;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use nimbus_process::{
    CommandInbox, ProcessId, ProcessKind, ProcessRegistry, ProcessSpec, SamplerPool,
};

use crate::apps::{AppId, ChromeId};
use crate::content::ContentProvider;
use crate::desktop::DesktopId;
use crate::input::InputRouter;
use crate::math::Size;
use crate::preview::PreviewCapture;
use crate::settings::SystemSettings;
use crate::taskview::TaskView;
use crate::window::WindowMap;

pub use commands::ReviveTarget;
pub use rendering::{TaskbarButton, VisualState, WindowFrame};

/// Construction parameters for the shell
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Screen dimensions in pixels
    pub screen: Size,
    /// Session settings snapshot read at start
    pub settings: SystemSettings,
    /// Seed for placement scatter and metric noise
    pub seed: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            settings: SystemSettings::default(),
            seed: 0,
        }
    }
}

pub(crate) struct PendingRevive {
    pub target: ReviveTarget,
    pub due_ms: f64,
}

/// The desktop shell: owner of the window map, the active-window
/// pointer, and desktop/taskbar coordination.
///
/// All window and chrome mutation flows through this type; other
/// components reach it either by calling its operations directly or by
/// broadcasting on the process registry's command channel, which the
/// shell drains on every [`tick`](DesktopShell::tick).
pub struct DesktopShell {
    /// All window slots and the active pointer
    pub windows: WindowMap,
    /// Live drag/resize state
    pub input: InputRouter,
    /// Task view overlay state
    pub task_view: TaskView,

    pub(crate) current_desktop: DesktopId,
    pub(crate) screen: Size,
    pub(crate) settings: SystemSettings,
    pub(crate) start_menu_open: bool,
    pub(crate) chrome_disabled: HashSet<ChromeId>,
    pub(crate) chrome_registered: HashSet<ChromeId>,

    pub(crate) content: Box<dyn ContentProvider>,
    pub(crate) capture: Box<dyn PreviewCapture>,
    pub(crate) registry: Arc<ProcessRegistry>,
    pub(crate) samplers: SamplerPool,
    pub(crate) inbox: CommandInbox,
    pub(crate) pending_revives: Vec<PendingRevive>,
    /// Window revisions as of the last metrics sample, per process id
    pub(crate) sampled_revisions: HashMap<ProcessId, u64>,
    pub(crate) rng: SmallRng,
}

impl DesktopShell {
    /// Create a shell and register the kernel process.
    ///
    /// The shell is constructed by the session's composition root, which
    /// owns the registry and passes it in; nothing here is a global.
    pub fn new(
        registry: Arc<ProcessRegistry>,
        content: Box<dyn ContentProvider>,
        capture: Box<dyn PreviewCapture>,
        config: ShellConfig,
        now_ms: f64,
    ) -> Self {
        let inbox = registry.command_inbox();
        let mut samplers = SamplerPool::new(config.seed);

        registry.register(ProcessSpec::new(
            ProcessId::kernel(),
            "Nimbus Kernel",
            ProcessKind::Kernel,
        ));
        samplers.activate(ProcessId::kernel(), ProcessKind::Kernel, now_ms);

        let mut shell = Self {
            windows: WindowMap::new(),
            input: InputRouter::new(),
            task_view: TaskView::new(),
            current_desktop: 0,
            screen: config.screen,
            settings: config.settings,
            start_menu_open: false,
            chrome_disabled: HashSet::new(),
            chrome_registered: HashSet::new(),
            content,
            capture,
            registry,
            samplers,
            inbox,
            pending_revives: Vec::new(),
            sampled_revisions: HashMap::new(),
            rng: SmallRng::seed_from_u64(config.seed),
        };
        shell.reconcile_chrome(now_ms);
        shell
    }

    /// The desktop currently being rendered
    #[inline]
    pub fn current_desktop(&self) -> DesktopId {
        self.current_desktop
    }

    /// Screen dimensions
    #[inline]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Update the screen dimensions after the host window resized.
    /// Maximized geometry is derived at render time, so maximized
    /// windows pick the new work area up immediately.
    pub fn resize(&mut self, screen: Size) {
        self.screen = screen;
    }

    /// Settings snapshot the shell was constructed with
    #[inline]
    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    /// Whether the start menu is open
    #[inline]
    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    /// Open or close the start menu
    pub fn set_start_menu_open(&mut self, open: bool, now_ms: f64) {
        if self.start_menu_open != open {
            self.start_menu_open = open;
            self.reconcile_chrome(now_ms);
        }
    }

    /// Whether a chrome element is enabled (not stopped via command)
    #[inline]
    pub fn chrome_enabled(&self, chrome: ChromeId) -> bool {
        !self.chrome_disabled.contains(&chrome)
    }

    /// Display title for a window, derived from its payload where the
    /// application carries a document or image
    pub fn window_title(&self, id: AppId) -> String {
        use crate::apps::AppPayload;
        let window = self.windows.get(id);
        match (id, &window.payload) {
            (AppId::PictureViewer, AppPayload::Picture { title, .. }) => {
                format!("Viewer - {}", title)
            }
            (AppId::TextEditor, AppPayload::Document { file_name, .. }) => {
                format!("Editor - {}", file_name)
            }
            _ => self.content.label(id).to_string(),
        }
    }
}
