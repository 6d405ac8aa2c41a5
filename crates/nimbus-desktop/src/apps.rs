//! Application identity and open-time payloads

use serde::{Deserialize, Serialize};

use nimbus_process::ProcessId;

use crate::math::Rect;

/// The closed set of bundled applications.
///
/// Every window is addressed by one of these ids; the desktop holds
/// exactly one window slot per id for the lifetime of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    FileManager,
    TextEditor,
    PictureViewer,
    Gallery,
    ControlPanel,
    TaskManager,
    Help,
    About,
}

impl AppId {
    /// All application ids, in taskbar order
    pub const ALL: [AppId; 8] = [
        AppId::FileManager,
        AppId::TextEditor,
        AppId::PictureViewer,
        AppId::Gallery,
        AppId::ControlPanel,
        AppId::TaskManager,
        AppId::Help,
        AppId::About,
    ];

    /// Stable string form used in process ids
    pub fn slug(self) -> &'static str {
        match self {
            AppId::FileManager => "file_manager",
            AppId::TextEditor => "text_editor",
            AppId::PictureViewer => "picture_viewer",
            AppId::Gallery => "gallery",
            AppId::ControlPanel => "control_panel",
            AppId::TaskManager => "task_manager",
            AppId::Help => "help",
            AppId::About => "about",
        }
    }

    /// Resolve a slug back to an id
    pub fn from_slug(slug: &str) -> Option<AppId> {
        AppId::ALL.into_iter().find(|id| id.slug() == slug)
    }

    /// Registry id for this application's window
    pub fn process_id(self) -> ProcessId {
        ProcessId::app(self.slug())
    }

    /// Factory window bounds, staggered so freshly opened windows do not
    /// stack exactly on top of each other
    pub fn default_bounds(self) -> Rect {
        match self {
            AppId::FileManager => Rect::new(120.0, 120.0, 700.0, 460.0),
            AppId::TextEditor => Rect::new(220.0, 150.0, 640.0, 440.0),
            AppId::PictureViewer => Rect::new(300.0, 100.0, 640.0, 480.0),
            AppId::Gallery => Rect::new(150.0, 150.0, 720.0, 480.0),
            AppId::ControlPanel => Rect::new(180.0, 180.0, 620.0, 440.0),
            AppId::TaskManager => Rect::new(160.0, 140.0, 680.0, 460.0),
            AppId::Help => Rect::new(240.0, 160.0, 560.0, 400.0),
            AppId::About => Rect::new(200.0, 200.0, 520.0, 360.0),
        }
    }
}

/// Desktop chrome elements that register as `ui:` processes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeId {
    Taskbar,
    StartMenu,
    Desktop,
    TaskView,
}

impl ChromeId {
    /// All chrome ids
    pub const ALL: [ChromeId; 4] = [
        ChromeId::Taskbar,
        ChromeId::StartMenu,
        ChromeId::Desktop,
        ChromeId::TaskView,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChromeId::Taskbar => "taskbar",
            ChromeId::StartMenu => "start_menu",
            ChromeId::Desktop => "desktop",
            ChromeId::TaskView => "task_view",
        }
    }

    pub fn from_slug(slug: &str) -> Option<ChromeId> {
        ChromeId::ALL.into_iter().find(|id| id.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            ChromeId::Taskbar => "Taskbar Host",
            ChromeId::StartMenu => "Start Menu",
            ChromeId::Desktop => "Desktop Surface",
            ChromeId::TaskView => "Task View Host",
        }
    }

    /// Registry id for this chrome element
    pub fn process_id(self) -> ProcessId {
        ProcessId::ui(self.slug())
    }
}

/// Open-time payload attached to a window.
///
/// Each application variant carries only the fields that application
/// needs; the desktop never inspects the contents beyond deriving a
/// window title. The payload survives minimize/restore and is replaced
/// only when an open request supplies a new one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppPayload {
    #[default]
    None,
    /// A document for the text editor
    Document { path: String, file_name: String },
    /// An image for the picture viewer
    Picture { url: String, title: String },
}
