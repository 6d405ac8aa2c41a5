//! Application content collaborator
//!
//! The desktop hosts application content but never interprets it; this
//! trait is the narrow contract it consumes content through.

use crate::apps::{AppId, AppPayload};

/// Provider of renderable application content.
///
/// `node_count` is the observable complexity proxy the metrics sampler
/// feeds on: roughly "how many live widgets does this app's content
/// currently hold".
pub trait ContentProvider {
    /// Display name for an application
    fn label(&self, id: AppId) -> &str;

    /// Current content-node count for an open application
    fn node_count(&self, id: AppId) -> u32;

    /// Payload an application starts with when opened without one
    fn default_payload(&self, id: AppId) -> AppPayload {
        let _ = id;
        AppPayload::None
    }
}

/// Built-in catalog of the bundled applications.
///
/// Node counts are static per-app estimates; a richer host can report
/// live numbers instead.
#[derive(Default)]
pub struct AppCatalog;

impl ContentProvider for AppCatalog {
    fn label(&self, id: AppId) -> &str {
        match id {
            AppId::FileManager => "File Manager",
            AppId::TextEditor => "Text Editor",
            AppId::PictureViewer => "Picture Viewer",
            AppId::Gallery => "Gallery",
            AppId::ControlPanel => "Control Panel",
            AppId::TaskManager => "Task Manager",
            AppId::Help => "Help",
            AppId::About => "About",
        }
    }

    fn node_count(&self, id: AppId) -> u32 {
        match id {
            AppId::FileManager => 220,
            AppId::TextEditor => 160,
            AppId::PictureViewer => 90,
            AppId::Gallery => 240,
            AppId::ControlPanel => 180,
            AppId::TaskManager => 260,
            AppId::Help => 120,
            AppId::About => 60,
        }
    }
}
