//! UI toolkit side of the engine: which view the tool window shows and the
//! short advisory messages surfaced to the user.

use shared::{DisplayMode, ElementKind};

/// Which content the tool window shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolView {
    /// Static message shown while nothing usable is selected
    Idle(String),
    /// Mode toggles, precision, rename and action buttons
    Controls,
    /// Window was closed and the session torn down
    Closed,
}

/// Advisory messages raised by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    NoGeometry,
    SelectKind(ElementKind),
    NothingPlaced(DisplayMode),
    NameTaken,
    InvalidName,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::NoGeometry => write!(f, "Please create and select polygon object to begin"),
            Advisory::SelectKind(kind) => write!(f, "Please select: {}", kind.display_name()),
            Advisory::NothingPlaced(mode) => {
                write!(f, "No {} annotations could be placed", mode.display_name())
            }
            Advisory::NameTaken => {
                write!(f, "Please select another name, this is already taken by mesh.")
            }
            Advisory::InvalidName => write!(f, "Please enter a name for the annotations."),
        }
    }
}

/// Collaborator that displays what the engine decides
pub trait ToolSurface {
    fn show_view(&mut self, view: ToolView);
    fn advise(&mut self, advisory: Advisory);
    /// Drop advisories that no longer describe the current state
    fn clear_advisories(&mut self);
}

/// Tool window model shared by the egui front end and the headless harness
#[derive(Debug, Clone)]
pub struct ToolPanel {
    view: ToolView,
    advisories: Vec<Advisory>,
}

impl Default for ToolPanel {
    fn default() -> Self {
        Self {
            view: ToolView::Idle(Advisory::NoGeometry.to_string()),
            advisories: Vec::new(),
        }
    }
}

impl ToolPanel {
    pub fn view(&self) -> &ToolView {
        &self.view
    }

    /// Advisories raised since the last pass started, oldest first
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn last_advisory(&self) -> Option<&Advisory> {
        self.advisories.last()
    }
}

impl ToolSurface for ToolPanel {
    fn show_view(&mut self, view: ToolView) {
        self.view = view;
    }

    fn advise(&mut self, advisory: Advisory) {
        tracing::info!("{advisory}");
        self.advisories.push(advisory);
    }

    fn clear_advisories(&mut self) {
        self.advisories.clear();
    }
}
