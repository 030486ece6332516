//! Host scene/selection interface.
//!
//! Everything the annotation engine needs from the modeling host goes through
//! [`SceneHost`]. Element kinds arrive typed as [`ElementRef`]; nothing here
//! inspects names to decide what a component is.

use shared::{AnnotateError, AnnotationName, ElementKind, ElementRef};

/// Identifier returned by [`SceneHost::subscribe`]
pub type ListenerId = u64;

/// Events a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// Selection went from empty to non-empty
    SomethingSelected,
    /// Selection went from non-empty to empty
    NothingSelected,
    /// Selection contents changed
    SelectionChanged,
    /// A geometry edit moved, added or removed components
    GeometryChanged,
}

/// Event delivered to a subscribed listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostEvent {
    pub listener: ListenerId,
    pub kind: HostEventKind,
}

/// Failures reported by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// The element or node does not resolve
    Missing(String),
    /// The element exists but cannot be used for this query
    WrongKind { element: String, expected: ElementKind },
    /// A name is reserved by scene geometry
    NameTaken(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Missing(name) => write!(f, "'{}' not found", name),
            HostError::WrongKind { element, expected } => {
                write!(f, "'{}' is not a {}", element, expected.display_name())
            }
            HostError::NameTaken(name) => write!(f, "'{}' is already taken", name),
        }
    }
}

impl std::error::Error for HostError {}

impl From<HostError> for AnnotateError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::Missing(name) => AnnotateError::StaleReference(name),
            HostError::WrongKind { element, expected } => {
                AnnotateError::InvalidElementKind { element, expected }
            }
            HostError::NameTaken(name) => AnnotateError::NameCollision(name),
        }
    }
}

/// Capabilities the host scene must provide
pub trait SceneHost {
    /// Whether any polygon geometry exists in the scene
    fn has_geometry(&self) -> bool;

    /// Current selection, in selection order
    fn selection(&self) -> Vec<ElementRef>;

    /// Replace the selection
    fn set_selection(&mut self, elements: &[ElementRef]);

    /// Replace the selection with a single element
    fn select(&mut self, element: &ElementRef) {
        self.set_selection(std::slice::from_ref(element));
    }

    /// Convert an edge, face or vertex into its bounding vertices
    fn to_vertices(&self, element: &ElementRef) -> Result<Vec<ElementRef>, HostError>;

    /// World-space position of a vertex
    fn point_position(&self, element: &ElementRef) -> Result<[f64; 3], HostError>;

    /// Normal of a vertex as seen from one face
    fn vertex_face_normal(&self, element: &ElementRef) -> Result<[f64; 3], HostError>;

    /// Number of components of `kind` on an object
    fn count(&self, object: &str, kind: ElementKind) -> Result<usize, HostError>;

    fn subscribe(&mut self, kind: HostEventKind) -> ListenerId;

    /// Returns false if the listener was already gone
    fn unsubscribe(&mut self, listener: ListenerId) -> bool;

    /// Drain queued events for subscribed listeners
    fn poll_events(&mut self) -> Vec<HostEvent>;

    /// Create an annotation node named after `base_name`, pointing at `target`.
    /// Returns the unique node name the host assigned.
    fn create_annotation(
        &mut self,
        base_name: &str,
        anchor: [f64; 3],
        text: &str,
        target: &ElementRef,
    ) -> Result<AnnotationName, HostError>;

    /// Names of all annotation nodes currently in the scene
    fn annotation_names(&self) -> Vec<AnnotationName>;

    /// Delete a node by name. Returns false if nothing had that name.
    fn delete_node(&mut self, name: &str) -> bool;

    /// Rename a node, returning the unique name actually assigned
    fn rename_node(&mut self, name: &str, new_name: &str) -> Result<AnnotationName, HostError>;

    /// Whether `name` belongs to scene geometry
    fn is_geometry_name(&self, name: &str) -> bool;

    /// Undo the last scene edit. Returns false if there was nothing to undo.
    fn undo(&mut self) -> bool;
}
