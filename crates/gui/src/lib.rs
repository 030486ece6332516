// Library crate: exposes the annotation engine, the in-memory host and the
// headless harness for integration tests and the JSON command interface.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod annotations;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod host;
pub mod i18n;
pub mod reconciler;
pub mod sampler;
pub mod session;
pub mod state;
pub mod surface;
