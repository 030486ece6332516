mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use ppc_gui_lib::fixtures;
pub use ppc_gui_lib::i18n;
pub use ppc_gui_lib::reconciler;
pub use ppc_gui_lib::state;
pub use ppc_gui_lib::surface;

use app::PpcApp;
use ppc_gui_lib::state::ToolSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ppc_gui=info,ppc_gui_lib=info".into()),
        )
        .init();

    let settings = ToolSettings::load();

    // Parse --scene <path> argument
    let initial_meshes = parse_scene_arg().unwrap_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PPC - Precision Pivot Control")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "ppc-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(PpcApp::new(cc, settings, initial_meshes)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_scene_arg() -> Option<Vec<shared::Mesh>> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--scene" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<Vec<shared::Mesh>>(&json) {
                    Ok(meshes) => {
                        tracing::info!("Loaded scene from {path} ({} meshes)", meshes.len());
                        return Some(meshes);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse scene JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read scene file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
