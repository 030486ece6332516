//! Keyboard shortcut handling

use eframe::egui;

use crate::reconciler::Trigger;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (undo, escape, reload, frame) = ctx.input(|i| {
        (
            i.modifiers.command && i.key_pressed(egui::Key::Z),
            i.key_pressed(egui::Key::Escape),
            i.key_pressed(egui::Key::R) && !i.modifiers.command,
            i.key_pressed(egui::Key::F) && !i.modifiers.command,
        )
    });

    if undo {
        state.session.trigger(Trigger::Undo);
    }
    if escape {
        state.session.scene.clear_selection();
    }
    if reload {
        state.session.trigger(Trigger::Reload);
    }
    if frame {
        viewport.frame_scene(state.session.scene.meshes());
    }
}
