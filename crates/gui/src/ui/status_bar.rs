use egui::Ui;

use crate::i18n::t;
use crate::reconciler::Phase;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let session = &state.session;
    ui.horizontal(|ui| {
        let (phase, color) = match session.phase() {
            Phase::Idle => (t("status.idle"), egui::Color32::from_rgb(160, 160, 160)),
            Phase::Active => (t("status.active"), egui::Color32::from_rgb(120, 210, 120)),
            Phase::Closed => (t("status.closed"), egui::Color32::from_rgb(200, 120, 120)),
        };
        ui.colored_label(color, phase);

        ui.separator();

        let selection = session.scene.selection_state();
        match selection.primary() {
            Some(primary) if selection.count() > 1 => {
                let more = selection.count() - 1;
                ui.label(format!("{}: {primary} (+{more})", t("status.selection")));
            }
            Some(primary) => {
                ui.label(format!("{}: {primary}", t("status.selection")));
            }
            None => {
                ui.weak(t("status.nothing"));
            }
        }

        ui.separator();
        ui.weak(format!("{}: {}", t("status.annotations"), session.annotations.len()));

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("PPC v0.1");
        });
    });
}
