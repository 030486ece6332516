//! PPC tool window: mode checkboxes, precision slider, rename field and
//! action buttons, or the idle advisory while nothing usable is selected.

use egui::Ui;
use shared::{DisplayMode, Precision};

use crate::i18n::{mode_label, t};
use crate::reconciler::Trigger;
use crate::state::AppState;
use crate::surface::{ToolSurface, ToolView};

const ADVISORY: egui::Color32 = egui::Color32::from_rgb(255, 180, 80);

pub fn show(ui: &mut Ui, state: &mut AppState) {
    match state.session.panel.view().clone() {
        ToolView::Idle(message) => {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(message);
            });
        }
        ToolView::Controls => show_controls(ui, state),
        // the window is hidden once closed; View > Tool window reopens it
        ToolView::Closed => {}
    }

    if let Some(advisory) = state.session.panel.last_advisory() {
        ui.separator();
        ui.colored_label(ADVISORY, advisory.to_string());
    }
}

/// Clear the previous advisory and forward an action to the session
fn fire(state: &mut AppState, trigger: Trigger) {
    state.session.panel.clear_advisories();
    state.session.trigger(trigger);
}

fn show_controls(ui: &mut Ui, state: &mut AppState) {
    // Two rows of four: whole-object modes, then single-component modes
    egui::Grid::new("ppc_modes")
        .num_columns(4)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            for (i, mode) in DisplayMode::ALL.into_iter().enumerate() {
                let mut on = state.session.reconciler.toggles().is_on(mode);
                if ui.checkbox(&mut on, mode_label(mode)).changed() {
                    fire(state, Trigger::Toggle { mode, on });
                }
                if i % 4 == 3 {
                    ui.end_row();
                }
            }
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(t("tool.precision"));
        let mut digits = state.session.reconciler.precision().digits();
        let slider = egui::Slider::new(&mut digits, Precision::MIN..=Precision::MAX);
        if ui.add(slider).changed() {
            fire(state, Trigger::Precision(Precision::new(digits)));
        }
    });

    ui.horizontal(|ui| {
        ui.label(t("tool.rename"));
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.rename_text)
                .hint_text(t("tool.rename_hint"))
                .desired_width(160.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            let text = state.rename_text.clone();
            fire(state, Trigger::Rename(text));
        }
    });

    ui.horizontal(|ui| {
        if ui.button(t("tool.reload")).clicked() {
            fire(state, Trigger::Reload);
        }
        if ui.button(t("tool.delete")).clicked() {
            fire(state, Trigger::DeleteAll);
        }
        if ui
            .add_enabled(state.session.scene.can_undo(), egui::Button::new(t("tool.undo")))
            .clicked()
        {
            fire(state, Trigger::Undo);
        }
    });
}
