//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::{AppState, ToolSettings};
use crate::ui::{controls, scene_tree, status_bar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct PpcApp {
    state: AppState,
    viewport: ViewportPanel,
}

impl PpcApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: ToolSettings,
        initial_meshes: Vec<shared::Mesh>,
    ) -> Self {
        styles::configure_styles(&cc.egui_ctx, settings.labels.font_size);

        let state = AppState::new(settings, initial_meshes);
        let mut viewport = ViewportPanel::new();
        viewport.frame_scene(state.session.scene.meshes());

        Self { state, viewport }
    }
}

impl eframe::App for PpcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::create_menu(ui, &mut self.state);
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: Scene tree ───────────────────────────
        if self.state.panels.scene_tree {
            egui::SidePanel::left("scene_tree")
                .default_width(220.0)
                .width_range(160.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    scene_tree::show(ui, &mut self.state);
                });
        }

        // ── Tool window ──────────────────────────────────────
        self.show_tool_window(ctx);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        // Deliver this frame's scene edits to the reconciler
        if self.state.session.pump().is_some() {
            ctx.request_repaint();
        }
    }
}

impl PpcApp {
    fn show_tool_window(&mut self, ctx: &egui::Context) {
        if !self.state.panels.tool_window {
            return;
        }
        let title = self.state.settings.window.title.clone();
        let size = [self.state.settings.window.width, self.state.settings.window.height];
        let mut open = true;
        egui::Window::new(title)
            .open(&mut open)
            .default_size(size)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                controls::show(ui, &mut self.state);
            });
        if !open {
            self.state.close_tool();
        }
    }
}
