//! Modal error dialog for the generic load failure

use eframe::egui;

use super::GalleryAction;
use crate::gui::constants::{ALERT_WIDTH, ITEM_SPACING};

pub fn ui(ctx: &egui::Context, message: &str) -> Option<GalleryAction> {
    let mut action = None;

    let modal = egui::Modal::new(egui::Id::new("load_failed_alert")).show(ctx, |ui| {
        ui.set_max_width(ALERT_WIDTH);
        ui.heading("Error");
        ui.add_space(ITEM_SPACING);
        ui.label(message);
        ui.add_space(ITEM_SPACING);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                action = Some(GalleryAction::DismissAlert);
            }
        });
    });

    // Escape or a click on the backdrop
    if action.is_none() && modal.should_close() {
        action = Some(GalleryAction::DismissAlert);
    }

    action
}
