//! Detail overlay for the selected artwork

use eframe::egui;

use super::GalleryAction;
use crate::gui::constants::*;
use crate::types::Artwork;

pub fn ui(ctx: &egui::Context, artwork: &Artwork, is_favorite: bool, image_url: Option<String>) -> Option<GalleryAction> {
    let mut action = None;

    let modal = egui::Modal::new(egui::Id::new("artwork_detail")).show(ctx, |ui| {
        ui.set_max_width(DETAIL_MAX_WIDTH);

        if ui.button("Close").clicked() {
            action = Some(GalleryAction::CloseDetail);
        }
        ui.add_space(ITEM_SPACING);

        ui.label(egui::RichText::new(&artwork.title).size(22.0).strong());

        // No placeholder here, the image is simply left out
        if let Some(url) = image_url {
            ui.add_space(ITEM_SPACING);
            ui.add(
                egui::Image::from_uri(url)
                    .max_height(DETAIL_IMAGE_HEIGHT)
                    .max_width(ui.available_width())
                    .corner_radius(2.0 * THUMBNAIL_RADIUS),
            );
        }

        ui.add_space(PADDING);
        ui.label(artwork.artist_label());
        ui.label(artwork.date_label());
        ui.add_space(SECTION_SPACING);

        ui.horizontal(|ui| {
            let label = if is_favorite { "Remove Favorite" } else { "Add Favorite" };
            if ui.button(label).clicked() {
                action = Some(GalleryAction::ToggleFavoriteAndClose(artwork.clone()));
            }
            ui.add_space(2.0 * PADDING);
            if ui.button("Share").clicked() {
                action = Some(GalleryAction::Share(artwork.clone()));
            }
        });
    });

    // Escape or a click outside the overlay
    if action.is_none() && modal.should_close() {
        action = Some(GalleryAction::CloseDetail);
    }

    action
}
