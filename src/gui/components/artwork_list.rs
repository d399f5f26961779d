//! Scrolling artwork list with infinite-scroll trigger

use eframe::egui;

use super::GalleryAction;
use crate::favorites::FavoritesStore;
use crate::gui::constants::*;
use crate::types::Artwork;

/// Everything the list needs for one frame
pub struct ListView<'a> {
    pub items: &'a [Artwork],
    pub favorites: &'a FavoritesStore,
    pub image_base_url: &'a str,
    pub image_width: u32,
    pub loading_more: bool,
    pub scroll_to_top: bool,
}

/// Fires once per list length while the viewport sits near the end.
/// Moving away from the end re-arms it, so the user can retry by scrolling.
#[derive(Debug, Default)]
pub struct EndReachedTrigger {
    fired_at_len: Option<usize>,
}

impl EndReachedTrigger {
    pub fn check(&mut self, near_end: bool, len: usize) -> bool {
        if !near_end || len == 0 {
            self.fired_at_len = None;
            return false;
        }
        if self.fired_at_len == Some(len) {
            return false;
        }
        self.fired_at_len = Some(len);
        true
    }

    pub fn reset(&mut self) {
        self.fired_at_len = None;
    }
}

/// True when the unseen content below the viewport is at most
/// `threshold` viewport heights (content shorter than the viewport counts)
pub fn near_end(offset: f32, viewport_height: f32, content_height: f32, threshold: f32) -> bool {
    let remaining = content_height - (offset + viewport_height);
    remaining <= viewport_height * threshold
}

pub fn ui(ui: &mut egui::Ui, view: ListView<'_>, trigger: &mut EndReachedTrigger) -> Vec<GalleryAction> {
    let mut actions = Vec::new();

    let mut area = egui::ScrollArea::vertical().auto_shrink([false, false]);
    if view.scroll_to_top {
        area = area.vertical_scroll_offset(0.0);
    }

    let output = area.show(ui, |ui| {
        for (index, artwork) in view.items.iter().enumerate() {
            // Index, not artwork id: pages may repeat ids
            ui.push_id(index, |ui| {
                let image_url = artwork.image_url(view.image_base_url, view.image_width);
                card(ui, artwork, view.favorites.is_favorite(artwork.id), image_url, &mut actions);
            });
            ui.add_space(ITEM_SPACING / 2.0);
        }

        if view.loading_more {
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new());
            });
        }
    });

    let near = near_end(
        output.state.offset.y,
        output.inner_rect.height(),
        output.content_size.y,
        END_REACHED_THRESHOLD,
    );
    if trigger.check(near, view.items.len()) {
        actions.push(GalleryAction::LoadMore);
    }

    actions
}

fn card(ui: &mut egui::Ui, artwork: &Artwork, is_favorite: bool, image_url: Option<String>, actions: &mut Vec<GalleryAction>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            if thumbnail(ui, image_url).clicked() {
                actions.push(GalleryAction::OpenDetail(artwork.clone()));
            }
            ui.add_space(PADDING);

            ui.vertical(|ui| {
                // Leave room for the favorite glyph
                ui.set_max_width((ui.available_width() - 2.0 * FAVORITE_GLYPH_SIZE).max(0.0));
                let title = ui.add(
                    egui::Label::new(egui::RichText::new(&artwork.title).strong().size(16.0))
                        .sense(egui::Sense::click())
                        .wrap(),
                );
                if title.clicked() {
                    actions.push(GalleryAction::OpenDetail(artwork.clone()));
                }
                ui.weak(artwork.artist_or_unknown());
                ui.small(artwork.date_or_unknown());
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if favorite_button(ui, is_favorite).clicked() {
                    actions.push(GalleryAction::ToggleFavorite(artwork.clone()));
                }
            });
        });
    });
}

/// Remote image, or a "No Image" placeholder when the artwork has none
fn thumbnail(ui: &mut egui::Ui, image_url: Option<String>) -> egui::Response {
    let size = egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    match image_url {
        Some(url) => ui.add(
            egui::Image::from_uri(url)
                .fit_to_exact_size(size)
                .corner_radius(THUMBNAIL_RADIUS)
                .sense(egui::Sense::click()),
        ),
        None => {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            let painter = ui.painter();
            painter.rect_filled(rect, THUMBNAIL_RADIUS, PLACEHOLDER_FILL);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No Image",
                egui::FontId::proportional(12.0),
                PLACEHOLDER_TEXT,
            );
            response
        }
    }
}

/// Heart glyph, red when favorited
pub fn favorite_button(ui: &mut egui::Ui, is_favorite: bool) -> egui::Response {
    let color = if is_favorite { FAVORITE_ON } else { FAVORITE_OFF };
    let hover = if is_favorite { "Remove from favorites" } else { "Add to favorites" };
    ui.add(
        egui::Button::new(egui::RichText::new(FAVORITE_GLYPH).size(FAVORITE_GLYPH_SIZE).color(color))
            .frame(false),
    )
    .on_hover_text(hover)
}
