//! Search box: submitting with Enter starts a new search

use eframe::egui;

use super::GalleryAction;

pub fn ui(ui: &mut egui::Ui, text: &mut String) -> Option<GalleryAction> {
    let response = ui.add(
        egui::TextEdit::singleline(text)
            .hint_text("Search artworks...")
            .desired_width(f32::INFINITY),
    );

    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    submitted.then(|| GalleryAction::Search(text.clone()))
}
