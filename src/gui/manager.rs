//! Gallery window implemented with egui/eframe

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{debug, info};

use super::components::artwork_list::{self, EndReachedTrigger, ListView};
use super::components::{GalleryAction, alert, detail_overlay, search_bar};
use super::constants::*;
use super::worker::CatalogWorker;
use crate::catalog::CatalogClient;
use crate::config::Settings;
use crate::favorites::FavoritesStore;
use crate::gallery::{Completion, GalleryController, LoadPhase};
use crate::types::Artwork;

struct StatusMessage {
    text: String,
    color: egui::Color32,
    shown_at: Instant,
}

struct GalleryApp {
    gallery: GalleryController,
    favorites: FavoritesStore,
    worker: CatalogWorker,
    image_base_url: String,
    image_width: u32,
    search_text: String,
    alert: Option<&'static str>,
    status_message: Option<StatusMessage>,
    end_trigger: EndReachedTrigger,
    scroll_to_top: bool,
}

impl GalleryApp {
    fn new(cc: &CreationContext<'_>, settings: &Settings, favorites: FavoritesStore, worker: CatalogWorker) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let mut app = Self::with_parts(settings, favorites, worker);
        app.start(&cc.egui_ctx);
        app
    }

    fn with_parts(settings: &Settings, favorites: FavoritesStore, worker: CatalogWorker) -> Self {
        info!(favorites = favorites.len(), "Initializing gallery window");
        Self {
            gallery: GalleryController::new(),
            favorites,
            worker,
            image_base_url: settings.image_base_url.clone(),
            image_width: settings.image_width,
            search_text: String::new(),
            alert: None,
            status_message: None,
            end_trigger: EndReachedTrigger::default(),
            scroll_to_top: false,
        }
    }

    /// Kick off the startup listing
    fn start(&mut self, ctx: &egui::Context) {
        let request = self.gallery.begin_initial_load();
        self.worker.dispatch(request, ctx);
    }

    /// The alert sits above everything; the overlay comes back once it is dismissed
    fn detail_visible(&self) -> bool {
        self.alert.is_none() && self.gallery.selected().is_some()
    }

    /// Feed finished requests into the controller
    fn process_responses(&mut self) {
        for (request, result) in self.worker.drain() {
            if let Completion::Replaced { .. } = self.gallery.complete(&request, result) {
                self.end_trigger.reset();
                self.scroll_to_top = true;
            }
        }
        if let Some(message) = self.gallery.take_alert() {
            self.alert = Some(message);
        }
    }

    fn apply(&mut self, action: GalleryAction, ctx: &egui::Context) {
        debug!(?action, "Applying gallery action");
        match action {
            GalleryAction::Search(text) => {
                let request = self.gallery.begin_search(&text);
                self.worker.dispatch(request, ctx);
            }
            GalleryAction::LoadMore => {
                if let Some(request) = self.gallery.begin_load_more() {
                    self.worker.dispatch(request, ctx);
                }
            }
            GalleryAction::OpenDetail(artwork) => self.gallery.open_detail(artwork),
            GalleryAction::CloseDetail => self.gallery.close_detail(),
            GalleryAction::ToggleFavorite(artwork) => {
                self.favorites.toggle(&artwork);
            }
            GalleryAction::ToggleFavoriteAndClose(artwork) => {
                self.favorites.toggle(&artwork);
                self.gallery.close_detail();
            }
            GalleryAction::Share(artwork) => self.share(ctx, &artwork),
            GalleryAction::DismissAlert => self.alert = None,
        }
    }

    /// Desktop stand-in for the system share sheet: copy to clipboard
    fn share(&mut self, ctx: &egui::Context, artwork: &Artwork) {
        let text = artwork.share_text();
        info!(id = artwork.id, "Sharing artwork");
        ctx.copy_text(text.clone());
        self.status_message = Some(StatusMessage {
            text: format!("Copied to clipboard: {text}"),
            color: STATUS_OK,
            shown_at: Instant::now(),
        });
    }

    fn expire_status(&mut self) {
        if let Some(status) = &self.status_message
            && status.shown_at.elapsed() >= Duration::from_millis(STATUS_DURATION_MS)
        {
            self.status_message = None;
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_responses();
        self.expire_status();

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(WINDOW_TITLE).size(26.0).strong());
            });
            if !self.favorites.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.weak(format!("{FAVORITE_GLYPH} {} saved", self.favorites.len()));
                });
            }
            ui.add_space(ITEM_SPACING);
            actions.extend(search_bar::ui(ui, &mut self.search_text));
            ui.add_space(ITEM_SPACING);
        });

        if let Some(status) = &self.status_message {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.colored_label(status.color, &status.text);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let phase = self.gallery.phase();
            if phase == LoadPhase::LoadingFirstPage {
                ui.vertical_centered(|ui| {
                    ui.add_space(2.0 * PADDING);
                    ui.add(egui::Spinner::new().size(32.0));
                });
                return;
            }

            let view = ListView {
                items: self.gallery.items(),
                favorites: &self.favorites,
                image_base_url: &self.image_base_url,
                image_width: self.image_width,
                loading_more: phase == LoadPhase::LoadingMore,
                scroll_to_top: self.scroll_to_top,
            };
            actions.extend(artwork_list::ui(ui, view, &mut self.end_trigger));
            self.scroll_to_top = false;
        });

        if self.detail_visible()
            && let Some(artwork) = self.gallery.selected()
        {
            let image_url = artwork.image_url(&self.image_base_url, self.image_width);
            let is_favorite = self.favorites.is_favorite(artwork.id);
            actions.extend(detail_overlay::ui(ctx, artwork, is_favorite, image_url));
        }

        if let Some(message) = self.alert {
            actions.extend(alert::ui(ctx, message));
        }

        for action in actions {
            self.apply(action, ctx);
        }

        if self.status_message.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(favorites = self.favorites.len(), "Gallery exiting");
    }
}

pub fn run_gui(settings: Settings, favorites: FavoritesStore) -> Result<()> {
    let client = CatalogClient::new(&settings.api_base_url, settings.request_timeout())
        .with_context(|| format!("Failed to create catalog client for '{}'", settings.api_base_url))?;
    let worker = CatalogWorker::new(client)?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width as f32, settings.window_height as f32])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, &settings, favorites, worker)))),
    )
    .map_err(|err| anyhow!("Failed to launch gallery window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::types::fixtures::artwork;
    use httpmock::prelude::*;

    fn app_for(server: &MockServer) -> GalleryApp {
        let settings = Settings {
            api_base_url: format!("{}/api/v1", server.base_url()),
            ..Settings::default()
        };
        let client = CatalogClient::new(&settings.api_base_url, Duration::from_secs(5)).unwrap();
        let worker = CatalogWorker::new(client).unwrap();
        let favorites = FavoritesStore::open(Box::new(MemoryStore::new()));
        GalleryApp::with_parts(&settings, favorites, worker)
    }

    /// Pump worker results until nothing is in flight
    fn settle(app: &mut GalleryApp) {
        for _ in 0..100 {
            app.process_responses();
            if !app.gallery.is_loading() {
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("catalog request never completed");
    }

    fn page_body(first_id: u64, count: u64) -> serde_json::Value {
        let data: Vec<_> = (first_id..first_id + count)
            .map(|id| serde_json::json!({ "id": id, "title": format!("Artwork {id}") }))
            .collect();
        serde_json::json!({ "data": data })
    }

    #[test]
    fn test_load_more_while_loading_dispatches_nothing() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).path("/api/v1/artworks").query_param("page", "1");
            then.status(200).delay(Duration::from_millis(100)).json_body(page_body(1, 20));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path("/api/v1/artworks").query_param("page", "2");
            then.status(200).json_body(page_body(21, 20));
        });

        let ctx = egui::Context::default();
        let mut app = app_for(&server);
        app.start(&ctx);
        app.apply(GalleryAction::LoadMore, &ctx);
        settle(&mut app);

        assert_eq!(app.gallery.items().len(), 20);
        assert_eq!(app.gallery.current_page(), 1);
        assert_eq!(first.hits(), 1);
        assert_eq!(second.hits(), 0);

        // Once idle the same intent goes through
        app.apply(GalleryAction::LoadMore, &ctx);
        settle(&mut app);
        assert_eq!(app.gallery.items().len(), 40);
        assert_eq!(app.gallery.current_page(), 2);
        assert_eq!(second.hits(), 1);
    }

    #[test]
    fn test_search_intent_replaces_items() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/artworks/search");
            then.status(200).json_body(page_body(500, 3));
        });

        let ctx = egui::Context::default();
        let mut app = app_for(&server);
        app.apply(GalleryAction::Search("monet".to_string()), &ctx);
        settle(&mut app);

        assert_eq!(app.gallery.query(), "monet");
        assert_eq!(app.gallery.items().len(), 3);
        assert!(app.scroll_to_top);
    }

    #[test]
    fn test_failed_load_raises_alert_until_dismissed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/api/v1/artworks");
            then.status(500);
        });

        let ctx = egui::Context::default();
        let mut app = app_for(&server);
        app.start(&ctx);
        settle(&mut app);
        assert_eq!(app.alert, Some("Failed to load artworks"));

        app.apply(GalleryAction::DismissAlert, &ctx);
        assert_eq!(app.alert, None);
    }

    #[test]
    fn test_toggle_favorite_and_close() {
        let server = MockServer::start();
        let ctx = egui::Context::default();
        let mut app = app_for(&server);
        let art = artwork(7);

        app.apply(GalleryAction::OpenDetail(art.clone()), &ctx);
        assert_eq!(app.gallery.selected(), Some(&art));

        app.apply(GalleryAction::ToggleFavoriteAndClose(art.clone()), &ctx);
        assert!(app.favorites.is_favorite(7));
        assert_eq!(app.gallery.selected(), None);
    }

    #[test]
    fn test_list_toggle_keeps_detail_state() {
        let server = MockServer::start();
        let ctx = egui::Context::default();
        let mut app = app_for(&server);

        app.apply(GalleryAction::ToggleFavorite(artwork(3)), &ctx);
        assert!(app.favorites.is_favorite(3));
        app.apply(GalleryAction::ToggleFavorite(artwork(3)), &ctx);
        assert!(!app.favorites.is_favorite(3));
        assert_eq!(app.gallery.selected(), None);
    }

    #[test]
    fn test_close_detail() {
        let server = MockServer::start();
        let ctx = egui::Context::default();
        let mut app = app_for(&server);

        app.apply(GalleryAction::OpenDetail(artwork(1)), &ctx);
        app.apply(GalleryAction::CloseDetail, &ctx);
        assert_eq!(app.gallery.selected(), None);
        assert!(!app.favorites.is_favorite(1));
    }

    #[test]
    fn test_share_shows_status_line() {
        let server = MockServer::start();
        let ctx = egui::Context::default();
        let mut app = app_for(&server);

        app.apply(GalleryAction::Share(artwork(5)), &ctx);
        let status = app.status_message.as_ref().unwrap();
        assert!(status.text.ends_with(&artwork(5).share_text()));
    }

    #[test]
    fn test_alert_hides_detail_overlay() {
        let server = MockServer::start();
        let ctx = egui::Context::default();
        let mut app = app_for(&server);

        app.apply(GalleryAction::OpenDetail(artwork(2)), &ctx);
        assert!(app.detail_visible());

        app.alert = Some("Failed to load artworks");
        assert!(!app.detail_visible());
        // Selection survives, the overlay returns after dismissal
        app.apply(GalleryAction::DismissAlert, &ctx);
        assert!(app.detail_visible());
        assert_eq!(app.gallery.selected(), Some(&artwork(2)));
    }
}
