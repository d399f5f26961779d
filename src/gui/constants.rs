//! GUI-specific constants for layout, colors and timing

use egui;

pub const WINDOW_TITLE: &str = "Virtual Art Gallery";

/// Window bounds
pub const WINDOW_MIN_WIDTH: f32 = 320.0;
pub const WINDOW_MIN_HEIGHT: f32 = 400.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// List entries
pub const THUMBNAIL_SIZE: f32 = 80.0;
pub const THUMBNAIL_RADIUS: f32 = 6.0;
pub const DETAIL_IMAGE_HEIGHT: f32 = 300.0;
pub const DETAIL_MAX_WIDTH: f32 = 420.0;
pub const ALERT_WIDTH: f32 = 280.0;
pub const FAVORITE_GLYPH: &str = "\u{2665}";
pub const FAVORITE_GLYPH_SIZE: f32 = 20.0;

/// Remaining scroll distance, in viewport heights, that counts as "near the end"
pub const END_REACHED_THRESHOLD: f32 = 0.5;

/// Colors
pub const FAVORITE_ON: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
pub const FAVORITE_OFF: egui::Color32 = egui::Color32::GRAY;
pub const PLACEHOLDER_FILL: egui::Color32 = egui::Color32::from_rgb(238, 238, 238);
pub const PLACEHOLDER_TEXT: egui::Color32 = egui::Color32::from_rgb(110, 110, 110);
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);

/// Transient status line lifetime
pub const STATUS_DURATION_MS: u64 = 2500;
