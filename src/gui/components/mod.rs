//! Gallery view components
//!
//! Components only read state and report what the user did; the app
//! applies the returned actions after the frame is laid out.

pub mod alert;
pub mod artwork_list;
pub mod detail_overlay;
pub mod search_bar;

use crate::types::Artwork;

/// User intents raised by components
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryAction {
    Search(String),
    LoadMore,
    OpenDetail(Artwork),
    CloseDetail,
    ToggleFavorite(Artwork),
    /// Detail overlay button: toggle, then close the overlay
    ToggleFavoriteAndClose(Artwork),
    Share(Artwork),
    DismissAlert,
}
