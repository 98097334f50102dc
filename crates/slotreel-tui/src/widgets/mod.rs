mod popup;
mod reels;
mod status_bar;

pub use popup::{centered_rect, PopupWidget};
pub use reels::ReelsWidget;
pub use status_bar::StatusBarWidget;
