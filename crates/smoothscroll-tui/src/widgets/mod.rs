mod pager;
mod status_bar;

pub use pager::PagerWidget;
pub use status_bar::StatusBarWidget;
