// Widget renderers, one per dashboard zone.

pub mod competitor_form;
pub mod competitors;
pub mod profile;
pub mod search_bar;
pub mod status_bar;
pub mod video_panel;
