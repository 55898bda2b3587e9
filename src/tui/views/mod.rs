mod popup;
mod timer;

pub use popup::draw_popups;
pub use timer::draw_timer;
