mod canvas;
mod font;
mod notice;
mod presenter;

pub use canvas::{Canvas, FrameBuffer, Rgba};
pub use font::TextStyle;
pub(crate) use notice::draw_notice;
pub use presenter::Presenter;
