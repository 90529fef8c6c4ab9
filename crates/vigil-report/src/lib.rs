pub mod render;
pub mod sink;

pub use render::render_html;
pub use sink::write_report;
