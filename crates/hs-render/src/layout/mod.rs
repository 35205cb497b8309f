pub mod axes;
pub mod geometry;
pub mod legend;
pub mod multi_panel;
