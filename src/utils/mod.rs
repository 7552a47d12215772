//! Utility modules for rt_rrt_star

pub mod svg;
pub mod visualization;

pub use svg::{render_svg, SvgRecorder};
pub use visualization::{colors, Output, PathStyle, Visualizer};
