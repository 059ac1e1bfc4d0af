pub mod layout;
pub mod svg;

pub use layout::{bar_segments, Layout, Segment, SegmentLabel};
pub use svg::{escape_attr, escape_text, render_svg};
