mod classify;
mod render;
mod segment;

pub use classify::{classify, classify_line, Rule, RULES};
pub use render::{render, render_itinerary, to_plain_text, BlockKind, DisplayBlock, Icon};
pub use segment::{IconHint, Segment, SegmentKind};
