pub mod errors;
pub mod itinerary;
pub mod models;
pub mod prompts;
pub mod safety;
pub mod validation;

pub use errors::safe_error_message;
pub use itinerary::{classify, render, render_itinerary, DisplayBlock, Segment};
pub use models::*;
pub use safety::RiskLevel;
pub use validation::{FieldIssue, ValidationError};
