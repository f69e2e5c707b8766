pub mod capture;
pub mod classifier;
pub mod patterns;
pub mod revision;
pub mod sequence;
pub mod state;

pub use capture::{CaptureRole, NameCapture};
pub use classifier::parse_document;
pub use patterns::{normalize, strip_numeric_prefix, Patterns};
pub use sequence::{SequenceTracker, TOP_LEVEL_SEQUENCE};
pub use state::ParseState;
