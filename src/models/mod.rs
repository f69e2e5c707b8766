pub mod document;
pub mod result;
pub mod section;

pub use document::{DocumentError, LegacyDocument, Paragraph};
pub use result::{ParsedProcedure, RevisionHistory};
pub use section::SectionNode;
