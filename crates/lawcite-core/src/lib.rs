pub mod citation;
pub mod excerpt;

pub use citation::{CitationKind, CitationMention, annotate, detect};
pub use excerpt::{DEFAULT_EXCERPT_LEN, excerpt};
