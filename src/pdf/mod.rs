//! PDF document access

mod document;

pub use document::MupdfDocument;
