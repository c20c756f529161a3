//! Local JSON Stores
//!
//! Flat-file storage for quotes (read-only) and notes (read-write).

mod notes;
mod quotes;

pub use notes::NoteStore;
pub use quotes::{Quote, QuoteStore};
