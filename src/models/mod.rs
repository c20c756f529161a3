//! Request and Response models for the dashboard API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddNoteRequest, CacheParams, SearchParams};
pub use responses::{
    DashboardResponse, ErrorResponse, HealthResponse, NoteDeletedResponse, NotesResponse,
    QuoteResponse, QuotesResponse, StatsResponse, VisitsResponse,
};
