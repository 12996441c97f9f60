//! Core data models for keyhold

pub mod records;

pub use records::RecordCollection;
