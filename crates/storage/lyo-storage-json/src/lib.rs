//! Lyo JSON Storage
//!
//! File-backed [`AvatarRepository`](lyo_companion_core::AvatarRepository)
//! storing each avatar under its own directory as plain JSON documents.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use lyo_companion_core;

pub mod json;

pub use json::JsonFileRepository;
