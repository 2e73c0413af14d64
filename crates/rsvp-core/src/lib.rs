//! Platform-free RSVP presentation engine.
//!
//! Text goes in through [`content::tokenize`], the [`app::Presenter`] walks
//! the resulting tokens on a caller-supplied clock, and renderers read
//! [`render::Frame`] snapshots back out. Nothing in this crate touches files,
//! terminals, or the system clock.

pub mod app;
pub mod bookmarks;
pub mod content;
pub mod error;
pub mod focus;
pub mod input;
pub mod pacing;
pub mod render;
pub mod settings;
pub mod text_policy;

pub use error::{EngineError, Result};
