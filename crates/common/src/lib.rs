//! Common utilities and shared types for the fundacja portal.
//!
//! This crate provides foundational components used across all portal crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Slugs**: URL-safe identifier derivation via [`slugify`]
//!
//! # Example
//!
//! ```no_run
//! use fundacja_common::{Config, IdGenerator, AppResult, slugify};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     let slug = slugify("Choroby mozgu: przewodnik");
//!     println!("{id} -> /{slug}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod slug;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use slug::{slug_or_derive, slugify};
