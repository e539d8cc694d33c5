//! Core business logic for the fundacja portal.

pub mod hero;
pub mod services;

pub use hero::{resolve_hero_media, HeroMedia};
pub use services::*;
