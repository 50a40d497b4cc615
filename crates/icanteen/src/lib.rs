// ABOUTME: Library entry point for the iCanteen food menu extractor.
// ABOUTME: Re-exports the public API: Extractor, ExtractorBuilder, Options, Menu/Day/Dish and ExtractError.

//! Extracts the food menu published on iCanteen login pages.
//!
//! iCanteen deployments render one of several HTML layouts. The [`Extractor`]
//! fetches the page, tries every known [`Layout`] newest first, drops
//! incomplete entries and returns a [`Menu`], or an [`ExtractError`] whose
//! [`ErrorCode`] tells an unpublished menu apart from a parse or network failure.
//!
//! # Example
//!
//! ```no_run
//! use icanteen_extractor::{ExtractError, Extractor};
//!
//! fn main() -> Result<(), ExtractError> {
//!     let extractor = Extractor::builder()
//!         .user_agent("my-canteen-bot/1.0")
//!         .timeout_ms(2000)
//!         .build();
//!
//!     let menu = extractor.extract("https://strav.nasejidelna.cz/0051/login")?;
//!     for day in &menu {
//!         println!("{}", day.date());
//!         for dish in day.dishes() {
//!             println!("- {} ({}): {}", dish.name(), dish.place(), dish.description());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extractor;
pub mod layouts;
pub mod menu;
pub mod normalize;
pub mod options;
pub mod resource;
pub mod verify;

pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractor::Extractor;
pub use crate::layouts::Layout;
pub use crate::menu::{Day, Dish, Menu};
pub use crate::normalize::normalize_description;
pub use crate::options::{ExtractorBuilder, Options};
pub use crate::resource::{FetchError, FetchOptions, Fetcher, HttpFetcher};

/// Version of this library, e.g. for building a User-Agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
