//! # rota-renderer
//!
//! Tera-based rendering of the weekly rotation announcement.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use rota_core::DutyAssignment;
//! use rota_renderer::{AnnouncementContext, Renderer};
//!
//! fn announce(date: NaiveDate, assignment: &DutyAssignment) {
//!     let ctx = AnnouncementContext::build(date, assignment, None, None);
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(text) = renderer.render(&ctx) {
//!             println!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{format_mentions, unmapped_names, AnnouncementContext};
pub use engine::{Renderer, WEEKLY_TEMPLATE};
pub use error::RenderError;
