//! Markdown display wrappers for terminal output.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers so every interface renders
//! them the same way. All output is markdown.
//!
//! - [`progress`]: [`StepProgress`] and [`ValidationReport`] for a session
//! - [`collections`]: [`EventSummaries`], [`DraftSummaries`]
//! - [`results`]: [`SubmitResult`] and the quote receipt
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//!
//! ```rust
//! use soiree_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Draft discarded");
//! assert_eq!(status.to_string(), "Success: Draft discarded\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod progress;
pub mod results;
pub mod status;

pub use collections::{DraftSummaries, EventSummaries};
pub use datetime::LocalDateTime;
pub use progress::{StepMarker, StepProgress, ValidationReport};
pub use results::SubmitResult;
pub use status::OperationStatus;
