//! # Wine Review Narrative Library
//!
//! `wine_narrative` walks a viewer through a fixed sequence of scatter-plot
//! scenes built from a wine review dataset: from a welcome screen, through
//! average score vs. average price by country, province and region, down to
//! individual wineries under $200.
//!
//! ## Features
//!
//! - Lazy, memoized loading of the review dataset
//! - Tolerant parsing of numeric fields stored as numbers or strings
//! - Grouping and averaging with ordered hover tooltips
//! - Declarative scene catalogue with optional annotations
//! - Previous/next sequencing with render-then-commit semantics
//! - Bitmap rendering for the window and SVG export
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//! use wine_narrative::{config::NarrativeConfig, NarrativeApp};
//!
//! let config = NarrativeConfig::load().unwrap_or_default();
//! let app = Arc::new(Mutex::new(NarrativeApp::new(config)));
//! let app_wrapper = wine_narrative::app::AppWrapper { app };
//!
//! eframe::run_native(
//!     "Wine Narrative",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod plotting;
pub mod scenes;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as NarrativeApp;
pub use types::{GroupAggregate, Review, TooltipData};
