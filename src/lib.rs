//! Viewcast - channel statistics to view-count prediction.
//!
//! Viewcast collects channel statistics, derives a fixed feature vector, feeds
//! it to a pre-trained regression model, and returns the predicted view count
//! as a formatted display string. The presentation layer (web form, templates)
//! is an external collaborator: it calls [`service::PredictionService::handle`]
//! with seven named fields and renders whichever of prediction text or error
//! text comes back, alongside the valid channel list.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Viewcast                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  Boundary: PredictionService::handle | CLI                 │
//! ├────────────────────────────────────────────────────────────┤
//! │  Feature Builder: parse fields | log scaling | one-hot     │
//! ├────────────────────────────────────────────────────────────┤
//! │  Startup resources: Schema | Channel Registry | Model      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! All startup resources load once into an immutable context; a failed load
//! leaves the process running but permanently degraded, answering every
//! request with a fixed server-error message.
//!
//! # Quick Start
//!
//! ```no_run
//! use viewcast::config::ViewcastConfig;
//! use viewcast::features::PredictForm;
//! use viewcast::service::PredictionService;
//!
//! let service = PredictionService::load(&ViewcastConfig::development());
//!
//! let form = PredictForm {
//!     subscribers: "1000".into(),
//!     video_count: "50".into(),
//!     account_age: "2".into(),
//!     post_frequency_per_year: "10".into(),
//!     like_count: "500".into(),
//!     comment_count: "100".into(),
//!     channel_name: "CallMeShazzam TECH".into(),
//! };
//!
//! let outcome = service.handle(&form);
//! println!("{}", outcome.text);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod observability;
pub mod registry;
pub mod schema;
pub mod service;

// Re-exports
pub use error::{Result, ViewcastError};
