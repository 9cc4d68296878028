//! # presenter-core: Declarative Projection Engine
//!
//! Shapes internal data models into output-ready presentations without
//! repeating the shaping logic at every call site. A [`Presenter`] declares:
//!
//! - **Custom attributes**: values computed from a record, which may depend
//!   on each other through the [`EvalContext`].
//! - **Strategies**: named rule sets (whitelist, blacklist, custom
//!   attributes to compute) selecting what a presentation contains.
//!
//! [`Presenter::present`] applies a named, inline, or default strategy to a
//! [`Model`]: absent, null, one record, or a collection of records.
//!
//! ```
//! use presenter_core::{Presenter, Strategy};
//! use serde_json::json;
//!
//! let presenter = Presenter::builder()
//!     .custom_attribute("fullName", |ctx| {
//!         Ok(json!(format!(
//!             "{} {}",
//!             ctx.attribute_str("firstName").unwrap_or_default(),
//!             ctx.attribute_str("lastName").unwrap_or_default()
//!         )))
//!     })
//!     .strategy("public", Strategy::new().blacklist(["ssn"]))
//!     .build();
//!
//! let person = json!({"firstName": "John", "lastName": "Smith", "ssn": "111-11-1111"});
//!
//! let public = presenter.present_value(Some(person.clone()), "public").unwrap();
//! assert_eq!(public, Some(json!({"firstName": "John", "lastName": "Smith"})));
//!
//! let full = presenter.present_value(Some(person), ()).unwrap().unwrap();
//! assert_eq!(full["fullName"], "John Smith");
//! ```
//!
//! ## Crate Policy
//!
//! - The engine never mutates models or presenters.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Errors are returned, never logged; `tracing` events are debug/trace only.

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod model;
pub mod presenter;
pub mod strategy;
pub mod template;

// Re-export primary types for ergonomic imports.
pub use config::PresenterConfig;
pub use context::{CustomAttribute, EvalContext};
pub use error::{ConfigError, PresentError};
pub use filter::AttributeFilter;
pub use model::{Model, Presentation, Record};
pub use presenter::{Presenter, PresenterBuilder};
pub use strategy::{ResolvedStrategy, Strategy, StrategyRef};
pub use template::Template;
