//! # ngxschema-filter — Module Filter
//!
//! Trims a generated schema document down to the directives of the nginx
//! modules actually compiled into a given build.
//!
//! - **Module table** (`modules.rs`): every known module with its
//!   prerequisites. Prerequisites are other modules or one of the groups
//!   `@default`, `@optional` and `@commercial`.
//!
//! - **Retained set** (`filter.rs`): resolves include/exclude lists of
//!   modules and groups into the set of module names to keep.
//!
//! - **Document filter** (`filter.rs`): drops definitions and property
//!   references of every module outside the retained set.
//!
//! ## Crate Policy
//!
//! - Depends only on `ngxschema-schema` internally.
//! - `core` is always retained.
//! - Excludes take precedence over includes.

pub mod error;
pub mod filter;
pub mod modules;

pub use error::FilterError;
pub use filter::{filter_modules, filter_schema, load_document, module_names};
pub use modules::{is_group, prerequisites, ModuleSpec, COMMERCIAL_GROUP, DEFAULT_GROUP, MODULES, OPTIONAL_GROUP};
