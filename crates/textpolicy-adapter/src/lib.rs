//! Casbin storage adapter backed by an in-memory policy text blob.
//!
//! # Purpose
//! Lets a casbin enforcer load its rules from a string and write them back to
//! a string, instead of a database or file.
//!
//! # How it fits
//! [`TextAdapter`] implements [`casbin::Adapter`]. Loading feeds each line to
//! the line codec, which inserts the rule into the caller's model through the
//! [`PolicyModel`] capability; saving reads the `p` and `g` sections back out.
//!
//! # Key invariants
//! - One rule per line: `<label>, <token1>, <token2>, ...`.
//! - Loading an empty blob fails with [`AdapterError::EmptyInput`].
//! - Incremental add/remove operations always fail with
//!   [`AdapterError::NotImplemented`].
//!
//! # Examples
//! ```rust
//! use textpolicy_adapter::{TextAdapter, rbac_model};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = rbac_model().await?;
//! let mut adapter = TextAdapter::new("p, alice, data1, read\ng, bob, alice");
//! adapter.load(&mut model)?;
//! adapter.save(&model)?;
//! assert_eq!(adapter.text(), "p, alice, data1, read\ng, bob, alice");
//! # Ok(())
//! # }
//! ```
//!
//! # Common pitfalls
//! - Tokens containing a comma or newline are not escaped and do not survive
//!   a round trip.

mod adapter;
mod casbin_model;
mod errors;
pub mod line;
mod model;

pub use adapter::TextAdapter;
pub use casbin_model::{rbac_model, rbac_model_string};
pub use errors::{AdapterError, AdapterResult};
pub use line::PolicyFilter;
pub use model::{LabelRules, PolicyModel};
