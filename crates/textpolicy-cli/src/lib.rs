//! Operator tooling around the casbin text adapter.
//!
//! # Purpose
//! Loads a casbin model and a policy text blob, then either enforces a single
//! request or prints the policy text as the adapter writes it back.
//!
//! # Important configuration
//! - `TEXTPOLICY_MODEL`, `TEXTPOLICY_POLICY`, `TEXTPOLICY_LOG` and an optional
//!   YAML file named by `TEXTPOLICY_CONFIG`; flags override both.
pub mod commands;
pub mod config;
pub mod observability;
