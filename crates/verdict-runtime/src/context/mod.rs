//! Evaluation context lookups
//!
//! A context is an object [`Value`](verdict_core::Value). DMN names may be
//! written with spaces, underscores or different casing, so lookups try a
//! fixed list of spellings before giving up.

mod field_lookup;

pub use field_lookup::{lookup_property, lookup_variable, property_variants, variable_variants};
