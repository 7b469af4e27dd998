//! DecisionEngine - Main API for evaluating decision models
//!
//! The module is organized into:
//! - `engine`: the `DecisionEngine` registry of decisions and BKMs
//! - `loader`: model document loading and load-time AST caching
//! - `tests`: Unit tests (test-only)

mod engine;
mod loader;

pub use engine::DecisionEngine;

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
