//! Lifecycle hooks for the release workflow
//!
//! Users can run opaque shell commands at key points:
//! - pre-version / post-version: around the version-file write
//! - pre-commit / post-commit: around the release commit

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, HookType};
