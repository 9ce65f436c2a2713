pub mod advisory;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod live;
pub mod math;
pub mod renderer;
pub mod report;
pub mod scoring;
pub mod types;

#[cfg(feature = "napi")]
mod bindings;

pub use config::AuditConfig;
pub use error::{AuditError, Result};
pub use types::{AuditSummary, Level, Rgb, SizeClass, TargetLevel, Violation};
