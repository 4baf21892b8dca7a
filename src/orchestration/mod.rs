//! Orchestration layer for release publishing

pub mod release_publisher;

pub use release_publisher::{PublishReport, ReleasePublisher, TARGET_COMMITISH};
