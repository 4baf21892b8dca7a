pub mod core;
pub mod hosts;
pub mod orchestration;
pub mod security;
pub mod validation;

pub use crate::core::*;
pub use orchestration::{PublishReport, ReleasePublisher};
pub use security::SecureTokenManager;
pub use validation::RepositoryGuard;
