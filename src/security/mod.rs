pub mod token_manager;

pub use token_manager::{GITHUB_TOKEN_ENV, SecureTokenManager};
