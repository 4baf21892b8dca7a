pub mod repository_guard;

pub use repository_guard::RepositoryGuard;
