//! Repository identity guard
//!
//! Refuses to publish when the working directory's name differs from the
//! target repository name, which catches releasing from the wrong checkout
//! on machines that hold several.

use crate::core::error::ReleaseError;
use std::path::Path;

pub struct RepositoryGuard;

impl RepositoryGuard {
    /// Last path segment of `dir`, if it has one
    pub fn directory_name(dir: &Path) -> Option<String> {
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Compare the name of `dir` against `repo_name`
    ///
    /// # Examples
    ///
    /// ```
    /// use ghrelease::validation::RepositoryGuard;
    /// use std::path::Path;
    ///
    /// assert!(RepositoryGuard::check(Path::new("/src/ghrelease"), "ghrelease").is_ok());
    /// assert!(RepositoryGuard::check(Path::new("/src/other"), "ghrelease").is_err());
    /// ```
    pub fn check(dir: &Path, repo_name: &str) -> Result<(), ReleaseError> {
        let current = Self::directory_name(dir).unwrap_or_default();

        if current != repo_name {
            return Err(ReleaseError::GuardViolation {
                current,
                expected: repo_name.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_matching_directory() {
        let temp_dir = TempDir::new().unwrap();
        let checkout = temp_dir.path().join("ghrelease");
        std::fs::create_dir(&checkout).unwrap();

        assert!(RepositoryGuard::check(&checkout, "ghrelease").is_ok());
    }

    #[test]
    fn test_mismatched_directory() {
        let err = RepositoryGuard::check(Path::new("/home/dev/other-repo"), "ghrelease")
            .unwrap_err();

        match err {
            ReleaseError::GuardViolation { current, expected } => {
                assert_eq!(current, "other-repo");
                assert_eq!(expected, "ghrelease");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_separator_is_ignored() {
        assert!(RepositoryGuard::check(Path::new("/home/dev/ghrelease/"), "ghrelease").is_ok());
    }

    #[test]
    fn test_root_directory_never_matches() {
        assert_eq!(RepositoryGuard::directory_name(Path::new("/")), None);
        assert!(RepositoryGuard::check(Path::new("/"), "ghrelease").is_err());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert!(RepositoryGuard::check(Path::new("/src/GhRelease"), "ghrelease").is_err());
    }
}
