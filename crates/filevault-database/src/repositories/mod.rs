//! Concrete repository implementations, one per aggregate.

pub mod category;
pub mod file;
pub mod user;
pub mod workspace;

pub use category::CategoryRepository;
pub use file::FileRepository;
pub use user::UserRepository;
pub use workspace::WorkspaceRepository;

/// Escape `%`, `_`, and `\` in a user-supplied search term so it matches
/// literally inside an ILIKE pattern.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
