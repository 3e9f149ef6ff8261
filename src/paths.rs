//! Maps source URLs onto the local tree and creates the directories they need.
//!
//! The mapping is a literal substring transform: the domain prefix of the
//! source URL is replaced by the root directory and the remainder is kept
//! verbatim, percent-escapes and query strings included.

use crate::error::RowError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Computes the destination path of `source_url` under `root`
///
/// `source_url` must already start with `domain`. Empty and `.` segments are
/// dropped; `..` is refused so the result always stays under `root`.
pub fn map_destination(source_url: &str, domain: &str, root: &Path) -> Result<PathBuf, RowError> {
    let remainder = source_url.strip_prefix(domain).unwrap_or(source_url);

    let mut destination = root.to_path_buf();
    let mut has_file_name = false;
    for segment in remainder.split('/') {
        match segment {
            "" | "." => has_file_name = false,
            ".." => {
                return Err(RowError::PathOutsideRoot {
                    source_url: source_url.to_string(),
                });
            }
            name => {
                destination.push(name);
                has_file_name = true;
            }
        }
    }

    if !has_file_name {
        return Err(RowError::MissingFileName {
            source_url: source_url.to_string(),
        });
    }

    Ok(destination)
}

/// Directory names between `root` and the file name of `destination`
pub fn directory_segments(root: &Path, destination: &Path) -> Vec<String> {
    let Ok(relative) = destination.strip_prefix(root) else {
        return Vec::new();
    };

    let mut segments = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>();
    segments.pop();
    segments
}

/// Creates every missing directory of `segments` under `root`, parents first
///
/// Existing directories are left alone, so repeated calls are harmless.
/// Returns the directories that were actually created.
pub fn materialize(root: &Path, segments: &[String]) -> Result<Vec<PathBuf>, RowError> {
    let mut path = root.to_path_buf();
    let mut created = Vec::new();

    for segment in segments {
        path.push(segment);

        if path.exists() {
            continue;
        }

        ::log::info!("Creating directory {}", path.display());
        match fs::create_dir(&path) {
            Ok(()) => created.push(path.clone()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(RowError::DirectoryCreate { path, source });
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOMAIN: &str = "https://example.com";

    #[test]
    fn test_maps_domain_to_root() {
        let path =
            map_destination("https://example.com/img/a.png", DOMAIN, Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/work/img/a.png"));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let root = Path::new("/work");
        let first = map_destination("https://example.com/a/b/c.webp", DOMAIN, root).unwrap();
        let second = map_destination("https://example.com/a/b/c.webp", DOMAIN, root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remainder_kept_verbatim() {
        let path = map_destination(
            "https://example.com/img/my%20pic.png?v=2",
            DOMAIN,
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/work/img/my%20pic.png?v=2"));
    }

    #[test]
    fn test_file_at_root_has_no_directories() {
        let root = Path::new("/work");
        let path = map_destination("https://example.com/logo.png", DOMAIN, root).unwrap();

        assert_eq!(path, PathBuf::from("/work/logo.png"));
        assert!(directory_segments(root, &path).is_empty());
    }

    #[test]
    fn test_missing_file_name() {
        let root = Path::new("/work");
        assert!(matches!(
            map_destination("https://example.com", DOMAIN, root),
            Err(RowError::MissingFileName { .. })
        ));
        assert!(matches!(
            map_destination("https://example.com/img/", DOMAIN, root),
            Err(RowError::MissingFileName { .. })
        ));
    }

    #[test]
    fn test_parent_segments_refused() {
        assert!(matches!(
            map_destination("https://example.com/../etc/passwd", DOMAIN, Path::new("/work")),
            Err(RowError::PathOutsideRoot { .. })
        ));
    }

    #[test]
    fn test_prefix_without_separator_stays_under_root() {
        let path =
            map_destination("https://example.com.evil/x.png", DOMAIN, Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/work/.evil/x.png"));
    }

    #[test]
    fn test_directory_segments() {
        let root = Path::new("/work");
        let segments = directory_segments(root, Path::new("/work/img/thumbs/a.png"));
        assert_eq!(segments, vec!["img", "thumbs"]);
    }

    #[test]
    fn test_materialize_creates_parents_first() {
        let root = TempDir::new().unwrap();
        let segments = vec!["img".to_string(), "thumbs".to_string()];

        let created = materialize(root.path(), &segments).unwrap();

        assert_eq!(
            created,
            vec![root.path().join("img"), root.path().join("img/thumbs")]
        );
        assert!(root.path().join("img/thumbs").is_dir());
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let root = TempDir::new().unwrap();
        let segments = vec!["img".to_string(), "thumbs".to_string()];

        materialize(root.path(), &segments).unwrap();
        let created = materialize(root.path(), &segments).unwrap();

        assert!(created.is_empty());
        assert!(root.path().join("img/thumbs").is_dir());
    }

    #[test]
    fn test_materialize_skips_existing_parent() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("img")).unwrap();

        let created =
            materialize(root.path(), &["img".to_string(), "new".to_string()]).unwrap();
        assert_eq!(created, vec![root.path().join("img/new")]);
    }

    #[test]
    fn test_materialize_reports_failures() {
        let root = TempDir::new().unwrap();
        // A file in the way makes the child directory impossible to create
        fs::write(root.path().join("img"), b"not a dir").unwrap();

        let result = materialize(root.path(), &["img".to_string(), "thumbs".to_string()]);
        assert!(matches!(result, Err(RowError::DirectoryCreate { .. })));
    }

    #[test]
    fn test_materialize_nothing_to_do() {
        let root = TempDir::new().unwrap();
        assert!(materialize(root.path(), &[]).unwrap().is_empty());
    }
}
