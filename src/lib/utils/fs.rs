use std::path::{Component, Path, PathBuf};

/// Makes *path* absolute against *base* (when it's relative) and collapses the
/// `.` and `..` components without touching the filesystem, so paths that
/// do not exist yet can still be resolved
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_are_joined_to_the_base() {
        assert_eq!(
            absolutize(Path::new("svc"), Path::new("/opt")),
            PathBuf::from("/opt/svc")
        );
    }

    #[test]
    fn test_dots_are_collapsed() {
        assert_eq!(
            absolutize(Path::new("./a/../svc/."), Path::new("/opt")),
            PathBuf::from("/opt/svc")
        );
        assert_eq!(
            absolutize(Path::new("/../../srv"), Path::new("/ignored")),
            PathBuf::from("/srv")
        );
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        assert_eq!(
            absolutize(Path::new("/opt/svc/"), Path::new("/")),
            PathBuf::from("/opt/svc")
        );
    }
}
