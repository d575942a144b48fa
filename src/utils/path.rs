use std::{
    env,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "versionbump.toml";
pub const DEFAULT_VERSION_FILE: &str = "src/version.inc";

/// Returns the current working directory, falling back to `.`.
pub fn get_cwd() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns true if `dir` holds a `versionbump.toml` or a `src/version.inc`.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join(CONFIG_FILE).is_file() || dir.join(DEFAULT_VERSION_FILE).is_file()
}

/// Walks upward from `start` to locate the first directory considered a project root.
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|ancestor| is_project_root(ancestor))
        .map(Path::to_path_buf)
}

/// Project root for `start`, or `start` itself when no marker is found.
pub fn project_root_or(start: &Path) -> PathBuf {
    find_project_root_from(start).unwrap_or_else(|| start.to_path_buf())
}

/// Joins `path` onto `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_root_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join(DEFAULT_VERSION_FILE), "").unwrap();
        let nested = root.join("build").join("release");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root_from(&nested).as_deref(), Some(root));
    }

    #[test]
    fn config_file_marks_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        assert!(is_project_root(tmp.path()));
    }

    #[test]
    fn relative_paths_join_base() {
        let base = Path::new("/work/project");
        assert_eq!(
            resolve_against(base, Path::new("include/version.inc")),
            PathBuf::from("/work/project/include/version.inc")
        );
        assert_eq!(
            resolve_against(base, Path::new("/abs/version.inc")),
            PathBuf::from("/abs/version.inc")
        );
    }
}
