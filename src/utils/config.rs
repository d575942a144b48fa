use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{Result, VersionError};
use crate::utils::path::{self, CONFIG_FILE, DEFAULT_VERSION_FILE};

pub const DEFAULT_PREFIX: &str = "LC0";

#[derive(Debug, Deserialize, Default)]
struct VersionSection {
    file: Option<PathBuf>,
    prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigDoc {
    version: Option<VersionSection>,
}

/// Where the version file lives and how its macros are named.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub file: PathBuf,
    pub prefix: String,
}

/// Resolves the store location.
///
/// ### Parameters
/// - `cwd`: directory the search for a project root starts from.
/// - `file_override`: `--file` / `VERSIONBUMP_FILE`, relative to `cwd`.
///
/// The config file is still parsed when an override is given, so a broken
/// `versionbump.toml` fails every run in that project.
///
pub fn resolve(cwd: &Path, file_override: Option<&Path>) -> Result<StoreConfig> {
    let root = path::project_root_or(cwd);
    let section = load_section(&root.join(CONFIG_FILE))?;

    let prefix = section
        .prefix
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let file = match (file_override, section.file) {
        (Some(f), _) => path::resolve_against(cwd, f),
        (None, Some(f)) => path::resolve_against(&root, &f),
        (None, None) => root.join(DEFAULT_VERSION_FILE),
    };

    Ok(StoreConfig { file, prefix })
}

fn load_section(config_path: &Path) -> Result<VersionSection> {
    if !config_path.is_file() {
        return Ok(VersionSection::default());
    }
    let text = fs::read_to_string(config_path).map_err(|e| VersionError::Config {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let doc: ConfigDoc = toml::from_str(&text).map_err(|e| VersionError::Config {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(doc.version.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config() {
        let tmp = TempDir::new().unwrap();
        let cfg = resolve(tmp.path(), None).unwrap();
        assert_eq!(cfg.file, tmp.path().join(DEFAULT_VERSION_FILE));
        assert_eq!(cfg.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn config_file_sets_path_and_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[version]\nfile = \"include/ver.inc\"\nprefix = \"MYAPP\"\n",
        )
        .unwrap();
        let nested = tmp.path().join("sub");
        fs::create_dir_all(&nested).unwrap();

        let cfg = resolve(&nested, None).unwrap();
        assert_eq!(cfg.file, tmp.path().join("include/ver.inc"));
        assert_eq!(cfg.prefix, "MYAPP");
    }

    #[test]
    fn override_wins_over_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[version]\nfile = \"include/ver.inc\"\n",
        )
        .unwrap();
        let cfg = resolve(tmp.path(), Some(Path::new("other.inc"))).unwrap();
        assert_eq!(cfg.file, tmp.path().join("other.inc"));
    }

    #[test]
    fn invalid_config_is_an_error_with_override() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[version]\nprefix = [").unwrap();
        let err = resolve(tmp.path(), Some(Path::new("custom.inc"))).unwrap_err();
        assert!(matches!(err, VersionError::Config { .. }));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[version\nfile = 3").unwrap();
        let err = resolve(tmp.path(), None).unwrap_err();
        assert!(matches!(err, VersionError::Config { .. }));
    }
}
