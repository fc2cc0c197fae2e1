use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::DealerlotConfig;
use super::validation::validate_config;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".dealerlot.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str, path: &Path) -> Result<DealerlotConfig> {
    let config =
        toml::from_str::<DealerlotConfig>(contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

    validate_config(&config).map_err(|errors| {
        Error::configuration(format!("{}: {}", path.display(), errors.join("; ")))
    })?;

    Ok(config)
}

/// Load a config file the user named explicitly. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<DealerlotConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents, path)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config path.
///
/// A missing file yields `None` so the search continues upward. A file that
/// exists but is broken yields defaults with a warning.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DealerlotConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents, config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            Some(DealerlotConfig::default())
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking up
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and up to nine parents for `.dealerlot.toml`.
pub fn discover_config(start: &Path) -> DealerlotConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DealerlotConfig::default()
        })
}

pub fn load_config() -> DealerlotConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DealerlotConfig::default()
        }
    }
}

/// Explicit path wins; otherwise discover from the current directory.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DealerlotConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_discover_config_in_parent() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            indoc! {r#"
                [storefront]
                page_size = 12
            "#},
        )
        .unwrap();
        let nested = root.path().join("lot").join("east");
        fs::create_dir_all(&nested).unwrap();

        let config = discover_config(&nested);
        assert_eq!(config.page_size(), 12);
    }

    #[test]
    fn test_discovered_invalid_config_falls_back() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[storefront]\npage_size = 0\n",
        )
        .unwrap();
        assert_eq!(discover_config(root.path()), DealerlotConfig::default());
    }

    #[test]
    fn test_explicit_invalid_config_is_error() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        fs::write(&path, "[price]\nmin = 5000\nmax = 1000\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_explicit_unparsable_config_is_error() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.toml");
        fs::write(&path, "[storefront\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let root = TempDir::new().unwrap();
        let err = load_config_from(&root.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_financing_section() {
        let root = TempDir::new().unwrap();
        let path = root.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            indoc! {r#"
                [financing]
                default_apr = 6.99
                default_term = 48
                terms = [24, 48]

                [[financing.tiers]]
                id = "prime"
                label = "Prime"
                score_min = 720
                apr = 5.99
            "#},
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.financing.default_apr, 6.99);
        assert_eq!(config.financing.terms, vec![24, 48]);
        assert_eq!(config.financing.tiers.len(), 1);
        assert_eq!(config.financing.default_price, 20_000.0);
    }
}
