use std::path::{Path, PathBuf};

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tilde_when_expanding_then_home_prefix() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/trees/tree.toml"));
        assert!(expanded.starts_with(&home));
    }

    #[test]
    fn given_unknown_variable_when_expanding_then_unchanged() {
        assert_eq!(
            expand_env_vars("$VOTENAV_SURELY_UNSET_VAR/x"),
            "$VOTENAV_SURELY_UNSET_VAR/x"
        );
    }
}
