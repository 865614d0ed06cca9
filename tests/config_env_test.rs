//! Environment overrides for Settings.
//!
//! Kept in its own test binary: it mutates process environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use votenav::config::Settings;

#[test]
fn given_env_vars_when_loading_then_override_files() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    fs::write(
        &local,
        "tree_file = \"/trees/file.toml\"\nselector_height = \"10\"\n",
    )
    .unwrap();

    env::set_var("VOTENAV_TREE_FILE", "/trees/env.toml");
    env::set_var("VOTENAV_SHOW_OUTCOME_IDS", "false");

    let result = Settings::load_from(None, Some(&local));

    env::remove_var("VOTENAV_TREE_FILE");
    env::remove_var("VOTENAV_SHOW_OUTCOME_IDS");

    let settings = result.expect("load settings");
    assert_eq!(settings.tree_file, Some(PathBuf::from("/trees/env.toml")));
    assert!(!settings.show_outcome_ids);
    assert_eq!(settings.selector_height, "10");
}
