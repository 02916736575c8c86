use std::io::Write;

use assert_matches::assert_matches;
use rstest::rstest;

use super::*;

#[test]
fn test_load_defaults() {
    let settings = Settings::load(None, false).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.paging, PagingMode::Auto);
    assert_eq!(settings.pager.override_vars, vec!["GIT_PAGER", "PAGER"]);
    assert!(settings.pager.vcs_lookup);
    assert_eq!(
        settings.pager.candidates,
        vec!["less -r", "more -r", "most", "pg", "cat", "pager"]
    );
    assert!(settings.pager.env.is_empty());
    assert_eq!(
        settings.basic.prompt.as_deref(),
        Some(crate::paging::DEFAULT_PROMPT)
    );
    assert_eq!(settings.basic.width, None);
    assert_eq!(settings.basic.height, None);
}

#[test]
fn test_load_user_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
        paging = "never"

        [pager]
        vcs-lookup = false
        candidates = ["most"]

        [basic]
        prompt = "-- {{page}} --"
        height = 10
        "#
    )
    .unwrap();

    let settings = Settings::load(Some(file.path()), true).unwrap();
    assert_eq!(settings.paging, PagingMode::Never);
    assert!(!settings.pager.vcs_lookup);
    assert_eq!(settings.pager.candidates, vec!["most"]);
    assert_eq!(settings.pager.override_vars, vec!["GIT_PAGER", "PAGER"]);
    assert_eq!(settings.basic.prompt.as_deref(), Some("-- {page} --"));
    assert_eq!(settings.basic.height, Some(10));
    assert_eq!(settings.basic.width, None);
}

#[test]
fn test_load_missing_optional_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(Some(&dir.path().join("missing.toml")), false).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_missing_required_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::load(Some(&dir.path().join("missing.toml")), true);
    assert_matches!(result, Err(Error::Config(_)));
}

#[rstest]
#[case(PagingMode::Auto, true, true)]
#[case(PagingMode::Auto, false, false)]
#[case(PagingMode::Always, false, true)]
#[case(PagingMode::Never, true, false)]
fn test_paging_mode_enabled(#[case] mode: PagingMode, #[case] is_terminal: bool, #[case] expected: bool) {
    assert_eq!(mode.enabled(is_terminal), expected);
}
