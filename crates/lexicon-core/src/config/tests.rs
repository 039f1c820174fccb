use super::*;

#[test]
fn test_defaults_when_sections_missing() {
    let cfg = parse("").unwrap();
    assert_eq!(cfg.lexicon.log_level, "info");
    assert_eq!(cfg.catalog.resource_dir, "resources/language");
    assert_eq!(cfg.catalog.base_locale, "en_gb");
    assert!(!cfg.catalog.ascii_fold);
}

#[test]
fn test_catalog_section_from_toml() {
    let toml_str = r#"
        [lexicon]
        log_level = "debug"

        [catalog]
        resource_dir = "/opt/addon/resources/language"
        base_locale = "en_us"
        ascii_fold = true
    "#;
    let cfg = parse(toml_str).unwrap();
    assert_eq!(cfg.lexicon.log_level, "debug");
    assert_eq!(cfg.catalog.resource_dir, "/opt/addon/resources/language");
    assert_eq!(cfg.catalog.base_locale, "en_us");
    assert!(cfg.catalog.ascii_fold);
}

#[test]
fn test_partial_catalog_section_keeps_defaults() {
    let cfg = parse("[catalog]\nascii_fold = true\n").unwrap();
    assert!(cfg.catalog.ascii_fold);
    assert_eq!(cfg.catalog.base_locale, "en_gb");
}

#[test]
fn test_empty_base_locale_rejected() {
    let err = parse("[catalog]\nbase_locale = \"  \"\n").unwrap_err();
    assert!(matches!(err, LexiconError::Config(_)));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = parse("[catalog\nbase_locale = 1").unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__lexicon_test__/config.toml").unwrap();
    assert_eq!(cfg.catalog.base_locale, "en_gb");
}

#[test]
fn test_load_from_file() {
    let tmp = std::env::temp_dir().join("__lexicon_test_config_load__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("config.toml");
    std::fs::write(&path, "[catalog]\nbase_locale = \"pt_br\"\n").unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.catalog.base_locale, "pt_br");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("resources/language"), "resources/language");
}
