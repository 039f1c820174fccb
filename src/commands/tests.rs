use super::*;
use lexicon_core::config::Config;
use std::path::PathBuf;

fn resources() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/language")
}

fn config_for(dir: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.catalog.resource_dir = dir.to_string_lossy().to_string();
    cfg
}

fn shipped() -> Registry {
    load_registry(&config_for(&resources())).unwrap()
}

/// Copy the shipped catalogs into a fresh temp directory.
fn scratch_resources(name: &str) -> PathBuf {
    let tmp = std::env::temp_dir().join(format!("__lexicon_cmd_test_{name}__"));
    let _ = std::fs::remove_dir_all(&tmp);
    for tag in ["en_gb", "pt_br"] {
        let folder = tmp.join(format!("resource.language.{tag}"));
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::copy(
            resources().join(format!("resource.language.{tag}/strings.po")),
            folder.join("strings.po"),
        )
        .unwrap();
    }
    tmp
}

#[test]
fn test_check_passes_for_shipped_catalogs() {
    let report = check(&shipped());
    assert!(report.passed, "{}", report.text);
    assert!(report.text.contains("Base locale: en_gb"));
    assert!(report.text.contains("Loaded: en_gb, pt_br"));
    assert!(report.text.contains("pt_br: 23/25 translated (92.0%)"));
    assert!(report.text.contains("missing: #32066"));
    assert!(report.text.contains("untranslated: #32064"));
}

#[test]
fn test_check_fails_on_placeholder_mismatch() {
    let tmp = scratch_resources("check_mismatch");
    let pt = tmp.join("resource.language.pt_br/strings.po");
    let text = std::fs::read_to_string(&pt)
        .unwrap()
        .replace("\"{} está sendo desligado.\"", "\"Desligando.\"");
    std::fs::write(&pt, text).unwrap();

    let report = check(&load_registry(&config_for(&tmp)).unwrap());
    assert!(!report.passed);
    assert!(report.text.contains("placeholder mismatch: #32070"), "{}", report.text);

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_check_fails_on_unloadable_catalog() {
    let tmp = scratch_resources("check_failure");
    let folder = tmp.join("resource.language.de_de");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("strings.po"), "msgid \"\"\nmsgstr \"\n").unwrap();

    let report = check(&load_registry(&config_for(&tmp)).unwrap());
    assert!(!report.passed);
    assert!(report.text.contains("de_de: FAILED"), "{}", report.text);
    assert!(report.text.contains("1 catalog(s) failed to load"));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_get_renders_in_locale_and_base() {
    let registry = shipped();
    let args = vec!["Server1".to_string()];
    assert_eq!(
        get(&registry, None, 32070, None, &args, false).unwrap(),
        "Server1 is shutting down."
    );
    assert_eq!(
        get(&registry, Some("pt_br"), 32070, None, &args, false).unwrap(),
        "Server1 está sendo desligado."
    );
    assert_eq!(
        get(&registry, Some("pt_br"), 32070, None, &args, true).unwrap(),
        "Server1 esta sendo desligado."
    );
}

#[test]
fn test_get_reports_errors() {
    let registry = shipped();
    assert!(get(&registry, Some("pt_br"), 39999, None, &[], false).is_err());
    assert!(get(&registry, Some("pt_br"), 32070, None, &[], false).is_err());
}

#[test]
fn test_get_with_count_uses_plural_path() {
    let registry = shipped();
    let args = vec!["Sala".to_string()];
    assert_eq!(
        get(&registry, Some("pt_br"), 32060, Some(3), &args, false).unwrap(),
        "Não foi possível conectar a Sala."
    );
}

#[test]
fn test_fmt_is_stable_for_shipped_catalog() {
    let path = resources().join("resource.language.pt_br/strings.po");
    let formatted = fmt(&path).unwrap();
    assert!(formatted.starts_with("# Kodi Media Center language file\n"));
    assert!(formatted.contains("msgctxt \"#32070\"\nmsgid \"{} is shutting down.\"\n"));

    let tmp = std::env::temp_dir().join("__lexicon_cmd_test_fmt__");
    let _ = std::fs::remove_dir_all(&tmp);
    let folder = tmp.join("resource.language.pt_br");
    std::fs::create_dir_all(&folder).unwrap();
    let copy = folder.join("strings.po");
    std::fs::write(&copy, &formatted).unwrap();
    assert_eq!(fmt(&copy).unwrap(), formatted);

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_export_is_id_to_template_map() {
    let json = export(&shipped(), "pt_br").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let map = value.as_object().expect("export should be a JSON object");
    assert_eq!(map.len(), 24);
    assert_eq!(map["32000"], "Emby");
    assert_eq!(map["32070"], "{} está sendo desligado.");
    // Untranslated entries export their source text.
    assert_eq!(
        map["32064"],
        "Do you really want to force a full synchronization?"
    );
}

#[test]
fn test_export_unknown_locale() {
    assert!(export(&shipped(), "fr_fr").is_err());
}
