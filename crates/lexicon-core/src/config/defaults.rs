pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_resource_dir() -> String {
    "resources/language".to_string()
}
pub(super) fn default_base_locale() -> String {
    "en_gb".to_string()
}
