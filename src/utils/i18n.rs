use tracing::warn;

/// Locales shipped in `locales/`
pub const SUPPORTED_LOCALES: &[&str] = &["en"];

/// Switch user-facing strings to `locale`, falling back to English when unknown
pub fn set_locale(locale: &str) {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unsupported locale '{}', using en", locale);
        rust_i18n::set_locale("en");
    }
}
