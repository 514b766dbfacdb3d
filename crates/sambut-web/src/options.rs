//! Page options passed from JS at mount time.

use sambut_core::PageConfig;

/// Resolve the optional JSON options string into a page configuration.
///
/// Absent or blank options give the defaults. Options that fail to parse or
/// validate are reported and replaced by the defaults, so a bad embed never
/// keeps the page from starting.
#[must_use]
pub fn page_config(options: Option<&str>) -> PageConfig {
    let Some(raw) = options.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring page options");
            PageConfig::default()
        }
    }
}
