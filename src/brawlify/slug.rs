//! URL slugs for brawler names.

/// Quote-like characters brawlify drops from its URLs.
const STRIPPED: [char; 4] = ['\u{2019}', '\'', '\u{2033}', '\u{201C}'];

/// Converts a display name into its URL slug, e.g. `"8-Bit"` → `"8-bit"`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-").chars().filter(|c| !STRIPPED.contains(c)).collect()
}
