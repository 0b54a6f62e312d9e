//! Hosts file content helpers.

/// Entries every saved profile must carry, in check order.
pub const CANONICAL_ENTRIES: [&str; 3] = [
    "127.0.0.1 localhost",
    "255.255.255.255 broadcasthost",
    "::1 localhost",
];

fn without_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

/// Whether `content` contains `entry`, ignoring spaces on both sides.
pub fn contains_entry(content: &str, entry: &str) -> bool {
    without_spaces(content).contains(&without_spaces(entry))
}

/// Prepend each missing canonical entry as a new first line.
///
/// Presence is checked against the content as given, so the last entry
/// checked ends up on top when several are missing.
pub fn ensure_canonical_entries(content: &str) -> String {
    let mut updated = content.to_string();
    for entry in CANONICAL_ENTRIES {
        if !contains_entry(content, entry) {
            updated = format!("{entry}\n{updated}");
        }
    }
    updated
}
