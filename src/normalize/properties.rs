//! Flat `dotted.key=value` configuration parsing

use super::tree::{insert_path, ConfigTree};
use tracing::debug;

/// Builds a nested tree from properties text. Blank lines and `#` comments
/// are ignored; lines without `=` or with an empty key are dropped silently.
pub fn parse_tree(content: &str) -> ConfigTree {
    let mut tree = ConfigTree::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            skipped += 1;
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            skipped += 1;
            continue;
        }

        let segments: Vec<&str> = key.split('.').collect();
        insert_path(&mut tree, &segments, value.trim().to_string());
    }

    if skipped > 0 {
        debug!(skipped, "Dropped properties lines without a key/value separator");
    }

    tree
}
