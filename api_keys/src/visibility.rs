use std::collections::HashSet;

use db::models::key::ApiKey;
use uuid::Uuid;

use crate::notice::Notice;

pub const MASK_CHAR: char = '•';
pub const VISIBLE_KEY_ADVISORY: &str =
    "Key visible - make sure nobody is looking at your screen";

/// Redacts the middle of a key for display: first 4 and last 4 characters
/// stay, at most 8 bullets in between. Keys shorter than 8 are returned as is.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return key.to_string();
    }
    let hidden = (chars.len() - 8).min(8);

    let mut masked: String = chars[..4].iter().collect();
    masked.extend(std::iter::repeat_n(MASK_CHAR, hidden));
    masked.extend(&chars[chars.len() - 4..]);
    masked
}

/// Ids of the keys currently shown unmasked.
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    visible: HashSet<Uuid>,
}

impl Visibility {
    /// Flips the key between masked and unmasked. Unmasking returns the
    /// security advisory; masking returns nothing.
    pub fn toggle(&mut self, key_id: Uuid) -> Option<Notice> {
        if self.visible.remove(&key_id) {
            None
        } else {
            self.visible.insert(key_id);
            Some(Notice::warning(VISIBLE_KEY_ADVISORY))
        }
    }

    pub fn is_visible(&self, key_id: &Uuid) -> bool {
        self.visible.contains(key_id)
    }

    pub fn forget(&mut self, key_id: &Uuid) {
        self.visible.remove(key_id);
    }

    /// The key as the list shows it.
    pub fn display(&self, record: &ApiKey) -> String {
        if self.is_visible(&record.id) {
            record.key.clone()
        } else {
            mask(&record.key)
        }
    }
}
