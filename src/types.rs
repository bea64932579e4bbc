use serde::{Deserialize, Serialize};

/// Immutable catalog record a pair of cards is built from.
///
/// Two in-play cards sharing the same `id` form a matching pair; identity of
/// the record, never deck position, decides pair membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: u32,
    pub name: String,
    pub image_ref: String,
}

impl CardRecord {
    #[inline]
    pub fn new(id: u32, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}
