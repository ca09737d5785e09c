//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::Date;

/// A persisted blog entry.
///
/// `image` is the relative path of the stored cover image under the image
/// storage root; it stays valid until the row is deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub image: String,
    pub is_active: bool,
}
