//! Artwork record type

use serde::Deserialize;

use super::RecordKey;

/// One artwork record from the catalog.
///
/// Field names match the artworks API so records deserialize straight off
/// the wire. The catalog is sparse: every display field can be null or
/// absent, and the browser renders missing values as blanks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artwork {
    /// Stable unique identifier of the artwork.
    pub id: i64,
    /// Title of the work.
    #[serde(default)]
    pub title: Option<String>,
    /// Where the work was produced.
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Artist attribution as displayed by the museum.
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscriptions on the work, if recorded.
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// Earliest year of creation.
    #[serde(default)]
    pub date_start: Option<i32>,
    /// Latest year of creation.
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl RecordKey for Artwork {
    fn key(&self) -> i64 {
        self.id
    }
}
