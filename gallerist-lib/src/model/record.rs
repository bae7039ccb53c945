//! Record identity

/// Identity seam for catalog records.
///
/// Two records are the same entity iff their keys are equal. The selection
/// machinery compares records by key only and is otherwise agnostic to a
/// record's fields, so any keyed type can flow through the browser.
pub trait RecordKey {
    /// Returns the record's stable unique identifier.
    fn key(&self) -> i64;
}
