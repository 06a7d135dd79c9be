//! Searchable text of a record.

use catalog::CollegeRecord;

/// Case-folded concatenation of everything a query may match against:
/// name, location, courses and highlights, space separated.
pub fn searchable_text(record: &CollegeRecord) -> String {
    format!(
        "{} {} {} {}",
        record.name,
        record.location,
        record.courses.join(" "),
        record.highlights.join(" ")
    )
    .to_lowercase()
}
