//! Deterministic answers used whenever the LLM path is unavailable or fails.
//!
//! The output format is fixed; clients render it as-is, so every emoji,
//! separator and blank line below is part of the contract.

use catalog::CollegeRecord;

/// At most this many colleges are described in a fallback answer
pub const FALLBACK_LIMIT: usize = 3;

/// Courses listed per college
pub const TOP_COURSES: usize = 2;

const SKELETON_BODY: &str = "\
🏫 National Institute of Technology (NIT)
📍 Jamshedpur, Jharkhand | ⭐ 4.5/5 | 💰 ₹2 Lakhs/year
📚 Top Courses: B.Tech CSE, B.Tech Mechanical
🎯 Institute of National Importance

🏫 XLRI – Xavier School of Management
📍 Jamshedpur, Jharkhand | ⭐ 4.9/5 | 💰 ₹12 Lakhs/year
📚 Top Courses: MBA, PGDM
🎯 India's Oldest Business School";

/// Build the fallback answer for `query`.
///
/// Never returns an empty string: with no matches the pre-written skeleton
/// recommendation is used.
pub fn render(query: &str, matches: &[CollegeRecord]) -> String {
    if matches.is_empty() {
        return skeleton(query);
    }

    let mut response = format!("Based on our database for \"{}\":\n\n", query);
    for record in matches.iter().take(FALLBACK_LIMIT) {
        response.push_str(&render_block(record));
    }
    response
}

/// The canned two-college answer for queries without matches.
pub fn skeleton(query: &str) -> String {
    format!(
        "I couldn't fetch live data for \"{}\" right now, but here are some top-tier options in Jamshedpur you should check:\n\n{}",
        query, SKELETON_BODY
    )
}

/// One college block, terminated by a blank line.
pub fn render_block(record: &CollegeRecord) -> String {
    format!(
        "🏫 {}\n📍 {} | ⭐ {}/5 | 💰 {}\n📚 Top Courses: {}\n🎯 {}\n\n",
        record.name,
        record.location,
        record.rating,
        record.fees,
        record.top_courses(TOP_COURSES).join(", "),
        record.headline().unwrap_or_default()
    )
}
