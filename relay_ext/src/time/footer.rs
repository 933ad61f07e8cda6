use ::time::{OffsetDateTime, UtcOffset, macros::format_description};

/// Formats `at` the way embed footers show it, always in UTC.
///
/// # Panics
/// This function panics if the well-formed static format description fails to format, which should never happen.
#[must_use]
pub fn footer(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[month repr:long] [day], [year] at [hour repr:12]:[minute]:[second] [period] UTC"
        ))
        .expect("formatting with a static description must never fail")
}
