/// Common utility functions.
use crate::pattern::PatternValueType;

/// Converts string of ASCII digits into unsigned number.
///
/// Signs, spaces and any other characters make the input non-numeric.
/// Too big numbers are saturated, so they never fit into any field's domain.
pub(crate) fn parse_number(input: &str) -> Option<PatternValueType> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(input.parse::<PatternValueType>().unwrap_or(PatternValueType::MAX))
    }
}

/// Converts string with mnemonic value representation into unsigned number.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<PatternValueType> {
    if input.is_empty() {
        None
    } else {
        values
            .iter()
            .position(|x| x.eq_ignore_ascii_case(input))
            .map(|i| i as PatternValueType)
    }
}
