//! Text-instance lookup over scanned records

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::Result;
use crate::record::PositionalRecord;

/// Compile a case-insensitive search pattern
///
/// The pattern is used as a regular expression as given; special
/// characters are not escaped.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Find the record holding the `occurrence`-th match of `pattern`
///
/// Matches are counted cumulatively across records in order; the record in
/// which the running count reaches `occurrence` is returned. `occurrence` is
/// 1-based and 0 is treated as 1. Records without collected content count
/// zero matches.
pub fn find_text_instance(
    pattern: &str,
    occurrence: usize,
    records: &[PositionalRecord],
) -> Result<Option<usize>> {
    let regex = compile_pattern(pattern)?;
    Ok(find_with(&regex, occurrence, records))
}

/// Same as [`find_text_instance`] with a precompiled pattern
pub fn find_with(regex: &Regex, occurrence: usize, records: &[PositionalRecord]) -> Option<usize> {
    let wanted = occurrence.max(1);
    let mut seen = 0;

    for (index, record) in records.iter().enumerate() {
        let Some(content) = record.content.as_deref() else {
            continue;
        };
        seen += regex.find_iter(content).count();
        if seen >= wanted {
            debug!(
                occurrence = wanted,
                pattern = regex.as_str(),
                index,
                "text instance found"
            );
            return Some(index);
        }
    }

    debug!(
        pattern = regex.as_str(),
        matches = seen,
        occurrence = wanted,
        "not enough text instances"
    );
    None
}
