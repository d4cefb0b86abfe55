//! Order tickets inside a bucket by the active sorting key.

use crate::domain::{Sorting, Ticket};
use feruca::Collator;
use std::cmp::Ordering;

/// Return the tickets in display order. The input is left untouched.
///
/// - `Priority`: most urgent first (4 down to 0)
/// - `Title`: ascending, see [`compare_titles`]
///
/// The sort is stable: tickets that compare equal keep their input order.
pub fn order<'a>(tickets: &[&'a Ticket], sorting: Sorting) -> Vec<&'a Ticket> {
    let mut ordered = tickets.to_vec();
    match sorting {
        Sorting::Priority => ordered.sort_by(|a, b| b.priority.cmp(&a.priority)),
        Sorting::Title => {
            let mut collator = Collator::default();
            ordered.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
        }
    }
    ordered
}

/// Compare titles with the Unicode Collation Algorithm (CLDR root order).
///
/// Accents and case only break ties between otherwise equal letters, so
/// `"Éclair"` sorts before `"Zebra"` and `"éclair"` before `"Éclair"`.
/// Punctuation is ignored unless the titles are otherwise equal.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}
