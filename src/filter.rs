//! Case-insensitive substring filtering of options.
//!
//! There is no ranking: matching options keep the order they were given in.

use crate::SelectOption;

/// Returns true if `filter` is contained in the option's label or value, ignoring case
pub fn matches(option: &SelectOption, filter: &str) -> bool {
    matches_lowercase(option, &filter.to_lowercase())
}

fn matches_lowercase(option: &SelectOption, needle: &str) -> bool {
    needle.is_empty()
        || option.label.to_lowercase().contains(needle)
        || option.value.to_lowercase().contains(needle)
}

/// The subsequence of `options` matching `filter`
pub fn visible_options<'a>(options: &'a [SelectOption], filter: &str) -> Vec<&'a SelectOption> {
    let needle = filter.to_lowercase();
    let res: Vec<_> = options
        .iter()
        .filter(|option| matches_lowercase(option, &needle))
        .collect();
    trace!("filter {filter:?}: {}/{} visible", res.len(), options.len());
    res
}
