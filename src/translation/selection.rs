//! Language selection for pulls.

use crate::client::LanguageStat;
use std::collections::{BTreeSet, HashSet};

/// Languages to download: `available ∩ selected ∩ {ratio ≥ minimum}`.
///
/// An empty `selected` keeps every available language; a `None` minimum
/// skips the ratio filter. With a minimum set, languages missing from
/// `stats` are dropped. The set iterates in ascending code order.
pub fn select_languages<I>(
    available: I,
    selected: &[String],
    minimum: Option<f64>,
    stats: &[LanguageStat],
) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    let mut languages: BTreeSet<String> = available.into_iter().collect();

    if !selected.is_empty() {
        languages.retain(|code| selected.contains(code));
    }

    if let Some(minimum) = minimum {
        let qualified: HashSet<&str> = stats
            .iter()
            .filter(|stat| stat.ratio >= minimum)
            .map(|stat| stat.code.as_str())
            .collect();
        languages.retain(|code| qualified.contains(code.as_str()));
    }

    languages
}
