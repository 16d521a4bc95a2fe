//! Locale-aware string ordering for names and types.
//!
//! Uses a tertiary-strength collator, so ordering is sensitive to case and
//! accents but still places "apple" before "Banana". Byte order is only used
//! if the collation data cannot be loaded.

use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;

thread_local! {
    static COLLATOR: Option<CollatorBorrowed<'static>> =
        match Collator::try_new(locale!("en").into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = %err, "collation data unavailable, using byte order");
                None
            }
        };
}

/// Compare two strings the way a reader expects them ordered in a list
pub fn compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_does_not_dominate() {
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("Banana", "cherry"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_near_base_letter() {
        assert_eq!(compare("école", "ecole"), Ordering::Greater);
        assert_eq!(compare("école", "fort"), Ordering::Less);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(compare("Fort", "Fort"), Ordering::Equal);
    }
}
