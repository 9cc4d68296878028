//! # Attribute Filter
//!
//! Decides which raw attributes of a record are copied into its presentation.
//! The filter only ever looks at keys physically present on the record; it
//! never invents keys.

use std::collections::BTreeSet;

use crate::model::Record;

/// Inclusion rule for raw attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFilter<'a> {
    /// Copy every attribute.
    All,
    /// Copy only the listed attributes (whitelist).
    Only(&'a BTreeSet<String>),
    /// Copy everything except the listed attributes (blacklist).
    Except(&'a BTreeSet<String>),
}

impl<'a> AttributeFilter<'a> {
    /// Build a filter from a whitelist and a blacklist.
    ///
    /// A non-empty whitelist wins outright and the blacklist is ignored.
    /// Otherwise a non-empty blacklist applies. With neither, everything passes.
    pub fn new(
        whitelist: Option<&'a BTreeSet<String>>,
        blacklist: Option<&'a BTreeSet<String>>,
    ) -> Self {
        match (whitelist, blacklist) {
            (Some(only), _) if !only.is_empty() => Self::Only(only),
            (_, Some(except)) if !except.is_empty() => Self::Except(except),
            _ => Self::All,
        }
    }

    /// Whether `key` is copied.
    pub fn includes(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only.contains(key),
            Self::Except(except) => !except.contains(key),
        }
    }

    /// Shallow-copy the included attributes of `record`.
    pub fn apply(&self, record: &Record) -> Record {
        record
            .iter()
            .filter(|(key, _)| self.includes(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    fn record() -> impl Strategy<Value = Record> {
        prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..12)
            .prop_map(|map| map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
    }

    fn names() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set("[a-e]{1,2}", 0..6)
    }

    proptest! {
        /// Output keys are always a subset of the record's keys.
        #[test]
        fn filter_output_is_subset(record in record(), white in names(), black in names()) {
            let copied = AttributeFilter::new(Some(&white), Some(&black)).apply(&record);
            for (key, value) in &copied {
                prop_assert_eq!(record.get(key), Some(value));
            }
        }

        /// A non-empty whitelist fully determines inclusion.
        #[test]
        fn whitelist_ignores_blacklist(record in record(), white in names(), black in names()) {
            prop_assume!(!white.is_empty());
            let both = AttributeFilter::new(Some(&white), Some(&black)).apply(&record);
            let only = AttributeFilter::new(Some(&white), None).apply(&record);
            prop_assert_eq!(both, only);
        }

        /// Blacklisting removes exactly the listed keys.
        #[test]
        fn blacklist_is_complement(record in record(), black in names()) {
            let copied = AttributeFilter::new(None, Some(&black)).apply(&record);
            for key in record.keys() {
                prop_assert_eq!(copied.contains_key(key), !black.contains(key));
            }
        }
    }
}
