//! # Strategies and Strategy Resolution
//!
//! A [`Strategy`] selects which raw attributes and which custom attributes
//! appear in a presentation. Strategies are either registered on a presenter
//! under a name or passed inline at the call site.
//!
//! Resolution turns a [`StrategyRef`] into a [`ResolvedStrategy`]:
//!
//! - `Default` resolves to the empty strategy.
//! - `Named` is looked up in the presenter's strategies. A missing name, or a
//!   presenter without any strategies, also resolves to the empty strategy.
//!   Presenters evolve; callers asking for a strategy that no longer exists
//!   get the default presentation rather than an error.
//! - `Inline` is used as-is.
//!
//! Empty lists count as absent, so `whitelist: []` behaves exactly like no
//! whitelist at all.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::filter::AttributeFilter;

/// Rule set for one presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Strategy {
    /// Raw attributes to include. Takes precedence over `blacklist`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<BTreeSet<String>>,

    /// Raw attributes to exclude. Ignored when a whitelist is in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<BTreeSet<String>>,

    /// Custom attributes to compute, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<Vec<String>>,
}

impl Strategy {
    /// An empty strategy; equivalent to presenting without one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whitelist.
    pub fn whitelist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the blacklist.
    pub fn blacklist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the custom attributes to compute.
    pub fn custom_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_attributes = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// How a caller refers to a strategy.
#[derive(Debug, Clone, Copy, Default)]
pub enum StrategyRef<'a> {
    /// No strategy: default presentation.
    #[default]
    Default,
    /// A strategy registered on the presenter.
    Named(&'a str),
    /// An ad-hoc strategy supplied by the caller.
    Inline(&'a Strategy),
}

impl From<()> for StrategyRef<'_> {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

impl<'a> From<&'a str> for StrategyRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Named(name)
    }
}

impl<'a> From<&'a String> for StrategyRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Named(name)
    }
}

impl<'a> From<&'a Strategy> for StrategyRef<'a> {
    fn from(strategy: &'a Strategy) -> Self {
        Self::Inline(strategy)
    }
}

impl<'a, T> From<Option<T>> for StrategyRef<'a>
where
    T: Into<StrategyRef<'a>>,
{
    fn from(reference: Option<T>) -> Self {
        reference.map_or(Self::Default, Into::into)
    }
}

/// A strategy after lookup and normalization. Empty lists are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedStrategy<'a> {
    pub whitelist: Option<&'a BTreeSet<String>>,
    pub blacklist: Option<&'a BTreeSet<String>>,
    pub custom_attributes: Option<&'a [String]>,
}

impl<'a> ResolvedStrategy<'a> {
    /// The empty resolution, which triggers the default presentation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a strategy.
    pub fn from_strategy(strategy: &'a Strategy) -> Self {
        Self {
            whitelist: strategy.whitelist.as_ref().filter(|set| !set.is_empty()),
            blacklist: strategy.blacklist.as_ref().filter(|set| !set.is_empty()),
            custom_attributes: strategy
                .custom_attributes
                .as_deref()
                .filter(|names| !names.is_empty()),
        }
    }

    /// True when nothing is in effect: copy everything, compute everything.
    pub fn is_default(&self) -> bool {
        self.whitelist.is_none() && self.blacklist.is_none() && self.custom_attributes.is_none()
    }

    /// The raw attribute filter this strategy implies.
    pub fn filter(&self) -> AttributeFilter<'a> {
        AttributeFilter::new(self.whitelist, self.blacklist)
    }
}

/// Resolve a strategy reference against a presenter's registered strategies.
pub fn resolve<'a>(
    strategies: Option<&'a BTreeMap<String, Strategy>>,
    reference: StrategyRef<'a>,
) -> ResolvedStrategy<'a> {
    match reference {
        StrategyRef::Default => ResolvedStrategy::empty(),
        StrategyRef::Inline(strategy) => ResolvedStrategy::from_strategy(strategy),
        StrategyRef::Named(name) => {
            let Some(strategies) = strategies else {
                tracing::debug!(
                    strategy = name,
                    "presenter defines no strategies; using default presentation"
                );
                return ResolvedStrategy::empty();
            };
            match strategies.get(name) {
                Some(strategy) => ResolvedStrategy::from_strategy(strategy),
                None => {
                    tracing::debug!(
                        strategy = name,
                        "strategy not registered; using default presentation"
                    );
                    ResolvedStrategy::empty()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BTreeMap<String, Strategy> {
        let mut strategies = BTreeMap::new();
        strategies.insert(
            "whitelisted".to_string(),
            Strategy::new().whitelist(["firstName"]),
        );
        strategies.insert(
            "blacklisted".to_string(),
            Strategy::new().blacklist(["ssn"]),
        );
        strategies
    }

    #[test]
    fn default_reference_resolves_empty() {
        let strategies = registry();
        let resolved = resolve(Some(&strategies), StrategyRef::Default);
        assert!(resolved.is_default());
    }

    #[test]
    fn named_reference_uses_registered_strategy() {
        let strategies = registry();
        let resolved = resolve(Some(&strategies), "whitelisted".into());
        assert_eq!(
            resolved.whitelist.map(|set| set.iter().cloned().collect::<Vec<_>>()),
            Some(vec!["firstName".to_string()])
        );
        assert!(resolved.blacklist.is_none());
        assert!(!resolved.is_default());
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let strategies = registry();
        assert!(resolve(Some(&strategies), "missing".into()).is_default());
    }

    #[test]
    fn missing_registry_falls_back_to_default() {
        assert!(resolve(None, "whitelisted".into()).is_default());
    }

    #[test]
    fn inline_bypasses_registry() {
        let inline = Strategy::new().blacklist(["password"]);
        let resolved = resolve(None, (&inline).into());
        assert!(resolved.blacklist.unwrap().contains("password"));
    }

    #[test]
    fn empty_lists_normalize_to_absent() {
        let strategy = Strategy::new()
            .whitelist(Vec::<String>::new())
            .blacklist(Vec::<String>::new())
            .custom_attributes(Vec::<String>::new());
        assert!(ResolvedStrategy::from_strategy(&strategy).is_default());
    }

    #[test]
    fn option_reference_conversion() {
        let none: Option<&str> = None;
        assert!(matches!(StrategyRef::from(none), StrategyRef::Default));
        assert!(matches!(
            StrategyRef::from(Some("stationery")),
            StrategyRef::Named("stationery")
        ));
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let strategy: Strategy = serde_json::from_str(
            r#"{"whitelist":["firstName"],"customAttributes":["salutation","fullName"]}"#,
        )
        .unwrap();
        assert_eq!(
            strategy,
            Strategy::new()
                .whitelist(["firstName"])
                .custom_attributes(["salutation", "fullName"])
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<Strategy>(r#"{"whitelsit":["firstName"]}"#);
        assert!(result.is_err());
    }
}
