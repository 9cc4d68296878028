//! # Presenter: Definition and Executor
//!
//! A [`Presenter`] pairs named custom attributes with named strategies. It is
//! an immutable value: build one with [`Presenter::builder`], derive a variant
//! of an existing one with [`Presenter::extend`].
//!
//! [`Presenter::present`] is the single entry point. It resolves the strategy
//! once, then dispatches on the model shape:
//!
//! 1. `Absent` and `Null` are returned as-is.
//! 2. A single record is presented once.
//! 3. A collection is presented element by element with the same resolved
//!    strategy, preserving order. The first failing element fails the call.
//!
//! Presenting a record copies the raw attributes the filter admits and then
//! merges the computed custom attributes on top, so a custom attribute
//! replaces a raw attribute of the same name.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::context::{CustomAttribute, EvalContext};
use crate::error::PresentError;
use crate::model::{Model, Presentation, Record};
use crate::strategy::{self, ResolvedStrategy, Strategy, StrategyRef};

/// Custom attributes and strategies that shape records into presentations.
///
/// `None` for either mapping means the presenter declares none at all; the
/// default presentation then copies raw attributes only, and every named
/// strategy falls back to the default.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    custom_attributes: Option<BTreeMap<String, CustomAttribute>>,
    strategies: Option<BTreeMap<String, Strategy>>,
}

impl Presenter {
    pub fn builder() -> PresenterBuilder {
        PresenterBuilder::default()
    }

    /// Start a new presenter from a copy of this one.
    pub fn extend(&self) -> PresenterBuilder {
        PresenterBuilder {
            custom_attributes: self.custom_attributes.clone(),
            strategies: self.strategies.clone(),
        }
    }

    /// Declared custom attribute names, in name order.
    pub fn custom_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.custom_attributes
            .iter()
            .flat_map(|definitions| definitions.keys().map(String::as_str))
    }

    /// A registered strategy.
    pub fn strategy(&self, name: &str) -> Option<&Strategy> {
        self.strategies.as_ref()?.get(name)
    }

    pub fn has_custom_attributes(&self) -> bool {
        self.custom_attributes.is_some()
    }

    pub fn has_strategies(&self) -> bool {
        self.strategies.is_some()
    }

    /// Resolve a strategy reference. Unknown names resolve to the default.
    pub fn resolve<'a>(&'a self, reference: StrategyRef<'a>) -> ResolvedStrategy<'a> {
        strategy::resolve(self.strategies.as_ref(), reference)
    }

    /// Present a model.
    ///
    /// # Errors
    ///
    /// Fails when the strategy or a custom attribute references an undeclared
    /// custom attribute, when custom attributes depend on each other in a
    /// cycle, or when a custom attribute reports a failure.
    pub fn present<'s>(
        &self,
        model: impl Into<Model>,
        strategy: impl Into<StrategyRef<'s>>,
    ) -> Result<Presentation, PresentError> {
        let model = model.into();
        let resolved = self.resolve(strategy.into());

        tracing::trace!(
            shape = model.shape(),
            default = resolved.is_default(),
            "presenting model"
        );

        match model {
            Model::Absent => Ok(Presentation::Absent),
            Model::Null => Ok(Presentation::Null),
            Model::Single(record) => self
                .present_record(&record, &resolved)
                .map(Presentation::Single),
            Model::Collection(records) => self
                .present_collection(&records, &resolved)
                .map(Presentation::Collection),
        }
    }

    /// Present a raw JSON value; `None` is the absent model and yields `None`.
    ///
    /// # Errors
    ///
    /// As [`Presenter::present`], plus `UnsupportedModel` / `NotARecord` when
    /// the value is not a record, a collection of records, or null.
    pub fn present_value<'s>(
        &self,
        value: Option<Value>,
        strategy: impl Into<StrategyRef<'s>>,
    ) -> Result<Option<Value>, PresentError> {
        let model = Model::from_option(value)?;
        self.present(model, strategy)
            .map(Presentation::into_value)
    }

    /// Present one record with an already resolved strategy.
    pub fn present_record(
        &self,
        record: &Record,
        resolved: &ResolvedStrategy<'_>,
    ) -> Result<Record, PresentError> {
        let mut presented = resolved.filter().apply(record);

        let ctx = EvalContext::new(record, self.custom_attributes.as_ref());
        let computed = match (resolved.custom_attributes, &self.custom_attributes) {
            (Some(names), _) => ctx.evaluate(names)?,
            (None, Some(definitions)) if resolved.is_default() => {
                ctx.evaluate(definitions.keys())?
            }
            (None, _) => Record::new(),
        };

        presented.extend(computed);
        Ok(presented)
    }

    #[cfg(not(feature = "parallel"))]
    fn present_collection(
        &self,
        records: &[Record],
        resolved: &ResolvedStrategy<'_>,
    ) -> Result<Vec<Record>, PresentError> {
        records
            .iter()
            .map(|record| self.present_record(record, resolved))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn present_collection(
        &self,
        records: &[Record],
        resolved: &ResolvedStrategy<'_>,
    ) -> Result<Vec<Record>, PresentError> {
        use rayon::prelude::*;

        // Collected per element first so the reported error is the first by index.
        let presented: Vec<Result<Record, PresentError>> = records
            .par_iter()
            .map(|record| self.present_record(record, resolved))
            .collect();
        presented.into_iter().collect()
    }
}

/// Builder for [`Presenter`].
#[derive(Debug, Clone, Default)]
pub struct PresenterBuilder {
    custom_attributes: Option<BTreeMap<String, CustomAttribute>>,
    strategies: Option<BTreeMap<String, Strategy>>,
}

impl PresenterBuilder {
    /// Declare a custom attribute, replacing any previous one with that name.
    pub fn custom_attribute<F>(self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> Result<Value, PresentError> + Send + Sync + 'static,
    {
        self.insert_custom_attribute(name, CustomAttribute::new(compute))
    }

    /// Declare an already constructed custom attribute.
    pub fn insert_custom_attribute(
        mut self,
        name: impl Into<String>,
        attribute: CustomAttribute,
    ) -> Self {
        self.custom_attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), attribute);
        self
    }

    /// Declare several custom attributes. Marks the custom attribute mapping
    /// as present even when `attributes` is empty.
    pub fn custom_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, CustomAttribute)>,
        S: Into<String>,
    {
        self.custom_attributes
            .get_or_insert_with(BTreeMap::new)
            .extend(attributes.into_iter().map(|(name, a)| (name.into(), a)));
        self
    }

    /// Register a strategy, replacing any previous one with that name.
    pub fn strategy(mut self, name: impl Into<String>, strategy: Strategy) -> Self {
        self.strategies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), strategy);
        self
    }

    /// Register several strategies. Marks the strategy mapping as present
    /// even when `strategies` is empty.
    pub fn strategies<I, S>(mut self, strategies: I) -> Self
    where
        I: IntoIterator<Item = (S, Strategy)>,
        S: Into<String>,
    {
        self.strategies
            .get_or_insert_with(BTreeMap::new)
            .extend(strategies.into_iter().map(|(name, s)| (name.into(), s)));
        self
    }

    /// Drop every custom attribute, including the mapping itself.
    pub fn without_custom_attributes(mut self) -> Self {
        self.custom_attributes = None;
        self
    }

    /// Drop every strategy, including the mapping itself.
    pub fn without_strategies(mut self) -> Self {
        self.strategies = None;
        self
    }

    pub fn build(self) -> Presenter {
        Presenter {
            custom_attributes: self.custom_attributes,
            strategies: self.strategies,
        }
    }
}
