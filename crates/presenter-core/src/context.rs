//! # Custom Attribute Evaluation
//!
//! Custom attributes are values computed from a record instead of copied from
//! it. Each one is a function receiving an [`EvalContext`], which exposes the
//! record's raw attributes and resolves sibling custom attributes on demand:
//!
//! ```
//! use presenter_core::{Presenter, Strategy};
//! use serde_json::json;
//!
//! let presenter = Presenter::builder()
//!     .custom_attribute("fullName", |ctx| {
//!         Ok(json!(format!(
//!             "{} {}",
//!             ctx.attribute_str("firstName").unwrap_or_default(),
//!             ctx.attribute_str("lastName").unwrap_or_default()
//!         )))
//!     })
//!     .custom_attribute("greeting", |ctx| {
//!         let full_name = ctx.custom_attribute("fullName")?;
//!         Ok(json!(format!("Hello, {}", full_name.as_str().unwrap_or_default())))
//!     })
//!     .build();
//!
//! let strategy = Strategy::new().whitelist(["firstName"]).custom_attributes(["greeting"]);
//! let presented = presenter
//!     .present_value(Some(json!({"firstName": "John", "lastName": "Smith"})), &strategy)
//!     .unwrap();
//! assert_eq!(presented, Some(json!({"firstName": "John", "greeting": "Hello, John Smith"})));
//! ```
//!
//! ## Dependency resolution
//!
//! Values are computed lazily and memoized for the lifetime of one context,
//! i.e. one record. Declaration order and request order do not matter.
//! Dependency cycles are reported as [`PresentError::CyclicDependency`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::PresentError;
use crate::model::Record;

type ComputeFn = dyn Fn(&EvalContext<'_>) -> Result<Value, PresentError> + Send + Sync;

/// A named computation registered on a presenter.
#[derive(Clone)]
pub struct CustomAttribute(Arc<ComputeFn>);

impl CustomAttribute {
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> Result<Value, PresentError> + Send + Sync + 'static,
    {
        Self(Arc::new(compute))
    }

    /// Run the computation against a context.
    pub fn compute(&self, ctx: &EvalContext<'_>) -> Result<Value, PresentError> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for CustomAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomAttribute(..)")
    }
}

/// Per-record evaluation state handed to every custom attribute.
pub struct EvalContext<'a> {
    attributes: &'a Record,
    definitions: Option<&'a BTreeMap<String, CustomAttribute>>,
    computed: RefCell<BTreeMap<String, Value>>,
    in_progress: RefCell<Vec<String>>,
}

impl<'a> EvalContext<'a> {
    pub(crate) fn new(
        attributes: &'a Record,
        definitions: Option<&'a BTreeMap<String, CustomAttribute>>,
    ) -> Self {
        Self {
            attributes,
            definitions,
            computed: RefCell::new(BTreeMap::new()),
            in_progress: RefCell::new(Vec::new()),
        }
    }

    /// The record's raw attributes.
    pub fn attributes(&self) -> &'a Record {
        self.attributes
    }

    /// One raw attribute.
    pub fn attribute(&self, name: &str) -> Option<&'a Value> {
        self.attributes.get(name)
    }

    /// One raw attribute, if it is a string.
    pub fn attribute_str(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).and_then(Value::as_str)
    }

    /// The value of another custom attribute on the same record, computing it
    /// if it has not been computed yet.
    ///
    /// # Errors
    ///
    /// `UnknownCustomAttribute` if the presenter does not declare `name`,
    /// `CyclicDependency` if `name` is already being computed further up the
    /// call chain, or whatever error the computation itself returns.
    pub fn custom_attribute(&self, name: &str) -> Result<Value, PresentError> {
        if let Some(value) = self.computed.borrow().get(name) {
            return Ok(value.clone());
        }

        let attribute = self
            .definitions
            .and_then(|definitions| definitions.get(name))
            .ok_or_else(|| PresentError::UnknownCustomAttribute {
                name: name.to_string(),
            })?;

        {
            let mut stack = self.in_progress.borrow_mut();
            if stack.iter().any(|pending| pending == name) {
                let mut chain = stack.clone();
                chain.push(name.to_string());
                return Err(PresentError::CyclicDependency { chain });
            }
            stack.push(name.to_string());
        }

        let result = attribute.compute(self);
        self.in_progress.borrow_mut().pop();

        let value = result?;
        self.computed
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    /// Compute `names` in order. Every name is checked up front so an unknown
    /// name fails before any computation runs.
    pub(crate) fn evaluate<'n, I>(&self, names: I) -> Result<Record, PresentError>
    where
        I: IntoIterator<Item = &'n String> + Clone,
    {
        for name in names.clone() {
            let declared = self
                .definitions
                .is_some_and(|definitions| definitions.contains_key(name));
            if !declared {
                return Err(PresentError::UnknownCustomAttribute { name: name.clone() });
            }
        }

        let mut values = Record::new();
        for name in names {
            let value = self.custom_attribute(name)?;
            values.insert(name.clone(), value);
        }
        Ok(values)
    }
}
