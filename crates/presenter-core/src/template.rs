//! # String Templates for Declarative Custom Attributes
//!
//! Presenter configuration files cannot carry code, so custom attributes
//! declared there are string templates:
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `{field}` | raw attribute `field` of the record |
//! | `{@name}` | custom attribute `name`, resolved through the evaluation context |
//! | `{{`, `}}` | literal braces |
//!
//! Strings interpolate verbatim, `null` and missing attributes as the empty
//! string, anything else as compact JSON.

use serde_json::Value;

use crate::context::{CustomAttribute, EvalContext};
use crate::error::PresentError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Attribute(String),
    Custom(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, returning a diagnostic message on malformed input.
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(format!("unmatched '}}' at offset {offset}")),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((inner, '{')) => {
                                return Err(format!("unexpected '{{' at offset {inner}"))
                            }
                            Some((_, ch)) => name.push(ch),
                            None => {
                                return Err(format!("unclosed placeholder at offset {offset}"))
                            }
                        }
                    }

                    let name = name.trim();
                    let segment = match name.strip_prefix('@') {
                        Some(custom) if !custom.trim().is_empty() => {
                            Segment::Custom(custom.trim().to_string())
                        }
                        None if !name.is_empty() => Segment::Attribute(name.to_string()),
                        _ => return Err(format!("empty placeholder at offset {offset}")),
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Render against a record's evaluation context.
    pub fn render(&self, ctx: &EvalContext<'_>) -> Result<Value, PresentError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Attribute(name) => push_value(&mut out, ctx.attribute(name)),
                Segment::Custom(name) => push_value(&mut out, Some(&ctx.custom_attribute(name)?)),
            }
        }
        Ok(Value::String(out))
    }

    /// Wrap this template as a custom attribute.
    pub fn into_custom_attribute(self) -> CustomAttribute {
        CustomAttribute::new(move |ctx| self.render(ctx))
    }
}

fn push_value(out: &mut String, value: Option<&Value>) {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(text)) => out.push_str(text),
        Some(other) => out.push_str(&other.to_string()),
    }
}
