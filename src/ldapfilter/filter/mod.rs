//! # Filter expressions
//!
//! A [`Filter`] is a tree. Leaves compare one attribute against a value;
//! composites combine child filters with AND, OR and NOT.
//!
//! | Constructor | Renders as |
//! |-------------|------------|
//! | [`Filter::equality`] | `(attr=value)` |
//! | [`Filter::approx`] | `(attr~=value)` |
//! | [`Filter::greater_or_equal`] | `(attr>=value)` |
//! | [`Filter::less_or_equal`] | `(attr<=value)` |
//! | [`Filter::presence`] | `(attr=*)` |
//! | [`Filter::substring`] | `(attr=lead*any*trail)` |
//! | [`Filter::extensible_match`] | `(attr:rule:=value)` |
//! | [`Filter::and`] | `(&...)` |
//! | [`Filter::or`] | `(\|...)` |
//! | [`Filter::not`] | `(!...)` |
//!
//! Every check happens in the constructor: a bad attribute name, an empty
//! AND/OR, a NOT without exactly one child, or a substring with no fragments
//! is rejected before a node exists. Nodes have no setters, and their payload
//! types can only be built through these constructors, so any `Filter` you
//! hold renders to a valid string.
//!
//! Values are kept raw. Escaping is the renderer's job and happens once.

mod extensible;
mod substring;

use std::fmt;

pub use extensible::{ExtensibleMatch, MatchingRule};
pub use substring::Substring;

use crate::attribute::{AttributeName, IntoAttributeName};
use crate::error::{FilterError, Result};
use crate::templates::NodeKind;

/// Boolean operator of a composite filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
            LogicalOp::Not => write!(f, "NOT"),
        }
    }
}

/// An attribute compared against a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    attribute: AttributeName,
    value: String,
}

impl Assertion {
    fn new(attr: impl IntoAttributeName, value: impl Into<String>) -> Result<Self> {
        Ok(Self {
            attribute: attr.into_attribute_name()?,
            value: value.into(),
        })
    }

    pub fn attribute(&self) -> &AttributeName {
        &self.attribute
    }

    /// The raw, unescaped value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The non-empty, ordered children of an AND or OR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    children: Vec<Filter>,
}

impl Composite {
    pub fn children(&self) -> &[Filter] {
        &self.children
    }
}

/// A filter expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Equality(Assertion),
    Approx(Assertion),
    GreaterOrEqual(Assertion),
    LessOrEqual(Assertion),
    Presence(AttributeName),
    Substring(Substring),
    ExtensibleMatch(ExtensibleMatch),
    And(Composite),
    Or(Composite),
    Not(Box<Filter>),
}

impl Filter {
    /// `(attr=value)`
    pub fn equality(attr: impl IntoAttributeName, value: impl Into<String>) -> Result<Self> {
        Ok(Filter::Equality(Assertion::new(attr, value)?))
    }

    /// `(attr~=value)`
    pub fn approx(attr: impl IntoAttributeName, value: impl Into<String>) -> Result<Self> {
        Ok(Filter::Approx(Assertion::new(attr, value)?))
    }

    /// `(attr>=value)`
    pub fn greater_or_equal(
        attr: impl IntoAttributeName,
        value: impl Into<String>,
    ) -> Result<Self> {
        Ok(Filter::GreaterOrEqual(Assertion::new(attr, value)?))
    }

    /// `(attr<=value)`
    pub fn less_or_equal(attr: impl IntoAttributeName, value: impl Into<String>) -> Result<Self> {
        Ok(Filter::LessOrEqual(Assertion::new(attr, value)?))
    }

    /// `(attr=*)`
    pub fn presence(attr: impl IntoAttributeName) -> Result<Self> {
        Ok(Filter::Presence(attr.into_attribute_name()?))
    }

    /// `(attr=[leading]*[contains*]...[trailing])`
    ///
    /// Empty fragments are ignored. Fails with
    /// [`FilterError::EmptySubstringPattern`] when nothing is left.
    pub fn substring<I, S>(
        attr: impl IntoAttributeName,
        leading: Option<&str>,
        contains: I,
        trailing: Option<&str>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attribute = attr.into_attribute_name()?;
        let contains = contains.into_iter().map(Into::into).collect();
        Ok(Filter::Substring(Substring::new(
            attribute, leading, contains, trailing,
        )?))
    }

    /// `(attr=prefix*)`
    pub fn starts_with(attr: impl IntoAttributeName, prefix: &str) -> Result<Self> {
        Self::substring(attr, Some(prefix), Vec::<String>::new(), None)
    }

    /// `(attr=*suffix)`
    pub fn ends_with(attr: impl IntoAttributeName, suffix: &str) -> Result<Self> {
        Self::substring(attr, None, Vec::<String>::new(), Some(suffix))
    }

    /// `(attr=*part*)`
    pub fn contains(attr: impl IntoAttributeName, part: &str) -> Result<Self> {
        Self::substring(attr, None, [part], None)
    }

    /// `(attr:=value)` or `(attr:rule:=value)`
    ///
    /// Build an [`ExtensibleMatch`] directly to set the `:dn` flag.
    pub fn extensible_match(
        attr: impl IntoAttributeName,
        value: impl Into<String>,
        rule: Option<MatchingRule>,
    ) -> Result<Self> {
        Ok(Filter::ExtensibleMatch(ExtensibleMatch::new(
            attr, value, rule,
        )?))
    }

    /// `(&child...)`, at least one child.
    pub fn and(children: impl IntoIterator<Item = Filter>) -> Result<Self> {
        Self::composite(LogicalOp::And, children)
    }

    /// `(|child...)`, at least one child.
    pub fn or(children: impl IntoIterator<Item = Filter>) -> Result<Self> {
        Self::composite(LogicalOp::Or, children)
    }

    /// `(!child)`
    pub fn not(child: Filter) -> Self {
        Filter::Not(Box::new(child))
    }

    /// Builds any composite from a child list, checking its arity.
    ///
    /// AND and OR need at least one child; NOT needs exactly one.
    pub fn composite(op: LogicalOp, children: impl IntoIterator<Item = Filter>) -> Result<Self> {
        let children: Vec<Filter> = children.into_iter().collect();
        match op {
            LogicalOp::Not => match <[Filter; 1]>::try_from(children) {
                Ok([child]) => Ok(Self::not(child)),
                Err(children) => Err(arity_violation(op, "exactly one child", children.len())),
            },
            LogicalOp::And | LogicalOp::Or if children.is_empty() => {
                Err(arity_violation(op, "at least one child", 0))
            }
            LogicalOp::And => Ok(Filter::And(Composite { children })),
            LogicalOp::Or => Ok(Filter::Or(Composite { children })),
        }
    }

    /// The template this node renders with.
    pub fn kind(&self) -> NodeKind {
        match self {
            Filter::Equality(_) => NodeKind::Equality,
            Filter::Approx(_) => NodeKind::Approx,
            Filter::GreaterOrEqual(_) => NodeKind::GreaterOrEqual,
            Filter::LessOrEqual(_) => NodeKind::LessOrEqual,
            Filter::Presence(_) => NodeKind::Presence,
            Filter::Substring(_) => NodeKind::Substring,
            Filter::ExtensibleMatch(ext) if ext.rule().is_some() => NodeKind::ExtensibleMatchRule,
            Filter::ExtensibleMatch(_) => NodeKind::ExtensibleMatch,
            Filter::And(_) => NodeKind::And,
            Filter::Or(_) => NodeKind::Or,
            Filter::Not(_) => NodeKind::Not,
        }
    }

    /// The operator, for composites.
    pub fn op(&self) -> Option<LogicalOp> {
        match self {
            Filter::And(_) => Some(LogicalOp::And),
            Filter::Or(_) => Some(LogicalOp::Or),
            Filter::Not(_) => Some(LogicalOp::Not),
            _ => None,
        }
    }

    /// The attribute compared, for leaves.
    pub fn attribute(&self) -> Option<&AttributeName> {
        match self {
            Filter::Equality(a)
            | Filter::Approx(a)
            | Filter::GreaterOrEqual(a)
            | Filter::LessOrEqual(a) => Some(a.attribute()),
            Filter::Presence(name) => Some(name),
            Filter::Substring(sub) => Some(sub.attribute()),
            Filter::ExtensibleMatch(ext) => Some(ext.attribute()),
            Filter::And(_) | Filter::Or(_) | Filter::Not(_) => None,
        }
    }

    /// The raw value, for single-valued leaves.
    pub fn value(&self) -> Option<&str> {
        match self {
            Filter::Equality(a)
            | Filter::Approx(a)
            | Filter::GreaterOrEqual(a)
            | Filter::LessOrEqual(a) => Some(a.value()),
            Filter::ExtensibleMatch(ext) => Some(ext.value()),
            _ => None,
        }
    }

    /// Child filters in order. Empty for leaves.
    pub fn children(&self) -> &[Filter] {
        match self {
            Filter::And(c) | Filter::Or(c) => c.children(),
            Filter::Not(child) => std::slice::from_ref(child.as_ref()),
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.op().is_none()
    }
}

impl From<ExtensibleMatch> for Filter {
    fn from(ext: ExtensibleMatch) -> Self {
        Filter::ExtensibleMatch(ext)
    }
}

fn arity_violation(op: LogicalOp, expected: &'static str, count: usize) -> FilterError {
    tracing::debug!(%op, count, "rejected composite filter");
    FilterError::ArityViolation {
        op,
        expected,
        count,
    }
}
