//! Substring assertions.
//!
//! A substring filter matches values made of an optional leading fragment,
//! any number of fragments in between, and an optional trailing fragment:
//!
//! ```text
//! (attr=[initial]*[any*]...[final])
//! ```
//!
//! Fragments are escaped one by one at render time; the `*` separators
//! between them are grammar, not data, and stay unescaped.

use crate::attribute::AttributeName;
use crate::error::{FilterError, Result};
use crate::escape::escape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substring {
    attribute: AttributeName,
    leading: Option<String>,
    contains: Vec<String>,
    trailing: Option<String>,
}

impl Substring {
    /// Builds a substring assertion. Empty fragments count as absent.
    pub(crate) fn new(
        attribute: AttributeName,
        leading: Option<&str>,
        contains: Vec<String>,
        trailing: Option<&str>,
    ) -> Result<Self> {
        let leading = leading.filter(|s| !s.is_empty()).map(str::to_string);
        let trailing = trailing.filter(|s| !s.is_empty()).map(str::to_string);
        let contains: Vec<String> = contains.into_iter().filter(|s| !s.is_empty()).collect();

        if leading.is_none() && trailing.is_none() && contains.is_empty() {
            tracing::debug!(attribute = %attribute, "rejected substring filter with no fragments");
            return Err(FilterError::EmptySubstringPattern {
                attribute: attribute.to_string(),
            });
        }

        Ok(Self {
            attribute,
            leading,
            contains,
            trailing,
        })
    }

    pub fn attribute(&self) -> &AttributeName {
        &self.attribute
    }

    /// The "starts with" fragment.
    pub fn leading(&self) -> Option<&str> {
        self.leading.as_deref()
    }

    /// The "contains" fragments, in match order.
    pub fn contains(&self) -> &[String] {
        &self.contains
    }

    /// The "ends with" fragment.
    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }

    /// The escaped fragment list joined with `*`.
    pub(crate) fn encoded_pattern(&self) -> String {
        let mut pattern = String::new();
        if let Some(leading) = &self.leading {
            pattern.push_str(&escape(leading));
        }
        pattern.push('*');
        for fragment in &self.contains {
            pattern.push_str(&escape(fragment));
            pattern.push('*');
        }
        if let Some(trailing) = &self.trailing {
            pattern.push_str(&escape(trailing));
        }
        pattern
    }
}
