//! Extensible match assertions (`attr[:dn][:rule]:=value`).

use std::borrow::Cow;
use std::fmt;

use crate::attribute::{is_numeric_oid, AttributeName, IntoAttributeName};
use crate::error::{FilterError, Result};

/// A matching rule identifier: a numeric OID or a descriptor.
///
/// The rule is written into the filter verbatim, so it is validated on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchingRule(Cow<'static, str>);

impl MatchingRule {
    /// Active Directory `LDAP_MATCHING_RULE_BIT_AND`: all bits of the value are set.
    pub const BIT_AND: MatchingRule = MatchingRule(Cow::Borrowed("1.2.840.113556.1.4.803"));

    /// Active Directory `LDAP_MATCHING_RULE_BIT_OR`: any bit of the value is set.
    pub const BIT_OR: MatchingRule = MatchingRule(Cow::Borrowed("1.2.840.113556.1.4.804"));

    /// Active Directory `LDAP_MATCHING_RULE_IN_CHAIN`: walks the ancestry of a
    /// DN-valued attribute (nested group membership).
    pub const IN_CHAIN: MatchingRule = MatchingRule(Cow::Borrowed("1.2.840.113556.1.4.1941"));

    pub fn new(rule: impl Into<String>) -> Result<Self> {
        let rule = rule.into();
        if is_valid_rule(&rule) {
            Ok(Self(Cow::Owned(rule)))
        } else {
            tracing::debug!(rule = %rule, "rejected matching rule");
            Err(FilterError::InvalidMatchingRule(rule))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A descriptor, or a numeric OID. `dn` is reserved: `attr:dn:=v` already
/// means the dnAttributes flag.
fn is_valid_rule(rule: &str) -> bool {
    if rule.eq_ignore_ascii_case("dn") {
        return false;
    }
    let mut chars = rule.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => is_numeric_oid(rule),
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '-'),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensibleMatch {
    attribute: AttributeName,
    value: String,
    rule: Option<MatchingRule>,
    dn_attributes: bool,
}

impl ExtensibleMatch {
    pub fn new(
        attr: impl IntoAttributeName,
        value: impl Into<String>,
        rule: Option<MatchingRule>,
    ) -> Result<Self> {
        Ok(Self {
            attribute: attr.into_attribute_name()?,
            value: value.into(),
            rule,
            dn_attributes: false,
        })
    }

    /// Also match against the attributes of the entry's DN (`:dn`).
    pub fn with_dn_attributes(mut self) -> Self {
        self.dn_attributes = true;
        self
    }

    pub fn attribute(&self) -> &AttributeName {
        &self.attribute
    }

    /// The raw, unescaped assertion value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn rule(&self) -> Option<&MatchingRule> {
        self.rule.as_ref()
    }

    pub fn dn_attributes(&self) -> bool {
        self.dn_attributes
    }

    /// The attribute plus the `:dn` flag when set.
    pub(crate) fn attribute_part(&self) -> Cow<'_, str> {
        if self.dn_attributes {
            Cow::Owned(format!("{}:dn", self.attribute))
        } else {
            Cow::Borrowed(self.attribute.as_str())
        }
    }
}
