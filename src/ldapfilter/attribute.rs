//! Attribute name validation.
//!
//! An attribute name is copied into the filter unescaped, so it has to be
//! checked before a node is built. Two policies are available:
//!
//! - [`NamePolicy::Strict`] (default): ASCII letters, digits and hyphens only.
//! - [`NamePolicy::Rfc4512`]: the full `attributedescription` of RFC 4515,
//!   a descriptor (must start with a letter) or a numeric OID, followed by
//!   optional `;option` suffixes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Which attribute names are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Letters, digits and hyphens.
    #[default]
    Strict,
    /// Descriptor or numeric OID, with `;option` suffixes.
    Rfc4512,
}

/// Validates an attribute name under the given policy.
///
/// # Examples
/// ```
/// use ldapfilter::attribute::{validate_attribute_name, NamePolicy};
///
/// assert!(validate_attribute_name("cn", NamePolicy::Strict).is_ok());
/// assert!(validate_attribute_name("sAMAccountName", NamePolicy::Strict).is_ok());
/// assert!(validate_attribute_name("x-custom-1", NamePolicy::Strict).is_ok());
///
/// assert!(validate_attribute_name("", NamePolicy::Strict).is_err());
/// assert!(validate_attribute_name("cn;binary", NamePolicy::Strict).is_err());
/// assert!(validate_attribute_name("cn;binary", NamePolicy::Rfc4512).is_ok());
/// assert!(validate_attribute_name("2.5.4.3", NamePolicy::Rfc4512).is_ok());
/// ```
pub fn validate_attribute_name(
    name: &str,
    policy: NamePolicy,
) -> std::result::Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }
    if name.trim().is_empty() {
        return Err(NameViolation::Blank);
    }

    match policy {
        NamePolicy::Strict => check_keychars(name),
        NamePolicy::Rfc4512 => {
            let mut parts = name.split(';');
            // split always yields at least one item
            let attr_type = parts.next().unwrap_or_default();
            check_attribute_type(attr_type)?;
            for option in parts {
                if option.is_empty() {
                    return Err(NameViolation::EmptyOption);
                }
                check_keychars(option)?;
            }
            Ok(())
        }
    }
}

fn check_attribute_type(attr_type: &str) -> std::result::Result<(), NameViolation> {
    let Some(first) = attr_type.chars().next() else {
        return Err(NameViolation::Empty);
    };

    if first.is_ascii_digit() {
        return if is_numeric_oid(attr_type) {
            Ok(())
        } else {
            Err(NameViolation::InvalidOid)
        };
    }

    if !first.is_ascii_alphabetic() {
        return Err(NameViolation::InvalidStart(first));
    }
    check_keychars(attr_type)
}

fn check_keychars(s: &str) -> std::result::Result<(), NameViolation> {
    match s.chars().find(|&ch| !is_keychar(ch)) {
        Some(ch) => Err(NameViolation::InvalidCharacter(ch)),
        None => Ok(()),
    }
}

/// Checks if a character is valid in a descriptor or option.
fn is_keychar(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

/// `number *( DOT number )`, where a number has no leading zero.
pub(crate) fn is_numeric_oid(s: &str) -> bool {
    s.split('.').all(|number| {
        !number.is_empty()
            && number.bytes().all(|b| b.is_ascii_digit())
            && (number == "0" || !number.starts_with('0'))
    })
}

/// Why an attribute name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    /// Name is empty
    Empty,
    /// Name is only whitespace
    Blank,
    /// Name contains a character outside the allowed set
    InvalidCharacter(char),
    /// Descriptor starts with something other than a letter
    InvalidStart(char),
    /// Starts with a digit but is not a well-formed numeric OID
    InvalidOid,
    /// A `;` with nothing after it
    EmptyOption,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameViolation::Empty => write!(f, "attribute name cannot be empty"),
            NameViolation::Blank => write!(f, "attribute name cannot be blank"),
            NameViolation::InvalidCharacter(ch) => {
                write!(
                    f,
                    "attribute name contains invalid character '{}' (only letters, digits, and hyphen allowed)",
                    ch
                )
            }
            NameViolation::InvalidStart(ch) => {
                write!(f, "attribute descriptor must start with a letter, found '{}'", ch)
            }
            NameViolation::InvalidOid => write!(f, "attribute name is not a valid numeric OID"),
            NameViolation::EmptyOption => write!(f, "attribute option cannot be empty"),
        }
    }
}

/// A validated attribute name.
///
/// Once built, the name is known to be safe to place in a filter verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeName(String);

impl AttributeName {
    /// Validate under the default (strict) policy.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_policy(name, NamePolicy::default())
    }

    /// Validate under an explicit policy.
    pub fn with_policy(name: impl Into<String>, policy: NamePolicy) -> Result<Self> {
        let name = name.into();
        match validate_attribute_name(&name, policy) {
            Ok(()) => Ok(Self(name)),
            Err(reason) => {
                tracing::debug!(name = %name, ?policy, %reason, "rejected attribute name");
                Err(FilterError::InvalidAttributeName { name, reason })
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AttributeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything a filter constructor accepts as an attribute.
///
/// Plain strings are validated under the strict policy. Pass an
/// [`AttributeName`] to use a name validated some other way.
pub trait IntoAttributeName {
    fn into_attribute_name(self) -> Result<AttributeName>;
}

impl IntoAttributeName for AttributeName {
    fn into_attribute_name(self) -> Result<AttributeName> {
        Ok(self)
    }
}

impl IntoAttributeName for &AttributeName {
    fn into_attribute_name(self) -> Result<AttributeName> {
        Ok(self.clone())
    }
}

impl IntoAttributeName for &str {
    fn into_attribute_name(self) -> Result<AttributeName> {
        AttributeName::new(self)
    }
}

impl IntoAttributeName for String {
    fn into_attribute_name(self) -> Result<AttributeName> {
        AttributeName::new(self)
    }
}

impl IntoAttributeName for &String {
    fn into_attribute_name(self) -> Result<AttributeName> {
        AttributeName::new(self.as_str())
    }
}
