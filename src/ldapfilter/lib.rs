//! # ldapfilter Architecture
//!
//! ldapfilter builds LDAP search filters (RFC 4515) from typed nodes and
//! renders them to strings. It does not talk to a directory: no connections,
//! no binds, no schema lookups. What it guarantees is that every tree you can
//! construct renders to a grammatically valid filter.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Construction (filter/)                                     │
//! │  - Filter::equality, ::substring, ::and, ::not, ...         │
//! │  - Validates names, arity and fragments up front            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Rendering (render.rs)                                      │
//! │  - Walks the tree depth-first, left to right                │
//! │  - Escapes values, fills templates                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Primitives (escape.rs, templates.rs, attribute.rs)         │
//! │  - Fixed escape table, const template registry              │
//! │  - Attribute name policies                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Fail at Construction
//!
//! Every error is raised by the constructor that receives bad input. A
//! [`Filter`] has no setters and its payload types have no public
//! constructors that skip validation, so [`render`] has no error path.
//!
//! Values are stored raw and escaped exactly once, at render time.
//!
//! ## Example
//!
//! ```
//! use ldapfilter::{Filter, MatchingRule};
//!
//! let filter = Filter::and([
//!     Filter::equality("objectClass", "user")?,
//!     Filter::starts_with("cn", "J*")?,
//!     Filter::not(Filter::extensible_match(
//!         "userAccountControl",
//!         "2",
//!         Some(MatchingRule::BIT_AND),
//!     )?),
//! ])?;
//!
//! assert_eq!(
//!     filter.to_string(),
//!     r"(&(objectClass=user)(cn=J\2A*)(!(userAccountControl:1.2.840.113556.1.4.803:=2)))"
//! );
//! # Ok::<(), ldapfilter::FilterError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`filter`]: The `Filter` tree and its constructors
//! - [`render`]: The renderer and the `render` entry point
//! - [`escape`]: Value escaping and unescaping
//! - [`templates`]: Node kinds and the template registry
//! - [`attribute`]: Attribute name validation and policies
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attribute;
pub mod config;
pub mod error;
pub mod escape;
pub mod filter;
pub mod render;
pub mod templates;

pub use attribute::{AttributeName, IntoAttributeName, NamePolicy};
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use escape::{escape, unescape};
pub use filter::{ExtensibleMatch, Filter, LogicalOp, MatchingRule, Substring};
pub use render::{render, Renderer};
pub use templates::{NodeKind, Templates};
