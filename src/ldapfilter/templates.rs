//! Rendering templates and the template registry.
//!
//! Each node kind has one template with positional placeholders (`{0}`, `{1}`,
//! `{2}`). The registry is a `const` table: it is fixed at compile time and
//! there is no way to register or replace entries at runtime.

use std::fmt;

/// The closed set of node kinds a template exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Equality,
    Approx,
    GreaterOrEqual,
    LessOrEqual,
    Presence,
    Substring,
    /// Extensible match without a matching rule.
    ExtensibleMatch,
    /// Extensible match qualified by a matching rule.
    ExtensibleMatchRule,
    And,
    Or,
    Not,
}

impl NodeKind {
    pub const ALL: [NodeKind; 11] = [
        NodeKind::Equality,
        NodeKind::Approx,
        NodeKind::GreaterOrEqual,
        NodeKind::LessOrEqual,
        NodeKind::Presence,
        NodeKind::Substring,
        NodeKind::ExtensibleMatch,
        NodeKind::ExtensibleMatchRule,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Not,
    ];

    /// Number of placeholders the kind's template takes.
    pub const fn arity(self) -> usize {
        match self {
            NodeKind::Presence | NodeKind::And | NodeKind::Or | NodeKind::Not => 1,
            NodeKind::ExtensibleMatchRule => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Equality => "equality",
            NodeKind::Approx => "approx",
            NodeKind::GreaterOrEqual => "greater-or-equal",
            NodeKind::LessOrEqual => "less-or-equal",
            NodeKind::Presence => "presence",
            NodeKind::Substring => "substring",
            NodeKind::ExtensibleMatch => "extensible-match",
            NodeKind::ExtensibleMatchRule => "extensible-match-rule",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Not => "not",
        };
        f.write_str(name)
    }
}

/// A single registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    pub kind: NodeKind,
    pub template: &'static str,
}

impl TemplateSpec {
    const fn new(kind: NodeKind, template: &'static str) -> Self {
        Self { kind, template }
    }
}

/// Registry of all filter templates.
pub const TEMPLATES: &[TemplateSpec] = &[
    // Attribute/value comparisons
    TemplateSpec::new(NodeKind::Equality, "({0}={1})"),
    TemplateSpec::new(NodeKind::Approx, "({0}~={1})"),
    TemplateSpec::new(NodeKind::GreaterOrEqual, "({0}>={1})"),
    TemplateSpec::new(NodeKind::LessOrEqual, "({0}<={1})"),
    TemplateSpec::new(NodeKind::Presence, "({0}=*)"),
    // {1} is the pre-assembled, already-escaped fragment list
    TemplateSpec::new(NodeKind::Substring, "({0}={1})"),
    TemplateSpec::new(NodeKind::ExtensibleMatch, "({0}:={1})"),
    TemplateSpec::new(NodeKind::ExtensibleMatchRule, "({0}:{2}:={1})"),
    // Logical composites, {0} is the concatenated children
    TemplateSpec::new(NodeKind::And, "(&{0})"),
    TemplateSpec::new(NodeKind::Or, "(|{0})"),
    TemplateSpec::new(NodeKind::Not, "(!{0})"),
];

/// An immutable handle on a template table, captured by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Templates {
    table: &'static [TemplateSpec],
}

impl Default for Templates {
    fn default() -> Self {
        Self::standard()
    }
}

impl Templates {
    /// The RFC 4515 templates.
    pub const fn standard() -> Self {
        Self { table: TEMPLATES }
    }

    /// Look up the template for a node kind.
    ///
    /// # Panics
    /// If the table has no entry for `kind`. The kind set is closed and the
    /// standard table covers all of it, so this is an internal defect.
    pub fn template_for(&self, kind: NodeKind) -> &'static str {
        match self.table.iter().find(|spec| spec.kind == kind) {
            Some(spec) => spec.template,
            None => panic!("no template registered for node kind '{}'", kind),
        }
    }

    /// Substitute positional arguments into the template for `kind`.
    pub fn apply(&self, kind: NodeKind, args: &[&str]) -> String {
        debug_assert_eq!(args.len(), kind.arity(), "wrong argument count for {}", kind);
        fill(self.template_for(kind), args)
    }
}

/// Replace each `{n}` in `template` with `args[n]`.
///
/// The template is scanned once; substituted text is never re-scanned, so a
/// value that happens to contain `{1}` is copied literally. Placeholders with
/// no matching argument are left as-is.
pub fn fill(template: &str, args: &[&str]) -> String {
    let extra: usize = args.iter().map(|a| a.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|n| (n, close)));

        match placeholder {
            Some((n, close)) if n < args.len() => {
                out.push_str(args[n]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
