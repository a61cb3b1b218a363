//! Filter rendering.
//!
//! The [`Renderer`] walks a [`Filter`] tree depth-first, left to right. Leaves
//! escape their values and fill their template; composites concatenate their
//! rendered children and wrap them in theirs. Rendering is a pure function of
//! the tree: no state, no caching, same tree in, same string out.

use std::fmt;

use crate::escape::escape;
use crate::filter::Filter;
use crate::templates::Templates;

/// Renders filters with a fixed template table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    templates: Templates,
}

impl Renderer {
    pub fn new(templates: Templates) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Render a filter tree to its RFC 4515 string.
    pub fn render(&self, root: &Filter) -> String {
        let rendered = self.render_node(root);
        tracing::trace!(kind = %root.kind(), len = rendered.len(), "rendered filter");
        rendered
    }

    fn render_node(&self, node: &Filter) -> String {
        let kind = node.kind();
        match node {
            Filter::Equality(a)
            | Filter::Approx(a)
            | Filter::GreaterOrEqual(a)
            | Filter::LessOrEqual(a) => {
                let value = escape(a.value());
                self.templates
                    .apply(kind, &[a.attribute().as_str(), value.as_str()])
            }
            Filter::Presence(name) => self.templates.apply(kind, &[name.as_str()]),
            Filter::Substring(sub) => {
                let pattern = sub.encoded_pattern();
                self.templates
                    .apply(kind, &[sub.attribute().as_str(), pattern.as_str()])
            }
            Filter::ExtensibleMatch(ext) => {
                let attribute = ext.attribute_part();
                let value = escape(ext.value());
                match ext.rule() {
                    Some(rule) => self
                        .templates
                        .apply(kind, &[&*attribute, value.as_str(), rule.as_str()]),
                    None => self.templates.apply(kind, &[&*attribute, value.as_str()]),
                }
            }
            Filter::And(_) | Filter::Or(_) | Filter::Not(_) => {
                let body: String = node
                    .children()
                    .iter()
                    .map(|child| self.render_node(child))
                    .collect();
                self.templates.apply(kind, &[body.as_str()])
            }
        }
    }
}

/// Render with the standard templates.
///
/// # Examples
/// ```
/// use ldapfilter::{render, Filter};
///
/// let filter = Filter::and([
///     Filter::equality("cn", "John")?,
///     Filter::not(Filter::presence("mail")?),
/// ])?;
/// assert_eq!(render(&filter), "(&(cn=John)(!(mail=*)))");
/// # Ok::<(), ldapfilter::FilterError>(())
/// ```
pub fn render(root: &Filter) -> String {
    Renderer::default().render(root)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ExtensibleMatch, LogicalOp, MatchingRule};

    fn eq(attr: &str, value: &str) -> Filter {
        Filter::equality(attr, value).unwrap()
    }

    #[test]
    fn renders_comparisons() {
        assert_eq!(render(&eq("cn", "John")), "(cn=John)");
        assert_eq!(render(&Filter::approx("sn", "Smyth").unwrap()), "(sn~=Smyth)");
        assert_eq!(
            render(&Filter::greater_or_equal("uidNumber", "1000").unwrap()),
            "(uidNumber>=1000)"
        );
        assert_eq!(
            render(&Filter::less_or_equal("pwdLastSet", "0").unwrap()),
            "(pwdLastSet<=0)"
        );
    }

    #[test]
    fn renders_presence() {
        assert_eq!(render(&Filter::presence("mail").unwrap()), "(mail=*)");
    }

    #[test]
    fn escapes_values_once() {
        assert_eq!(render(&eq("mail", "a*b(c)")), r"(mail=a\2Ab\28c\29)");
        assert_eq!(render(&eq("path", r"C:\tmp")), r"(path=C:\5Ctmp)");
        assert_eq!(render(&eq("cn", "nul\0")), r"(cn=nul\00)");
    }

    #[test]
    fn renders_substrings() {
        assert_eq!(render(&Filter::starts_with("cn", "Jo").unwrap()), "(cn=Jo*)");
        assert_eq!(render(&Filter::ends_with("cn", "son").unwrap()), "(cn=*son)");
        assert_eq!(render(&Filter::contains("cn", "oh").unwrap()), "(cn=*oh*)");
        assert_eq!(
            render(&Filter::substring("cn", Some("J"), ["o", "h"], Some("n")).unwrap()),
            "(cn=J*o*h*n)"
        );
        assert_eq!(
            render(&Filter::contains("cn", "a*b").unwrap()),
            r"(cn=*a\2Ab*)"
        );
    }

    #[test]
    fn renders_extensible_match() {
        assert_eq!(
            render(&Filter::extensible_match("cn", "Fred", None).unwrap()),
            "(cn:=Fred)"
        );
        assert_eq!(
            render(
                &Filter::extensible_match(
                    "userAccountControl",
                    "2",
                    Some(MatchingRule::BIT_AND)
                )
                .unwrap()
            ),
            "(userAccountControl:1.2.840.113556.1.4.803:=2)"
        );
        let ext = ExtensibleMatch::new("ou", "Sales(EU)", None)
            .unwrap()
            .with_dn_attributes();
        assert_eq!(render(&ext.into()), r"(ou:dn:=Sales\28EU\29)");

        let ext = ExtensibleMatch::new(
            "cn",
            "Jane",
            Some(MatchingRule::new("caseExactMatch").unwrap()),
        )
        .unwrap()
        .with_dn_attributes();
        assert_eq!(render(&ext.into()), "(cn:dn:caseExactMatch:=Jane)");
    }

    #[test]
    fn renders_composites_in_order() {
        let f = Filter::and([eq("cn", "a"), eq("sn", "b")]).unwrap();
        assert_eq!(render(&f), "(&(cn=a)(sn=b))");

        let f = Filter::or([eq("sn", "b"), eq("cn", "a")]).unwrap();
        assert_eq!(render(&f), "(|(sn=b)(cn=a))");
    }

    #[test]
    fn nested_not_never_collapses() {
        let f = Filter::not(Filter::not(eq("cn", "x")));
        assert_eq!(render(&f), "(!(!(cn=x)))");
    }

    #[test]
    fn renders_deep_trees() {
        let f = Filter::and([
            Filter::equality("objectClass", "user").unwrap(),
            Filter::or([
                Filter::starts_with("sAMAccountName", "adm").unwrap(),
                Filter::extensible_match(
                    "memberOf",
                    "CN=Admins,DC=corp",
                    Some(MatchingRule::IN_CHAIN),
                )
                .unwrap(),
            ])
            .unwrap(),
            Filter::not(
                Filter::extensible_match(
                    "userAccountControl",
                    "2",
                    Some(MatchingRule::BIT_AND),
                )
                .unwrap(),
            ),
        ])
        .unwrap();

        assert_eq!(
            render(&f),
            "(&(objectClass=user)\
             (|(sAMAccountName=adm*)(memberOf:1.2.840.113556.1.4.1941:=CN=Admins,DC=corp))\
             (!(userAccountControl:1.2.840.113556.1.4.803:=2)))"
        );
    }

    #[test]
    fn single_child_composites() {
        assert_eq!(render(&Filter::and([eq("cn", "a")]).unwrap()), "(&(cn=a))");
        assert_eq!(render(&Filter::or([eq("cn", "a")]).unwrap()), "(|(cn=a))");
        let not = Filter::composite(LogicalOp::Not, [eq("cn", "a")]).unwrap();
        assert_eq!(render(&not), "(!(cn=a))");
    }

    #[test]
    fn rendering_is_repeatable() {
        let f = Filter::and([eq("cn", "a*"), Filter::presence("mail").unwrap()]).unwrap();
        let renderer = Renderer::new(Templates::standard());
        assert_eq!(renderer.render(&f), renderer.render(&f));
        assert_eq!(renderer.render(&f), render(&f));
    }

    #[test]
    fn display_matches_render() {
        let f = Filter::not(eq("cn", "x"));
        assert_eq!(f.to_string(), "(!(cn=x))");
        assert_eq!(format!("{}", f), render(&f));
    }

    #[test]
    fn placeholder_text_in_values_is_literal() {
        assert_eq!(render(&eq("cn", "{0}{1}")), "(cn={0}{1})");
    }
}
