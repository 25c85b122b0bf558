//! Policy line codec: `<label>, <token1>, <token2>, ...`.
//!
//! Commas and newlines inside a token are not escaped, so such tokens do not
//! survive a load/save round trip.
use crate::PolicyModel;

/// Field filter applied while loading, one positional value per rule field.
///
/// An empty value matches any field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    pub p: Vec<String>,
    pub g: Vec<String>,
}

impl PolicyFilter {
    pub fn new(p: Vec<String>, g: Vec<String>) -> Self {
        Self { p, g }
    }

    /// Whether `rule` from section `sec` passes the filter.
    pub fn matches(&self, sec: &str, rule: &[String]) -> bool {
        let values = match sec {
            "p" => &self.p,
            "g" => &self.g,
            _ => return true,
        };
        values.iter().enumerate().all(|(idx, value)| {
            value.is_empty() || rule.get(idx).is_some_and(|field| field == value)
        })
    }
}

impl From<casbin::Filter<'_>> for PolicyFilter {
    fn from(filter: casbin::Filter<'_>) -> Self {
        Self {
            p: filter.p.into_iter().map(str::to_owned).collect(),
            g: filter.g.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Join rule tokens with `", "`.
pub fn array_to_string(tokens: &[String]) -> String {
    tokens.join(", ")
}

/// Parse one policy line and insert the rule into `model`.
///
/// Returns whether a rule was inserted. Comment lines, lines without rule
/// tokens and lines outside the `p`/`g` sections are ignored.
pub fn load_policy_line<M>(line: &str, model: &mut M) -> bool
where
    M: PolicyModel + ?Sized,
{
    let Some(parsed) = ParsedLine::parse(line) else {
        tracing::trace!(line, "ignoring policy line");
        return false;
    };
    parsed.insert_into(model)
}

/// Like [`load_policy_line`], skipping rules that do not match `filter`.
///
/// Returns `true` when the line was filtered out.
pub fn load_filtered_policy_line<M>(line: &str, model: &mut M, filter: &PolicyFilter) -> bool
where
    M: PolicyModel + ?Sized,
{
    let Some(parsed) = ParsedLine::parse(line) else {
        tracing::trace!(line, "ignoring policy line");
        return false;
    };
    if !filter.matches(parsed.sec, &parsed.tokens[1..]) {
        return true;
    }
    parsed.insert_into(model);
    false
}

struct ParsedLine {
    sec: &'static str,
    // Label followed by the rule fields.
    tokens: Vec<String>,
}

impl ParsedLine {
    fn parse(line: &str) -> Option<Self> {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let tokens: Vec<String> = line
            .split(',')
            .map(|token| token.trim().to_string())
            .collect();
        if tokens.len() < 2 {
            return None;
        }
        let sec = match tokens[0].chars().next() {
            Some('p') => "p",
            Some('g') => "g",
            _ => return None,
        };
        Some(Self { sec, tokens })
    }

    fn insert_into<M>(mut self, model: &mut M) -> bool
    where
        M: PolicyModel + ?Sized,
    {
        let rule = self.tokens.split_off(1);
        model.insert_rule(self.sec, &self.tokens[0], rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac_model;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn array_to_string_joins_with_comma_space() {
        assert_eq!(
            array_to_string(&strings(&["alice", "data1", "read"])),
            "alice, data1, read"
        );
        assert_eq!(array_to_string(&[]), "");
    }

    #[tokio::test]
    async fn load_line_routes_by_label() {
        let mut model = rbac_model().await.expect("model");
        assert!(load_policy_line("p, alice, data1, read", &mut model));
        assert!(load_policy_line("g,bob ,  admin", &mut model));

        let p = model.section_rules("p");
        assert_eq!(p[0].1, vec![strings(&["alice", "data1", "read"]).as_slice()]);
        let g = model.section_rules("g");
        assert_eq!(g[0].1, vec![strings(&["bob", "admin"]).as_slice()]);
    }

    #[tokio::test]
    async fn load_line_ignores_comments_and_bare_labels() {
        let mut model = rbac_model().await.expect("model");
        assert!(!load_policy_line("# p, alice, data1, read", &mut model));
        assert!(!load_policy_line("p", &mut model));
        assert!(!load_policy_line("", &mut model));
        assert!(!load_policy_line("r, alice, data1, read", &mut model));
        assert!(model.section_rules("p")[0].1.is_empty());
    }

    #[tokio::test]
    async fn load_line_with_undefined_label_inserts_nothing() {
        let mut model = rbac_model().await.expect("model");
        assert!(!load_policy_line("p2, alice, data1, read", &mut model));
    }

    #[test]
    fn filter_matches_positionally() {
        let filter = PolicyFilter::new(strings(&["", "data1"]), strings(&["alice"]));
        assert!(filter.matches("p", &strings(&["alice", "data1", "read"])));
        assert!(filter.matches("p", &strings(&["bob", "data1", "write"])));
        assert!(!filter.matches("p", &strings(&["bob", "data2", "write"])));
        assert!(filter.matches("g", &strings(&["alice", "admin"])));
        assert!(!filter.matches("g", &strings(&["bob", "admin"])));
        // Rules shorter than the filter cannot match a non-empty value.
        assert!(!filter.matches("p", &strings(&["alice"])));
        assert!(PolicyFilter::default().matches("p", &strings(&["anyone"])));
    }

    #[test]
    fn filter_from_casbin_filter() {
        let filter = PolicyFilter::from(casbin::Filter {
            p: vec!["alice"],
            g: vec![],
        });
        assert_eq!(filter.p, strings(&["alice"]));
        assert!(filter.g.is_empty());
    }

    #[tokio::test]
    async fn filtered_line_is_skipped() {
        let mut model = rbac_model().await.expect("model");
        let filter = PolicyFilter::new(strings(&["alice"]), Vec::new());
        assert!(load_filtered_policy_line(
            "p, bob, data2, write",
            &mut model,
            &filter
        ));
        assert!(!load_filtered_policy_line(
            "p, alice, data1, read",
            &mut model,
            &filter
        ));
        assert_eq!(model.section_rules("p")[0].1.len(), 1);
    }
}
