//! Policy-model capability used by the text adapter.
//!
//! # Purpose
//! Narrows the engine's model down to the two things the adapter needs:
//! inserting one rule into a section bucket and reading a section back out.
//!
//! # Key invariants
//! - The adapter never builds a model; it only inserts into or reads from one
//!   handed in by the caller.
//! - Rules within one label come back in insertion order.
use casbin::Model;

/// Rules of one policy-type label, borrowed from the model.
pub type LabelRules<'a> = (&'a str, Vec<&'a [String]>);

pub trait PolicyModel {
    /// Insert `rule` into the `sec`/`ptype` bucket.
    ///
    /// Returns `false` when the bucket is not defined by the model or the rule
    /// is already present.
    fn insert_rule(&mut self, sec: &str, ptype: &str, rule: Vec<String>) -> bool;

    /// Labels of section `sec` with their rules. Label order is unspecified.
    fn section_rules(&self, sec: &str) -> Vec<LabelRules<'_>>;
}

impl<M> PolicyModel for M
where
    M: Model + ?Sized,
{
    fn insert_rule(&mut self, sec: &str, ptype: &str, rule: Vec<String>) -> bool {
        self.add_policy(sec, ptype, rule)
    }

    fn section_rules(&self, sec: &str) -> Vec<LabelRules<'_>> {
        let Some(assertions) = self.get_model().get(sec) else {
            return Vec::new();
        };
        assertions
            .iter()
            .map(|(ptype, assertion)| {
                let rules = assertion
                    .get_policy()
                    .iter()
                    .map(|rule| rule.as_slice())
                    .collect();
                (ptype.as_str(), rules)
            })
            .collect()
    }
}
