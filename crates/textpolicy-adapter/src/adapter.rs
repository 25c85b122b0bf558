//! Casbin adapter over an in-memory policy text blob.
//!
//! # Purpose and responsibility
//! Loads a newline-delimited policy text into a caller-supplied model and
//! serializes the model back into that text.
//!
//! # Key invariants and assumptions
//! - The held text is only ever replaced wholesale (save, clear).
//! - Load never touches the model when the held text is empty.
//! - Incremental mutations are rejected; the blob is a snapshot.
//!
//! # Common pitfalls
//! - An `Enforcer` keeps casbin auto-save enabled by default, so its
//!   `add_policy`/`remove_policy` calls fail against this adapter. Disable
//!   auto-save to mutate in memory, then call `save_policy` to refresh the text.
use crate::line::{PolicyFilter, array_to_string, load_filtered_policy_line, load_policy_line};
use crate::{AdapterError, AdapterResult, PolicyModel};
use async_trait::async_trait;
use casbin::{Adapter, Filter, Model, Result};

/// Sections written by [`TextAdapter::save`], in output order.
const SAVED_SECTIONS: [&str; 2] = ["p", "g"];

#[derive(Debug, Clone, Default)]
pub struct TextAdapter {
    text: String,
    // Set by a filtered load, cleared by a full load.
    filtered: bool,
}

impl TextAdapter {
    /// Wrap `text` verbatim. Emptiness is only checked when loading.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filtered: false,
        }
    }

    /// Current policy text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the adapter, returning the held text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Parse the held text into `model`, one rule per non-empty line.
    ///
    /// # Errors
    /// - [`AdapterError::EmptyInput`] when the held text is empty; the model is
    ///   left untouched.
    pub fn load<M>(&mut self, model: &mut M) -> AdapterResult<()>
    where
        M: PolicyModel + ?Sized,
    {
        let mut inserted = 0usize;
        self.for_each_line(|line| {
            if load_policy_line(line, &mut *model) {
                inserted += 1;
            }
        })?;
        self.filtered = false;
        tracing::debug!(inserted, "loaded policy text");
        Ok(())
    }

    /// Parse the held text into `model`, keeping only rules that match
    /// `filter`.
    ///
    /// # Errors
    /// - [`AdapterError::EmptyInput`] when the held text is empty.
    pub fn load_filtered<M>(&mut self, model: &mut M, filter: &PolicyFilter) -> AdapterResult<()>
    where
        M: PolicyModel + ?Sized,
    {
        let mut skipped = 0usize;
        self.for_each_line(|line| {
            if load_filtered_policy_line(line, &mut *model, filter) {
                skipped += 1;
            }
        })?;
        self.filtered = true;
        tracing::debug!(skipped, "loaded filtered policy text");
        Ok(())
    }

    /// Replace the held text with the `p` and `g` rules of `model`.
    ///
    /// Labels are written in lexical order within each section so that saving
    /// an unchanged model always yields the same text.
    pub fn save<M>(&mut self, model: &M) -> AdapterResult<()>
    where
        M: PolicyModel + ?Sized,
    {
        let mut buf = String::new();
        let mut written = 0usize;
        for sec in SAVED_SECTIONS {
            let mut labels = model.section_rules(sec);
            labels.sort_by(|(left, _), (right, _)| left.cmp(right));
            for (ptype, rules) in labels {
                for rule in rules {
                    buf.push_str(ptype);
                    buf.push_str(", ");
                    buf.push_str(&array_to_string(rule));
                    buf.push('\n');
                    written += 1;
                }
            }
        }
        self.text = buf.trim_end_matches('\n').to_string();
        tracing::debug!(written, "saved policy text");
        Ok(())
    }

    /// Drop the held text; a following load fails with `EmptyInput`.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn for_each_line(&self, mut apply: impl FnMut(&str)) -> AdapterResult<()> {
        if self.text.is_empty() {
            return Err(AdapterError::EmptyInput);
        }
        for line in self.text.split('\n') {
            // Only exactly-empty lines are skipped; whitespace-only lines reach
            // the parser trimmed.
            if line.is_empty() {
                continue;
            }
            apply(line.trim());
        }
        Ok(())
    }
}

fn not_implemented(op: &'static str) -> Result<bool> {
    Err(AdapterError::NotImplemented(op).into())
}

#[async_trait]
impl Adapter for TextAdapter {
    async fn load_policy(&mut self, m: &mut dyn Model) -> Result<()> {
        self.load(m)?;
        Ok(())
    }

    async fn load_filtered_policy<'a>(&mut self, m: &mut dyn Model, f: Filter<'a>) -> Result<()> {
        self.load_filtered(m, &PolicyFilter::from(f))?;
        Ok(())
    }

    async fn save_policy(&mut self, m: &mut dyn Model) -> Result<()> {
        self.save(&*m)?;
        Ok(())
    }

    async fn clear_policy(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn is_filtered(&self) -> bool {
        self.filtered
    }

    async fn add_policy(&mut self, _sec: &str, _ptype: &str, _rule: Vec<String>) -> Result<bool> {
        not_implemented("add_policy")
    }

    async fn add_policies(
        &mut self,
        _sec: &str,
        _ptype: &str,
        _rules: Vec<Vec<String>>,
    ) -> Result<bool> {
        not_implemented("add_policies")
    }

    async fn remove_policy(
        &mut self,
        _sec: &str,
        _ptype: &str,
        _rule: Vec<String>,
    ) -> Result<bool> {
        not_implemented("remove_policy")
    }

    async fn remove_policies(
        &mut self,
        _sec: &str,
        _ptype: &str,
        _rules: Vec<Vec<String>>,
    ) -> Result<bool> {
        not_implemented("remove_policies")
    }

    async fn remove_filtered_policy(
        &mut self,
        _sec: &str,
        _ptype: &str,
        _field_index: usize,
        _field_values: Vec<String>,
    ) -> Result<bool> {
        not_implemented("remove_filtered_policy")
    }
}
