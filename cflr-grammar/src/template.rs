//! Expansion of `_i`-indexed grammar templates.
//!
//! A symbol ending in the literal suffix `_i` is a template; a symbol
//! ending in `_i_<k>` for an integer k is a concrete instance. Before
//! the solver runs, every template rule is instantiated once for each
//! distinct k occurring in the graph's labels. The solver itself never
//! sees template symbols.

use std::collections::BTreeSet;

use log::debug;

use crate::RawGrammar;

/// Whether a label is a template symbol (`_i` suffix with no index).
pub fn is_template_symbol(label: &str) -> bool {
    label.ends_with("_i")
}

/// Extracts k from a concrete instance label ending in `_i_<k>`.
pub fn concrete_index(label: &str) -> Option<u64> {
    let pos = label.rfind("_i_")?;
    let digits = &label[pos + 3..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Replaces a trailing `_i` with `_i_<index>`; non-template labels pass
/// through unchanged.
fn instantiate(label: &str, index: u64) -> String {
    if is_template_symbol(label) {
        format!("{}_i_{}", &label[..label.len() - 2], index)
    } else {
        label.to_string()
    }
}

/// Collects the distinct indices named by concrete `_i_<k>` labels.
pub fn collect_indices<'a>(labels: impl Iterator<Item = &'a str>) -> BTreeSet<u64> {
    labels.filter_map(concrete_index).collect()
}

impl RawGrammar {
    /// Whether any rule mentions a template symbol.
    pub fn needs_expansion(&self) -> bool {
        let template = |label: &String| is_template_symbol(label);
        self.epsilon_rules.iter().any(template)
            || self
                .unit_rules
                .iter()
                .any(|(lhs, rhs)| template(lhs) || template(rhs))
            || self
                .binary_rules
                .iter()
                .any(|(lhs, rhs0, rhs1)| template(lhs) || template(rhs0) || template(rhs1))
    }

    /// Instantiates every template rule once per index; rules without
    /// template symbols are copied as-is. The start symbol is never
    /// expanded.
    pub fn expand(&self, indices: &BTreeSet<u64>) -> RawGrammar {
        let mut result = RawGrammar {
            start: self.start.clone(),
            ..RawGrammar::default()
        };
        let mut expanded = 0usize;
        for lhs in &self.epsilon_rules {
            if is_template_symbol(lhs) {
                for &index in indices {
                    result.epsilon_rules.push(instantiate(lhs, index));
                    expanded += 1;
                }
            } else {
                result.epsilon_rules.push(lhs.clone());
            }
        }
        for (lhs, rhs) in &self.unit_rules {
            if is_template_symbol(lhs) || is_template_symbol(rhs) {
                for &index in indices {
                    result
                        .unit_rules
                        .push((instantiate(lhs, index), instantiate(rhs, index)));
                    expanded += 1;
                }
            } else {
                result.unit_rules.push((lhs.clone(), rhs.clone()));
            }
        }
        for (lhs, rhs0, rhs1) in &self.binary_rules {
            if is_template_symbol(lhs) || is_template_symbol(rhs0) || is_template_symbol(rhs1) {
                for &index in indices {
                    result.binary_rules.push((
                        instantiate(lhs, index),
                        instantiate(rhs0, index),
                        instantiate(rhs1, index),
                    ));
                    expanded += 1;
                }
            } else {
                result
                    .binary_rules
                    .push((lhs.clone(), rhs0.clone(), rhs1.clone()));
            }
        }
        debug!(
            "expanded {} template rules over {} indices",
            expanded,
            indices.len()
        );
        result
    }

    /// Expands against the indices named by the given labels. Grammars
    /// without template symbols, and graphs without indexed labels, pass
    /// through unchanged.
    pub fn expand_for_labels<'a>(&self, labels: impl Iterator<Item = &'a str>) -> RawGrammar {
        if !self.needs_expansion() {
            return self.clone();
        }
        let indices = collect_indices(labels);
        if indices.is_empty() {
            return self.clone();
        }
        self.expand(&indices)
    }
}
