//! Loader for the line-oriented grammar format.
//!
//! One rule per line, whitespace-separated: one token is an epsilon
//! rule, two tokens a unit rule, three a two-symbol rule. A line
//! reading `Count:` terminates the rule section; the next nonblank
//! line names the start nonterminal. Blank lines and `#` comments are
//! ignored throughout.

use std::fmt;

use cflr_symbol::SymbolSource;

use crate::CnfGrammar;

/// A grammar still at the string level, before interning. Template
/// expansion operates on this form.
#[derive(Clone, Debug, Default)]
pub struct RawGrammar {
    pub start: String,
    pub epsilon_rules: Vec<String>,
    pub unit_rules: Vec<(String, String)>,
    pub binary_rules: Vec<(String, String, String)>,
}

#[derive(Debug)]
pub enum GrammarError {
    Malformed { line: usize, reason: String },
    MissingStart,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::Malformed { line, reason } => {
                write!(f, "malformed grammar line {}: {}", line, reason)
            }
            GrammarError::MissingStart => {
                write!(f, "grammar has no start nonterminal after `Count:`")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

impl RawGrammar {
    /// Parses grammar text. Fails on lines with more than three fields
    /// and on a missing start nonterminal.
    pub fn load_str(text: &str) -> Result<RawGrammar, GrammarError> {
        let mut result = RawGrammar::default();
        let mut start = None;
        let mut lines = text.lines().enumerate();
        while let Some((index, line)) = lines.next() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "Count:" {
                for (_, rest) in lines.by_ref() {
                    let rest = rest.trim();
                    if rest.is_empty() || rest.starts_with('#') {
                        continue;
                    }
                    start = Some(rest.to_string());
                    break;
                }
                break;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [lhs] => result.epsilon_rules.push(lhs.to_string()),
                [lhs, rhs] => result.unit_rules.push((lhs.to_string(), rhs.to_string())),
                [lhs, rhs0, rhs1] => {
                    result
                        .binary_rules
                        .push((lhs.to_string(), rhs0.to_string(), rhs1.to_string()))
                }
                _ => {
                    return Err(GrammarError::Malformed {
                        line: index + 1,
                        reason: format!("expected 1 to 3 fields, got {}", fields.len()),
                    })
                }
            }
        }
        result.start = start.ok_or(GrammarError::MissingStart)?;
        Ok(result)
    }

    /// Interns every label, producing the grammar the solver consumes.
    pub fn intern(&self, syms: &SymbolSource) -> CnfGrammar {
        let mut grammar = CnfGrammar::new(syms.intern(&self.start));
        for lhs in &self.epsilon_rules {
            grammar.epsilon_rule(syms.intern(lhs));
        }
        for (lhs, rhs) in &self.unit_rules {
            grammar.unit_rule(syms.intern(lhs), syms.intern(rhs));
        }
        for (lhs, rhs0, rhs1) in &self.binary_rules {
            grammar.binary_rule(syms.intern(lhs), syms.intern(rhs0), syms.intern(rhs1));
        }
        grammar
    }
}

impl CnfGrammar {
    /// Parses and interns grammar text in one step, without template
    /// expansion. Grammars that may contain `_i` templates go through
    /// [`RawGrammar`] instead.
    pub fn load_str(text: &str, syms: &SymbolSource) -> Result<CnfGrammar, GrammarError> {
        Ok(RawGrammar::load_str(text)?.intern(syms))
    }
}
