#![allow(dead_code)]

//! Minimal model of the C preprocessor's definition handling.
//!
//! Only what the guard tests need: `#ifndef` / `#define` / `#endif`
//! tracking, predefined macros, and detection of conflicting redefinitions.
//! Identical redefinition is accepted, as in C.

use std::collections::BTreeMap;

/// Macro definitions visible to an including translation unit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MacroContext {
    defs: BTreeMap<String, String>,
}

impl MacroContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefine a macro, as an outer build context would.
    pub fn define(&mut self, name: &str, body: &str) {
        self.defs.insert(name.to_string(), body.to_string());
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Expansion body of a macro, if defined. Bare defines have an empty
    /// body.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defs.get(name).map(String::as_str)
    }

    /// Process header text the way an `#include` would.
    ///
    /// Returns an error on a redefinition with a different body, unbalanced
    /// conditionals, or a malformed directive.
    pub fn include(&mut self, text: &str) -> Result<(), String> {
        let mut active = vec![true];

        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("#ifndef") {
                let name = rest.trim();
                if name.is_empty() {
                    return Err("#ifndef without a macro name".to_string());
                }
                let enabled = *active.last().unwrap() && !self.defs.contains_key(name);
                active.push(enabled);
            } else if line.starts_with("#endif") {
                if active.len() == 1 {
                    return Err("unbalanced #endif".to_string());
                }
                active.pop();
            } else if let Some(rest) = line.strip_prefix("#define") {
                if !*active.last().unwrap() {
                    continue;
                }
                let rest = rest.trim();
                let (name, body) = match rest.split_once(' ') {
                    Some((name, body)) => (name, body.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err("#define without a macro name".to_string());
                }
                match self.defs.get(name) {
                    Some(existing) if existing != body => {
                        return Err(format!(
                            "macro {name} redefined: {existing:?} vs {body:?}"
                        ));
                    }
                    Some(_) => {}
                    None => {
                        self.defs.insert(name.to_string(), body.to_string());
                    }
                }
            }
            // Comments and blank lines are ignored.
        }

        if active.len() != 1 {
            return Err("unterminated #ifndef".to_string());
        }
        Ok(())
    }
}
