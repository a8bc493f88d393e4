//! # Template Engine
//!
//! Substitutes `%token%` placeholders in a permalink template and normalizes
//! the result into a path with exactly one trailing slash.
//!
//! Substitution is one left-to-right scan. At every `%` the engine takes the
//! text up to the next `%` as a candidate token and looks it up by exact match,
//! so `%product%` never matches inside `%product_type%`. An unknown candidate
//! is copied through, and scanning resumes at its closing `%`, which lets a
//! stray `%` in front of a real token (`100%/%category%`) still resolve the
//! token.

use super::ReplacementTable;
use crate::constants::TOKEN_DELIMITER;

/// Renders templates against replacement tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEngine {
    normalize_trailing_slash: bool,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self {
            normalize_trailing_slash: true,
        }
    }
}

impl TemplateEngine {
    pub fn new(normalize_trailing_slash: bool) -> Self {
        Self {
            normalize_trailing_slash,
        }
    }

    /// True when `template` has no placeholder delimiter and needs no work at all
    pub fn is_static(template: &str) -> bool {
        !template.contains(TOKEN_DELIMITER)
    }

    /// Substitute and normalize. Templates without any `%` are returned unchanged.
    pub fn render(&self, template: &str, table: &ReplacementTable) -> String {
        if Self::is_static(template) {
            return template.to_string();
        }

        let substituted = substitute(template, table);
        if self.normalize_trailing_slash {
            normalize_path(&substituted)
        } else {
            substituted.trim().to_string()
        }
    }

    /// Render with a host-supplied token table merged under the resolved family tokens
    pub fn render_with_extra(
        &self,
        template: &str,
        family_tokens: &ReplacementTable,
        extra_tokens: &ReplacementTable,
    ) -> String {
        if Self::is_static(template) {
            return template.to_string();
        }

        let mut table = extra_tokens.clone();
        table.extend(family_tokens.clone());
        self.render(template, &table)
    }
}

/// Replace every known `%token%` in one pass, leaving unknown ones intact
pub fn substitute(template: &str, table: &ReplacementTable) -> String {
    let lookup = table.lookup();
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(TOKEN_DELIMITER) {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find(TOKEN_DELIMITER) else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };

        // `%` is one byte, so the token spans open..=open + 1 + close
        let token_end = open + close + 2;
        match lookup.get(&rest[open..token_end]) {
            Some(replacement) => {
                rendered.push_str(replacement);
                rest = &rest[token_end..];
            }
            None => {
                rendered.push(TOKEN_DELIMITER);
                rest = after_open;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Trim surrounding whitespace and end with exactly one `/`
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path
        .trim()
        .trim_end_matches(['/', '\\'])
        .to_string();
    normalized.push('/');
    normalized
}
