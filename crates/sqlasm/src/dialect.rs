//! Dialect policies.
//!
//! A [`Dialect`] knows how a particular database quotes identifiers and
//! literals and what its placeholder markers look like. Statement generators
//! only ever go through this trait; nothing else in the crate knows which
//! database it is producing SQL for.
//!
//! Generators always emit the *generic* marker (`?` for every built-in
//! dialect). The renumbering pass then rewrites each generic marker into
//! [`Dialect::numbered_placeholder`], so Postgres ends up with `$1, $2, ...`
//! while ANSI and MySQL keep `?`.

use crate::error::{AsmError, AsmResult};
use crate::value::Value;
use std::fmt;

/// Identifier quoting and placeholder policy for one database product.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Human readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table or column name).
    ///
    /// Dotted names are quoted per segment and a `*` segment is left bare,
    /// so `public.users` and `u.*` both come out right.
    fn quote_identifier(&self, name: &str) -> String;

    /// Generic marker written at emission time, before numbering.
    fn placeholder_marker(&self) -> &'static str {
        "?"
    }

    /// Token the literal-inlining pass searches for.
    fn canonical_placeholder(&self) -> &'static str {
        self.placeholder_marker()
    }

    /// Final marker for the `index`-th parameter (1-based).
    fn numbered_placeholder(&self, index: usize) -> String {
        let _ = index;
        self.placeholder_marker().to_string()
    }

    /// Whether a backslash escapes the next character inside string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Quote `text` as a string literal.
    fn quote_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for ch in text.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }

    /// Render a value as literal SQL text.
    ///
    /// Fails for values with no literal form (non-finite floats).
    fn render_literal(&self, value: &Value) -> AsmResult<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(true) => Ok("TRUE".to_string()),
            Value::Bool(false) => Ok("FALSE".to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(x) if x.is_finite() => Ok(format!("{x:?}")),
            Value::Float(x) => Err(AsmError::UnrepresentableLiteral(format!(
                "non-finite float {x}"
            ))),
            Value::Text(s) => Ok(self.quote_literal(s)),
            Value::Raw(s) => Ok(s.clone()),
        }
    }
}

fn quote_segments(name: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if segment == "*" {
            out.push('*');
            continue;
        }
        out.push(open);
        for ch in segment.chars() {
            if ch == close {
                out.push(close);
            }
            out.push(ch);
        }
        out.push(close);
    }
    out
}

/// Standard SQL: `"ident"`, `?` markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ansi;

impl Dialect for Ansi {
    fn name(&self) -> &'static str {
        "ANSI"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_segments(name, '"', '"')
    }
}

/// PostgreSQL: `"ident"`, numbered `$n` markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_segments(name, '"', '"')
    }

    fn numbered_placeholder(&self, index: usize) -> String {
        format!("${index}")
    }
}

/// MySQL: `` `ident` ``, `?` markers, backslash escapes in literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_segments(name, '`', '`')
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn quote_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for ch in text.chars() {
            match ch {
                '\'' => out.push_str("''"),
                '\\' => out.push_str("\\\\"),
                '\0' => out.push_str("\\0"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_simple_and_dotted_names() {
        assert_eq!(Ansi.quote_identifier("users"), r#""users""#);
        assert_eq!(Postgres.quote_identifier("public.users"), r#""public"."users""#);
        assert_eq!(MySql.quote_identifier("u.*"), "`u`.*");
    }

    #[test]
    fn doubles_embedded_quote_chars() {
        assert_eq!(Ansi.quote_identifier(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(MySql.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn numbered_markers() {
        assert_eq!(Postgres.numbered_placeholder(3), "$3");
        assert_eq!(Ansi.numbered_placeholder(3), "?");
        assert_eq!(MySql.numbered_placeholder(3), "?");
    }

    #[test]
    fn literal_quoting() {
        assert_eq!(Ansi.quote_literal("it's"), "'it''s'");
        assert_eq!(MySql.quote_literal(r"a\b'c"), r"'a\\b''c'");
    }

    #[test]
    fn render_literal_kinds() {
        assert_eq!(Ansi.render_literal(&Value::Null).unwrap(), "NULL");
        assert_eq!(Ansi.render_literal(&Value::Bool(true)).unwrap(), "TRUE");
        assert_eq!(Ansi.render_literal(&Value::Int(-4)).unwrap(), "-4");
        assert_eq!(Ansi.render_literal(&Value::Float(2.5)).unwrap(), "2.5");
        assert_eq!(Ansi.render_literal(&Value::raw("NOW()")).unwrap(), "NOW()");
    }

    #[test]
    fn render_literal_rejects_non_finite() {
        let err = Ansi.render_literal(&Value::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, AsmError::UnrepresentableLiteral(_)));
    }
}
