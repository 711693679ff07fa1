//! Placeholder marker passes over assembled SQL text.
//!
//! Generators emit the dialect's generic marker (see
//! [`Dialect::placeholder_marker`]). Once a statement is fully assembled one of
//! two passes runs over its text:
//!
//! - [`renumber`] rewrites each marker into the dialect's final form
//!   (`$1, $2, ...` for Postgres);
//! - [`inline`] replaces each marker with the matching parameter rendered as a
//!   literal.
//!
//! Both walk the text left to right and skip anything inside single-quoted
//! literals and double-quoted or backtick-quoted identifiers, so a `?` in
//! `'what?'` is never mistaken for a marker.

use crate::dialect::Dialect;
use crate::error::{AsmError, AsmResult};
use crate::param::ParamList;
use crate::value::Value;
use std::convert::Infallible;

/// Walk `sql`, copying it to a new string and handing every marker occurrence
/// outside quoted text to `on_marker` (with its 1-based position) instead of
/// copying it. Returns the rewritten text and the number of markers seen.
fn scan<E, F>(
    sql: &str,
    marker: &str,
    backslash_escapes: bool,
    mut on_marker: F,
) -> Result<(String, usize), E>
where
    F: FnMut(usize, &mut String) -> Result<(), E>,
{
    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut count = 0;
    let mut pos = 0;

    while pos < sql.len() {
        let rest = &sql[pos..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        match quote {
            None if !marker.is_empty() && rest.starts_with(marker) => {
                count += 1;
                on_marker(count, &mut out)?;
                pos += marker.len();
                continue;
            }
            None => {
                if matches!(ch, '\'' | '"' | '`') {
                    quote = Some(ch);
                }
            }
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if backslash_escapes && ch == '\\' && q != '`' {
                    escaped = true;
                } else if ch == q {
                    // A doubled quote closes and immediately reopens.
                    quote = None;
                }
            }
        }

        out.push(ch);
        pos += ch.len_utf8();
    }

    Ok((out, count))
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

/// Count generic markers outside quoted text.
pub fn count_markers(sql: &str, dialect: &dyn Dialect) -> usize {
    let marker = dialect.placeholder_marker();
    let (_, count) = infallible(scan(sql, marker, dialect.backslash_escapes(), |_, out| {
        out.push_str(marker);
        Ok(())
    }));
    count
}

/// Rewrite every generic marker into the dialect's numbered form, left to
/// right.
///
/// # Example
/// ```ignore
/// let sql = renumber("SELECT * FROM t WHERE a = ? AND b = '?' AND c = ?", &Postgres);
/// assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND b = '?' AND c = $2");
/// ```
pub fn renumber(sql: &str, dialect: &dyn Dialect) -> String {
    let (out, _) = infallible(scan(
        sql,
        dialect.placeholder_marker(),
        dialect.backslash_escapes(),
        |idx, out| {
            out.push_str(&dialect.numbered_placeholder(idx));
            Ok(())
        },
    ));
    out
}

/// Bind the values of a caller-written fragment that already contains generic
/// markers, one value per marker.
///
/// [`Value::Raw`] values replace their marker with the raw expression; every
/// other value keeps the marker and is appended to `params`.
pub(crate) fn bind_fragment(
    sql: &str,
    values: &[Value],
    dialect: &dyn Dialect,
    params: &mut ParamList,
) -> AsmResult<String> {
    let markers = count_markers(sql, dialect);
    if markers != values.len() {
        return Err(AsmError::placeholder_mismatch(markers, values.len()));
    }
    if values.is_empty() {
        return Ok(sql.to_string());
    }

    let (out, _) = infallible(scan(
        sql,
        dialect.placeholder_marker(),
        dialect.backslash_escapes(),
        |idx, out| {
            params.bind(out, dialect, &values[idx - 1]);
            Ok(())
        },
    ));
    Ok(out)
}

/// Replace every canonical marker with the matching parameter rendered as a
/// literal.
///
/// Fails when a value has no literal form or when the number of markers and
/// parameters differ.
pub fn inline(sql: &str, params: &[Value], dialect: &dyn Dialect) -> AsmResult<String> {
    let (out, count) = scan(
        sql,
        dialect.canonical_placeholder(),
        dialect.backslash_escapes(),
        |idx, out| {
            let value = params
                .get(idx - 1)
                .ok_or_else(|| AsmError::placeholder_mismatch(idx, params.len()))?;
            out.push_str(&dialect.render_literal(value)?);
            Ok(())
        },
    )?;

    if count != params.len() {
        return Err(AsmError::placeholder_mismatch(count, params.len()));
    }
    Ok(out)
}
