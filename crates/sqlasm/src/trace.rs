//! `tracing` events for rendered statements.
//!
//! Enabled by the `tracing` crate feature (on by default). Every generator
//! emits one `debug` event on target `sqlasm.sql`; INSERT rows whose fields
//! disagree with the first row emit a `warn` event on `sqlasm.insert`.

use crate::statement::Statement;

/// Longest SQL prefix (in bytes) included in an event.
#[cfg(feature = "tracing")]
const MAX_SQL_BYTES: usize = 200;

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(feature = "tracing")]
pub(crate) fn rendered(dialect: &str, stmt: &Statement) {
    let sql = stmt.sql();
    let shown = truncate_sql_bytes(sql, MAX_SQL_BYTES);
    tracing::debug!(
        target: "sqlasm.sql",
        kind = %stmt.kind(),
        dialect,
        params = stmt.params().len(),
        inlined = stmt.is_inlined(),
        truncated = shown.len() < sql.len(),
        sql = shown,
        "rendered statement"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn rendered(_dialect: &str, _stmt: &Statement) {}

#[cfg(feature = "tracing")]
pub(crate) fn row_shape_mismatch(table: &str, row: usize) {
    tracing::warn!(
        target: "sqlasm.insert",
        table,
        row,
        "row fields differ from the first row; VALUES will not line up with the column list"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn row_shape_mismatch(_table: &str, _row: usize) {}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::dialect::Ansi;
    use crate::row::Row;
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    #[derive(Debug)]
    struct Captured {
        target: String,
        level: Level,
        fields: HashMap<String, String>,
    }

    struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<Captured>>>);

    impl Subscriber for Capture {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _: &Id, _: &Record<'_>) {}

        fn record_follows_from(&self, _: &Id, _: &Id) {}

        fn event(&self, event: &Event<'_>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.0.lock().unwrap().push(Captured {
                target: event.metadata().target().to_string(),
                level: *event.metadata().level(),
                fields,
            });
        }

        fn enter(&self, _: &Id) {}

        fn exit(&self, _: &Id) {}
    }

    #[test]
    fn insert_emits_shape_warning_and_statement_event() {
        let capture = Capture::default();
        let mut b = Builder::new(Ansi);
        b.table("users");
        let rows = [
            Row::new().set("a", 1).set("b", 2),
            Row::new().set("b", 3).set("a", 4),
        ];

        tracing::subscriber::with_default(capture.clone(), || {
            let _stmt = b.for_insert(&rows).unwrap();
        });

        let events = capture.0.lock().unwrap();
        let warn = events
            .iter()
            .find(|e| e.target == "sqlasm.insert")
            .expect("row shape warning");
        assert_eq!(warn.level, Level::WARN);
        assert_eq!(warn.fields["table"], "users");
        assert_eq!(warn.fields["row"], "1");

        let rendered = events
            .iter()
            .find(|e| e.target == "sqlasm.sql")
            .expect("rendered statement event");
        assert_eq!(rendered.level, Level::DEBUG);
        assert_eq!(rendered.fields["kind"], "INSERT");
        assert_eq!(rendered.fields["params"], "4");
        assert_eq!(
            rendered.fields["sql"],
            r#"INSERT INTO "users"("a", "b") VALUES (?, ?), (?, ?)"#
        );
    }

    #[test]
    fn matching_rows_emit_no_warning() {
        let capture = Capture::default();
        let mut b = Builder::new(Ansi);
        b.table("users");
        let rows = [Row::new().set("a", 1), Row::new().set("a", 2)];

        tracing::subscriber::with_default(capture.clone(), || {
            let _stmt = b.for_insert(&rows).unwrap();
        });

        let events = capture.0.lock().unwrap();
        assert!(events.iter().all(|e| e.target != "sqlasm.insert"));
        assert_eq!(events.iter().filter(|e| e.target == "sqlasm.sql").count(), 1);
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("aé", 2), "a");
    }
}
