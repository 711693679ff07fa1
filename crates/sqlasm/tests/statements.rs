use serde_json::json;
use sqlasm::{
    Ansi, AsmError, Builder, MySql, Op, Postgres, RenderOptions, Row, StatementKind, Value,
    placeholder,
};

#[test]
fn search_query_across_dialects() {
    fn search(b: &mut Builder) -> &mut Builder {
        b.table("app.users")
            .select(["id", "name"])
            .grouped(|b| b.like("name", "a%").or().is_null("name"))
            .and()
            .in_list("role", ["admin", "staff"])
            .desc("created_at")
            .limit(10)
            .offset(20)
    }

    let mut pg = Builder::new(Postgres);
    let stmt = search(&mut pg).for_select().unwrap();
    assert_eq!(
        stmt.sql(),
        r#"SELECT "id", "name" FROM "app"."users" WHERE ("name" LIKE $1 OR "name" IS NULL) AND "role" IN ($2, $3) ORDER BY created_at DESC LIMIT $4 OFFSET $5"#
    );

    let mut my = Builder::new(MySql);
    let stmt = search(&mut my).for_select().unwrap();
    assert_eq!(
        stmt.sql(),
        "SELECT `id`, `name` FROM `app`.`users` WHERE (`name` LIKE ? OR `name` IS NULL) AND `role` IN (?, ?) ORDER BY created_at DESC LIMIT ? OFFSET ?"
    );
    assert_eq!(
        stmt.params(),
        &[
            Value::from("a%"),
            Value::from("admin"),
            Value::from("staff"),
            Value::Int(10),
            Value::Int(20),
        ]
    );
}

#[test]
fn insert_rows_from_json() {
    let rows = vec![
        Row::from_json(json!({"name": "alice", "age": 30, "tags": ["a", "b"]})).unwrap(),
        Row::from_json(json!({"name": "bob", "age": null, "tags": []})).unwrap(),
    ];

    let mut b = Builder::new(Postgres);
    b.table("users");
    let stmt = b.for_insert(&rows).unwrap();

    assert_eq!(stmt.kind(), StatementKind::Insert);
    assert_eq!(
        stmt.sql(),
        r#"INSERT INTO "users"("name", "age", "tags") VALUES ($1, $2, $3), ($4, $5, $6)"#
    );
    assert_eq!(stmt.params()[1], Value::Int(30));
    assert_eq!(stmt.params()[2], Value::from(r#"["a","b"]"#));
    assert_eq!(stmt.params()[4], Value::Null);
}

#[test]
fn update_with_raw_expression_and_inlining() {
    let mut b = Builder::new(Ansi);
    b.table("accounts")
        .eq("id", 42)
        .and()
        .raw_bind("balance >= ?", [100])
        .inline_params(true);

    let row = Row::new()
        .set("balance", Value::raw("balance - 100"))
        .set("note", "it's paid");
    let stmt = b.for_update(&row).unwrap();

    assert!(stmt.is_inlined());
    assert_eq!(
        stmt.sql(),
        r#"UPDATE "accounts" SET "balance"=balance - 100, "note"='it''s paid' WHERE "id" = 42 AND balance >= 100"#
    );
}

#[test]
fn delete_with_named_predicates() {
    let mut b = Builder::new(Postgres);
    b.table("sessions");
    let expired = b.define("expired", "expires_at", Op::lt(Value::raw("NOW()")));
    let revoked = b.define("revoked", "revoked", Op::eq(true));
    b.predicate(&expired).or().predicate(&revoked);

    let stmt = b.for_delete().unwrap();
    assert_eq!(
        stmt.sql(),
        r#"DELETE FROM "sessions" WHERE "expires_at" < NOW() OR "revoked" = $1"#
    );
    assert_eq!(stmt.params(), &[Value::Bool(true)]);

    // Redefining a predicate changes every later render.
    b.define("revoked", "revoked_at", Op::is_not_null());
    assert_eq!(
        b.for_delete().unwrap().sql(),
        r#"DELETE FROM "sessions" WHERE "expires_at" < NOW() OR "revoked_at" IS NOT NULL"#
    );
}

#[test]
fn undefined_predicate_is_an_error() {
    let mut b = Builder::new(Ansi);
    b.table("t").predicate("missing");
    match b.for_select() {
        Err(AsmError::UnresolvedPredicate(id)) => assert_eq!(id.as_str(), "missing"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn parameterized_output_matches_marker_count() {
    let mut b = Builder::new(Postgres);
    b.table("events")
        .between("at", "2024-01-01", "2024-12-31")
        .and()
        .not_in("kind", [1, 2])
        .and()
        .raw("payload::text <> '?'")
        .limit(50);
    b.renumber(false);

    let stmt = b.for_select().unwrap();
    assert_eq!(
        placeholder::count_markers(stmt.sql(), b.dialect()),
        stmt.params().len()
    );

    let (sql, params) = stmt.into_parts();
    assert_eq!(
        placeholder::renumber(&sql, &Postgres),
        r#"SELECT * FROM "events" WHERE "at" BETWEEN $1 AND $2 AND "kind" NOT IN ($3, $4) AND payload::text <> '?' LIMIT $5"#
    );
    assert_eq!(params.len(), 5);
}

#[test]
fn render_options_from_json_config() {
    let options: RenderOptions = serde_json::from_value(json!({"inline_params": true})).unwrap();
    assert!(options.renumber);
    assert!(options.inline_params);

    let mut b = Builder::new(MySql);
    b.table("t").eq("flag", false).options(options);
    assert_eq!(
        b.for_select().unwrap().sql(),
        "SELECT * FROM `t` WHERE `flag` = FALSE"
    );
}

#[test]
fn values_serialize_tagged() {
    let v = serde_json::to_value(Value::Int(5)).unwrap();
    assert_eq!(v, json!({"type": "int", "value": 5}));
    let back: Value = serde_json::from_value(json!({"type": "text", "value": "x"})).unwrap();
    assert_eq!(back, Value::from("x"));
}
