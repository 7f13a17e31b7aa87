//! Live PostgreSQL checks for bind typing and row decoding. Run with
//! `DATABASE_URL=... cargo test --test pg_store -- --ignored`.

use academic_records::{connect, Settings, Store};
use serde_json::{json, Value};

async fn store() -> academic_records::PgStore {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env().unwrap();
    connect(&settings.database).await.unwrap()
}

#[tokio::test]
#[ignore = "needs a PostgreSQL server (DATABASE_URL)"]
async fn cells_decode_to_json_kinds() {
    let store = store().await;

    let rows = store
        .query(
            "SELECT $1::integer AS a, $2::text AS b, $3::float8 AS c, $4::text AS d, $5::boolean AS e, \
             $6::smallint AS f, 87.5::numeric(5,2)::float8 AS g, $7::jsonb AS h",
            &[json!(7), json!("x"), json!(9.5), Value::Null, json!(true), json!(3), json!({"k": [1, 2]})],
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        json!({"a": 7, "b": "x", "c": 9.5, "d": null, "e": true, "f": 3, "g": 87.5, "h": {"k": [1, 2]}})
    );
    store.close().await;
}

#[tokio::test]
#[ignore = "needs a PostgreSQL server (DATABASE_URL)"]
async fn same_statement_accepts_different_bind_kinds() {
    let store = store().await;
    let sql = "SELECT $1::float8 AS score";

    let whole = store.query(sql, &[json!(90)]).await.unwrap();
    let fraction = store.query(sql, &[json!(90.5)]).await.unwrap();
    let text = store.query(sql, &[json!("91")]).await.unwrap();

    assert_eq!(whole[0]["score"], json!(90.0));
    assert_eq!(fraction[0]["score"], json!(90.5));
    assert_eq!(text[0]["score"], json!(91.0));
    store.close().await;
}

#[tokio::test]
#[ignore = "needs a PostgreSQL server (DATABASE_URL)"]
async fn timestamps_decode_as_text() {
    let store = store().await;

    let rows = store
        .query(
            "SELECT '2024-03-01'::date AS d, '2024-03-01 10:20:30'::timestamp AS t",
            &[],
        )
        .await
        .unwrap();

    assert_eq!(rows[0]["d"], json!("2024-03-01"));
    assert_eq!(rows[0]["t"], json!("2024-03-01T10:20:30"));
    store.close().await;
}
