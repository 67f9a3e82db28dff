//! End-to-end extraction tests against a SQLite snapshot and the in-memory source

use docsift_domain::{EntityKind, InMemorySource, RawDocument};
use docsift_extractor::{Extractor, ExtractorError};
use docsift_store::SqliteSource;
use rusqlite::{params, Connection};

fn sqlite_source(rows: Vec<(Vec<u8>, i64, &str, bool)>) -> SqliteSource {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE documents (id BLOB, ts INTEGER, json_value TEXT, deleted INTEGER)",
    )
    .unwrap();
    for (id, ts, json, deleted) in &rows {
        conn.execute(
            "INSERT INTO documents (id, ts, json_value, deleted) VALUES (?1, ?2, ?3, ?4)",
            params![id, ts, json, deleted],
        )
        .unwrap();
    }
    SqliteSource::from_connection(conn)
}

#[test]
fn test_three_document_scenario() {
    let source = sqlite_source(vec![
        (
            vec![0x01],
            1,
            r#"{"importance": 4.5, "description": "likes tea", "playerId": "p1"}"#,
            false,
        ),
        (vec![0x02], 2, r#"{"text": "hi", "author": "p1", "conversationId": "c1"}"#, false),
        (vec![0x03], 3, r#"{"worldId": "w1", "status": "running"}"#, false),
    ]);
    let extractor = Extractor::new(&source);

    let memories = extractor.memories().unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories.entities[0].importance, Some(4.5));
    assert_eq!(memories.entities[0].description, "likes tea");
    assert_eq!(memories.entities[0].player_id, "p1");

    let messages = extractor.messages(None).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages.entities[0].text, "hi");

    assert!(extractor.embeddings().unwrap().is_empty());
    assert!(extractor.player_descriptions(None).unwrap().is_empty());
}

#[test]
fn test_deleted_documents_are_excluded_everywhere() {
    let payload = r#"{"importance": 1, "description": "d", "playerId": "p1",
        "text": "t", "author": "a", "conversationId": "c",
        "embedding": [1.0], "name": "n", "character": "f1"}"#;
    let source = sqlite_source(vec![(vec![0x09], 1, payload, true)]);
    let extractor = Extractor::new(&source);

    for kind in EntityKind::ALL {
        assert!(extractor.extract_kind(kind, None).unwrap().is_empty(), "{} leaked", kind);
    }
}

#[test]
fn test_multi_membership_across_passes() {
    let source = sqlite_source(vec![(
        vec![0xAA],
        5,
        r#"{"importance": 3, "description": "d", "playerId": "p1",
            "text": "hi", "author": "p1", "conversationId": "c1"}"#,
        false,
    )]);
    let extractor = Extractor::new(&source);

    let memories = extractor.memories().unwrap();
    let messages = extractor.messages(None).unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(messages.len(), 1);
    assert_eq!(memories.entities[0].id, "aa");
    assert_eq!(messages.entities[0].id, "aa");
}

#[test]
fn test_missing_mandatory_field_excludes_document() {
    let source = InMemorySource::new(vec![
        RawDocument::new(
            "no-character",
            r#"{"name": "Lucky", "playerId": "p1", "description": "x"}"#,
            1,
        ),
        RawDocument::new("no-player", r#"{"embedding": [0.1, 0.2], "memoryId": "m1"}"#, 2),
        RawDocument::new(
            "no-author",
            r#"{"text": "hi", "conversationId": "c1", "extra": true}"#,
            3,
        ),
        RawDocument::new("no-importance", r#"{"description": "d", "playerId": "p1"}"#, 4),
    ]);
    let extractor = Extractor::new(&source);

    for kind in EntityKind::ALL {
        assert!(extractor.extract_kind(kind, None).unwrap().is_empty(), "{} matched", kind);
    }
}

#[test]
fn test_embedding_dimensionality_matches_vector() {
    let source = InMemorySource::new(vec![
        RawDocument::new(
            "e1",
            r#"{"embedding": [0.1, 0.2, 0.3, 0.4], "playerId": "p1", "dimensions": 2}"#,
            1,
        ),
        RawDocument::new("e2", r#"{"embedding": [], "playerId": "p2"}"#, 2),
    ]);
    let embeddings = Extractor::new(&source).embeddings().unwrap();
    assert_eq!(embeddings.len(), 2);
    for embedding in &embeddings.entities {
        assert_eq!(embedding.dimensionality, embedding.vector.len());
    }
    assert_eq!(embeddings.entities[0].dimensionality, 4);
}

#[test]
fn test_malformed_rows_do_not_abort() {
    let source = InMemorySource::new(vec![
        RawDocument::new("broken", r#"{"text": "hi", "author": "p1", "conversationId": "#, 2),
        RawDocument::new("ok", r#"{"text": "yo", "author": "p2", "conversationId": "c1"}"#, 1),
    ]);
    let messages = Extractor::new(&source).messages(None).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages.report.malformed, 1);
}

#[test]
fn test_ids_are_stable_across_passes() {
    let source = sqlite_source(vec![(
        vec![0xC0, 0xFF, 0xEE],
        1,
        r#"{"name": "Lucky", "playerId": "p1", "character": "f1"}"#,
        false,
    )]);
    let extractor = Extractor::new(&source);
    let first = extractor.player_descriptions(None).unwrap();
    let second = extractor.player_descriptions(None).unwrap();
    assert_eq!(first.entities[0].id, "c0ffee");
    assert_eq!(first.entities, second.entities);
}

#[test]
fn test_store_failure_surfaces() {
    let source = SqliteSource::from_connection(Connection::open_in_memory().unwrap());
    let result = Extractor::new(&source).memories();
    assert!(matches!(result, Err(ExtractorError::Source(_))));
}
