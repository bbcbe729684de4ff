use keepnote_core::db::{open_db, open_db_in_memory};
use keepnote_core::{
    Category, Note, NoteStorage, NoteStore, SqliteNoteStorage, NOTES_KEY,
};
use rusqlite::Connection;

#[test]
fn load_from_fresh_database_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteNoteStorage::new(&conn);

    let loaded = storage.load().unwrap();
    assert!(loaded.notes.is_empty());
    assert!(!loaded.malformed_blob);
    assert_eq!(loaded.dropped_records, 0);
}

#[test]
fn save_then_load_preserves_notes_and_order() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteNoteStorage::new(&conn);

    let newest = Note::new("Newest", "top of the list", Category::Urgent).unwrap();
    let oldest = Note::new("Oldest", "bottom", Category::Personal).unwrap();
    storage.save(&[newest.clone(), oldest.clone()]).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.notes, vec![newest, oldest]);
    assert_eq!(loaded.dropped_records, 0);
}

#[test]
fn save_overwrites_the_single_stored_value() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteNoteStorage::new(&conn);

    let first = Note::new("First", "", Category::Work).unwrap();
    let second = Note::new("Second", "", Category::Work).unwrap();
    storage.save(&[first.clone(), second]).unwrap();
    storage.save(&[first.clone()]).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.notes, vec![first]);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn notes_survive_closing_and_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keepnote.sqlite3");

    let conn = open_db(&path).unwrap();
    let mut store = NoteStore::open(SqliteNoteStorage::new(&conn));
    store.create("Older", "kept across sessions", Category::Personal).unwrap();
    store.create("Newer", "", Category::Work).unwrap();
    let snapshot: Vec<Note> = store.notes().to_vec();
    drop(store);
    drop(conn);

    let conn = open_db(&path).unwrap();
    let store = NoteStore::open(SqliteNoteStorage::new(&conn));
    assert_eq!(store.notes(), snapshot.as_slice());
}

#[test]
fn malformed_stored_value_recovers_to_empty_then_saves_clean() {
    let conn = open_db_in_memory().unwrap();
    seed_blob(&conn, "{definitely not an array");

    let mut storage = SqliteNoteStorage::new(&conn);
    let loaded = storage.load().unwrap();
    assert!(loaded.malformed_blob);
    assert!(loaded.notes.is_empty());

    let mut store = NoteStore::open(SqliteNoteStorage::new(&conn));
    assert!(store.is_empty());
    store.create("Fresh start", "", Category::Personal).unwrap();

    let reloaded = SqliteNoteStorage::new(&conn).load().unwrap();
    assert!(!reloaded.malformed_blob);
    assert_eq!(reloaded.notes.len(), 1);
}

#[test]
fn damaged_record_is_quarantined_on_load() {
    let conn = open_db_in_memory().unwrap();
    let survivor = Note::new("Survivor", "", Category::Work).unwrap();
    let survivor_json = serde_json::to_string(&survivor).unwrap();
    seed_blob(
        &conn,
        &format!("[{survivor_json}, {{\"title\": \"shapeless\"}}]"),
    );

    let loaded = SqliteNoteStorage::new(&conn).load().unwrap();
    assert!(!loaded.malformed_blob);
    assert_eq!(loaded.dropped_records, 1);
    assert_eq!(loaded.notes, vec![survivor]);
}

fn seed_blob(conn: &Connection, blob: &str) {
    conn.execute(
        "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2);",
        rusqlite::params![NOTES_KEY, blob],
    )
    .unwrap();
}
