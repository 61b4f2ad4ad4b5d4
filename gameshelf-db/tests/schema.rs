use gameshelf_db::{SchemaError, open_memory};
use gameshelf_db::schema::{CURRENT_VERSION, create_schema, get_schema_version, migrate};
use rusqlite::Connection;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = ["schema_version", "users", "sessions", "password_resets", "games"];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn migrates_v1_database() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT);
         INSERT INTO schema_version (version) VALUES (1);
         CREATE TABLE games (id INTEGER PRIMARY KEY, user_id TEXT NOT NULL, title TEXT NOT NULL);
         INSERT INTO games (user_id, title) VALUES ('u1', 'Okami');",
    )
    .unwrap();

    migrate(&conn, 1).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

    let hidden: bool = conn
        .query_row("SELECT is_hidden_in_queue FROM games", [], |row| row.get(0))
        .unwrap();
    assert!(!hidden);
}

#[test]
fn open_database_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("gameshelf.db");
    {
        let conn = gameshelf_db::open_database(&path).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }
    assert!(path.exists());
    // Reopening an up-to-date file is a no-op.
    let conn = gameshelf_db::open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrates_v2_salted_users() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT);
         INSERT INTO schema_version (version) VALUES (2);
         CREATE TABLE users (id TEXT PRIMARY KEY, email TEXT NOT NULL,
             password_hash TEXT NOT NULL, salt TEXT NOT NULL);
         INSERT INTO users VALUES ('u1', 'ana@example.com', 'abc123', 's1');",
    )
    .unwrap();

    migrate(&conn, 2).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

    let hash: String = conn
        .query_row("SELECT password_hash FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(hash, "sha256$s1$abc123");
    assert!(conn.prepare("SELECT salt FROM users").is_err());
}

#[test]
fn unusable_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let result = gameshelf_db::open_database(&blocker.join("gameshelf.db"));
    assert!(matches!(result, Err(SchemaError::Io(_))));
}
