use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use file_renamer::config::DEFAULT_LOOKUP_QUERY;
use file_renamer::{Config, NameStore, RenamerError, SqliteStore, rename_all};

fn seed_db(dir: &Path) -> PathBuf {
    let db = dir.join("naming.sqlite");
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE Container (NodeId INTEGER PRIMARY KEY, Name TEXT);
         INSERT INTO Container VALUES (42, 'Projects');
         INSERT INTO Container VALUES (43, 'Q3: Plan');
         INSERT INTO Container VALUES (44, NULL);",
    )
    .unwrap();
    db
}

#[test]
fn opens_plain_path_and_looks_up_names() {
    let td = tempdir().unwrap();
    let db = seed_db(td.path());
    let store = SqliteStore::open(db.to_str().unwrap(), DEFAULT_LOOKUP_QUERY).unwrap();
    assert_eq!(store.lookup(42).unwrap().as_deref(), Some("Projects"));
    assert_eq!(store.lookup(44).unwrap(), None);
    assert_eq!(store.lookup(1).unwrap(), None);
}

#[test]
fn opens_data_source_connection_string() {
    let td = tempdir().unwrap();
    let db = seed_db(td.path());
    let conn_str = format!("Data Source={};Mode=ReadOnly", db.display());
    let store = SqliteStore::open(&conn_str, DEFAULT_LOOKUP_QUERY).unwrap();
    assert_eq!(store.lookup(43).unwrap().as_deref(), Some("Q3: Plan"));
}

#[test]
fn custom_query_is_used() {
    let td = tempdir().unwrap();
    let db = seed_db(td.path());
    let store = SqliteStore::open(
        db.to_str().unwrap(),
        "SELECT upper(Name) FROM Container WHERE NodeId = ?",
    )
    .unwrap();
    assert_eq!(store.lookup(42).unwrap().as_deref(), Some("PROJECTS"));
}

#[test]
fn missing_database_is_not_created() {
    let td = tempdir().unwrap();
    let db = td.path().join("absent.sqlite");
    let err = SqliteStore::open(db.to_str().unwrap(), DEFAULT_LOOKUP_QUERY).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<RenamerError>(),
        Some(RenamerError::Store(_))
    ));
    assert!(!db.exists());
}

#[test]
fn query_against_missing_table_fails_at_open() {
    let td = tempdir().unwrap();
    let db = seed_db(td.path());
    let err = SqliteStore::open(
        db.to_str().unwrap(),
        "SELECT Name FROM Nodes WHERE NodeId = ?1",
    )
    .err()
    .unwrap();
    assert!(format!("{err:#}").contains("prepare lookup query"));
}

#[test]
fn server_connection_string_is_rejected() {
    let err = SqliteStore::open("Server=db01;Initial Catalog=Nodes", DEFAULT_LOOKUP_QUERY)
        .err()
        .unwrap();
    assert!(matches!(
        err.downcast_ref::<RenamerError>(),
        Some(RenamerError::InvalidConfig(_))
    ));
}

#[test]
fn full_pass_against_sqlite() {
    let td = tempdir().unwrap();
    let db = seed_db(td.path());
    let root = td.path().join("root");
    fs::create_dir_all(root.join("42")).unwrap();
    fs::write(root.join("42").join("43.csv"), b"a,b").unwrap();
    fs::create_dir(root.join("44")).unwrap();

    let cfg = Config::new(&root, db.to_str().unwrap());
    let store = SqliteStore::open(&cfg.connection_string, &cfg.lookup_query).unwrap();
    let summary = rename_all(&cfg, &store).unwrap();

    assert!(root.join("Projects").join("Q3 Plan.csv").is_file());
    // NULL name keeps the directory as is.
    assert!(root.join("44").is_dir());
    assert_eq!(summary.renamed(), 2);
}
