use greenhouse_core::db::latest_schema_version;
use greenhouse_core::Db;
use tempfile::NamedTempFile;

#[test]
fn fresh_database_migrates_to_latest_version() {
    let tmp = NamedTempFile::new().unwrap();
    let db = Db::open(tmp.path()).unwrap();
    assert_eq!(db.schema_version().unwrap(), latest_schema_version());
}

#[test]
fn reopening_is_idempotent_and_keeps_data() {
    let tmp = NamedTempFile::new().unwrap();
    let id = {
        let db = Db::open(tmp.path()).unwrap();
        db.create_plant(&greenhouse_core::PlantFields {
            name: Some("Aloe".to_string()),
            ..Default::default()
        })
        .unwrap()
        .id
    };

    let db = Db::open(tmp.path()).unwrap();
    assert_eq!(db.schema_version().unwrap(), latest_schema_version());
    assert!(db.get_plant(id).unwrap().is_some());
}

#[test]
fn rejects_database_from_a_newer_binary() {
    let tmp = NamedTempFile::new().unwrap();
    {
        let conn = rusqlite::Connection::open(tmp.path()).unwrap();
        conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    }
    let err = Db::open(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("newer than supported"));
}
