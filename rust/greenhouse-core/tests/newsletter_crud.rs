use greenhouse_core::{Db, NewsletterFields};

fn fields(title: &str, body: &str) -> NewsletterFields {
    NewsletterFields {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
    }
}

#[test]
fn create_assigns_id_and_publish_timestamp() {
    let db = Db::open_in_memory().unwrap();

    let n = db.create_newsletter(&fields("Spring issue", "Repotting season.")).unwrap();
    assert!(n.id >= 1);
    assert_eq!(n.title.as_deref(), Some("Spring issue"));
    assert_eq!(n.body.as_deref(), Some("Repotting season."));
    assert!(n.published_at > 0);
    assert_eq!(n.edited_at, None);
}

#[test]
fn create_accepts_all_null_fields() {
    let db = Db::open_in_memory().unwrap();

    let n = db.create_newsletter(&NewsletterFields::default()).unwrap();
    assert_eq!(n.title, None);
    assert_eq!(n.body, None);
    assert!(n.published_at > 0);
}

#[test]
fn update_refreshes_edited_at_and_keeps_published_at() {
    let db = Db::open_in_memory().unwrap();

    let created = db.create_newsletter(&fields("Draft", "v1")).unwrap();
    let patch = NewsletterFields { body: Some("v2".to_string()), ..Default::default() };
    let updated = db.update_newsletter(created.id, &patch).unwrap().unwrap();

    assert_eq!(updated.published_at, created.published_at);
    let edited = updated.edited_at.expect("edited_at set after update");
    assert!(edited >= updated.published_at);
    // patched field replaced, absent field kept
    assert_eq!(updated.body.as_deref(), Some("v2"));
    assert_eq!(updated.title.as_deref(), Some("Draft"));
}

#[test]
fn empty_patch_still_refreshes_edited_at() {
    let db = Db::open_in_memory().unwrap();

    let created = db.create_newsletter(&fields("Unchanged", "text")).unwrap();
    let updated = db
        .update_newsletter(created.id, &NewsletterFields::default())
        .unwrap()
        .unwrap();
    assert!(updated.edited_at.is_some());
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.body, created.body);
}

#[test]
fn get_and_update_and_delete_missing_id() {
    let db = Db::open_in_memory().unwrap();

    assert!(db.get_newsletter(42).unwrap().is_none());
    assert!(db.update_newsletter(42, &NewsletterFields::default()).unwrap().is_none());
    assert!(!db.delete_newsletter(42).unwrap());
}

#[test]
fn insert_then_delete_leaves_listing_count_unchanged() {
    let db = Db::open_in_memory().unwrap();
    db.create_newsletter(&fields("Keeper", "stays")).unwrap();
    let before = db.list_newsletters().unwrap().len();

    let n = db.create_newsletter(&fields("Ephemeral", "goes")).unwrap();
    assert_eq!(db.list_newsletters().unwrap().len(), before + 1);
    assert!(db.delete_newsletter(n.id).unwrap());
    assert_eq!(db.list_newsletters().unwrap().len(), before);
    assert!(db.get_newsletter(n.id).unwrap().is_none());
}

#[test]
fn list_orders_by_id() {
    let db = Db::open_in_memory().unwrap();
    let a = db.create_newsletter(&fields("a", "1")).unwrap();
    let b = db.create_newsletter(&fields("b", "2")).unwrap();
    let c = db.create_newsletter(&fields("c", "3")).unwrap();

    let ids: Vec<i64> = db.list_newsletters().unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}
