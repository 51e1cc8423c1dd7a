use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use crate::models::{Newsletter, NewsletterFields, Plant, PlantFields};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("migrations/0001_newsletters.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("migrations/0002_plants.sql"),
    },
];

/// Latest schema version known by this binary.
pub fn latest_schema_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

#[derive(Debug)]
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the database at `path` and applies any
    /// pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = Connection::open(path).context("failed to open SQLite database")?;
        Self::apply_pragmas(&conn);
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, migrated. Test and tooling convenience.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::apply_pragmas(&conn);
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    fn apply_pragmas(conn: &Connection) {
        // Best-effort pragmas; ignore unsupported errors
        let _ = conn.pragma_update(None, "journal_mode", &"WAL");
        let _ = conn.pragma_update(None, "synchronous", &"NORMAL");
        let _ = conn.pragma_update(None, "foreign_keys", &1i32);
        let _ = conn.pragma_update(None, "busy_timeout", &5000i32);
    }

    pub fn schema_version(&self) -> Result<u32> {
        let version = self
            .conn
            .query_row("PRAGMA user_version;", [], |r| r.get::<_, u32>(0))
            .context("read user_version")?;
        Ok(version)
    }

    // -------- newsletters --------

    pub fn create_newsletter(&self, fields: &NewsletterFields) -> Result<Newsletter> {
        self.conn
            .execute(
                "INSERT INTO newsletters (title, body) VALUES (?1, ?2)",
                params![fields.title, fields.body],
            )
            .context("exec create_newsletter")?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "newsletter created");
        self.get_newsletter(id)?
            .context("newsletter missing right after insert")
    }

    pub fn get_newsletter(&self, id: i64) -> Result<Option<Newsletter>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT id, title, body, published_at, edited_at FROM newsletters WHERE id = ?1",
            )
            .context("prepare get_newsletter")?;
        let row = stmt
            .query_row(params![id], |r| Ok(newsletter_from_row(r)))
            .optional()
            .context("exec get_newsletter")?;
        Ok(row)
    }

    pub fn list_newsletters(&self) -> Result<Vec<Newsletter>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT id, title, body, published_at, edited_at FROM newsletters ORDER BY id",
            )
            .context("prepare list_newsletters")?;
        let rows = stmt
            .query_map([], |r| Ok(newsletter_from_row(r)))
            .context("exec list_newsletters")?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Applies the patch and refreshes `edited_at`, even for an empty patch.
    /// Returns `None` when no row has this id.
    pub fn update_newsletter(&self, id: i64, patch: &NewsletterFields) -> Result<Option<Newsletter>> {
        let changed = self
            .conn
            .execute(
                "UPDATE newsletters
                 SET title = COALESCE(?2, title),
                     body = COALESCE(?3, body),
                     edited_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1",
                params![id, patch.title, patch.body],
            )
            .context("exec update_newsletter")?;
        if changed == 0 {
            return Ok(None);
        }
        debug!(id, "newsletter updated");
        self.get_newsletter(id)
    }

    pub fn delete_newsletter(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM newsletters WHERE id = ?1", params![id])
            .context("exec delete_newsletter")?;
        Ok(changed > 0)
    }

    // -------- plants --------

    pub fn create_plant(&self, fields: &PlantFields) -> Result<Plant> {
        self.conn
            .execute(
                "INSERT INTO plants (name, image, price) VALUES (?1, ?2, ?3)",
                params![fields.name, fields.image, fields.price],
            )
            .context("exec create_plant")?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "plant created");
        self.get_plant(id)?.context("plant missing right after insert")
    }

    pub fn get_plant(&self, id: i64) -> Result<Option<Plant>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT id, name, image, price, created_at, edited_at FROM plants WHERE id = ?1",
            )
            .context("prepare get_plant")?;
        let row = stmt
            .query_row(params![id], |r| Ok(plant_from_row(r)))
            .optional()
            .context("exec get_plant")?;
        Ok(row)
    }

    pub fn list_plants(&self) -> Result<Vec<Plant>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "SELECT id, name, image, price, created_at, edited_at FROM plants ORDER BY id",
            )
            .context("prepare list_plants")?;
        let rows = stmt
            .query_map([], |r| Ok(plant_from_row(r)))
            .context("exec list_plants")?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn update_plant(&self, id: i64, patch: &PlantFields) -> Result<Option<Plant>> {
        let changed = self
            .conn
            .execute(
                "UPDATE plants
                 SET name = COALESCE(?2, name),
                     image = COALESCE(?3, image),
                     price = COALESCE(?4, price),
                     edited_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1",
                params![id, patch.name, patch.image, patch.price],
            )
            .context("exec update_plant")?;
        if changed == 0 {
            return Ok(None);
        }
        debug!(id, "plant updated");
        self.get_plant(id)
    }

    pub fn delete_plant(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM plants WHERE id = ?1", params![id])
            .context("exec delete_plant")?;
        Ok(changed > 0)
    }
}

fn newsletter_from_row(r: &Row<'_>) -> Newsletter {
    Newsletter {
        id: r.get(0).unwrap_or_default(),
        title: r.get::<_, Option<String>>(1).ok().flatten(),
        body: r.get::<_, Option<String>>(2).ok().flatten(),
        published_at: r.get(3).unwrap_or_default(),
        edited_at: r.get::<_, Option<i64>>(4).ok().flatten(),
    }
}

fn plant_from_row(r: &Row<'_>) -> Plant {
    Plant {
        id: r.get(0).unwrap_or_default(),
        name: r.get::<_, Option<String>>(1).ok().flatten(),
        image: r.get::<_, Option<String>>(2).ok().flatten(),
        price: r.get::<_, Option<f64>>(3).ok().flatten(),
        created_at: r.get(4).unwrap_or_default(),
        edited_at: r.get::<_, Option<i64>>(5).ok().flatten(),
    }
}

/// Applies pending migrations in one transaction, mirroring the applied
/// version to `PRAGMA user_version`.
fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let current: u32 = conn
        .query_row("PRAGMA user_version;", [], |r| r.get(0))
        .context("read user_version")?;
    let latest = latest_schema_version();

    if current > latest {
        bail!("database schema version {current} is newer than supported version {latest}");
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction().context("begin migration transaction")?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)
            .with_context(|| format!("apply migration {}", migration.version))?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            .with_context(|| format!("record migration {}", migration.version))?;
    }
    tx.commit().context("commit migrations")?;
    debug!(from = current, to = latest, "schema migrated");
    Ok(())
}
