//! Content item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist articles and their cached lifecycle fields.
//! - Serve the non-archived working set to the daily advancer.
//!
//! # Invariants
//! - `update_lifecycle` writes day count and zone in one statement.
//! - `published_at` is never rewritten after creation.

use crate::model::content_item::{ContentItem, ContentItemId};
use crate::model::zone::Zone;
use crate::model::ValidationError;
use crate::repo::{bool_to_int, parse_positive_u32, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CONTENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    published_at,
    elapsed_day_count,
    zone,
    sponsored
FROM content_items";

/// Repository interface for article lifecycle storage.
pub trait ContentRepository {
    fn create_item(&self, item: &ContentItem) -> RepoResult<ContentItemId>;
    fn get_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>>;
    /// Items published at or before `now`, newest first.
    fn list_published(&self, now: i64) -> RepoResult<Vec<ContentItem>>;
    /// Items whose cached zone is not terminal.
    fn list_active(&self) -> RepoResult<Vec<ContentItem>>;
    fn update_lifecycle(&self, id: ContentItemId, day: u32, zone: Zone) -> RepoResult<()>;
}

/// SQLite-backed content repository.
pub struct SqliteContentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContentRepository for SqliteContentRepository<'_> {
    fn create_item(&self, item: &ContentItem) -> RepoResult<ContentItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO content_items (
                id,
                title,
                published_at,
                elapsed_day_count,
                zone,
                sponsored
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.id.to_string(),
                item.title.as_str(),
                item.published_at,
                i64::from(item.elapsed_day_count),
                item.zone.as_str(),
                bool_to_int(item.sponsored),
            ],
        )?;

        Ok(item.id)
    }

    fn get_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_content_row(row)?));
        }
        Ok(None)
    }

    fn list_published(&self, now: i64) -> RepoResult<Vec<ContentItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTENT_SELECT_SQL}
             WHERE published_at <= ?1
             ORDER BY published_at DESC, id ASC;"
        ))?;
        let rows = stmt.query([now])?;
        collect_items(rows)
    }

    fn list_active(&self) -> RepoResult<Vec<ContentItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTENT_SELECT_SQL}
             WHERE zone <> ?1
             ORDER BY published_at ASC, id ASC;"
        ))?;
        let rows = stmt.query([Zone::Archives.as_str()])?;
        collect_items(rows)
    }

    fn update_lifecycle(&self, id: ContentItemId, day: u32, zone: Zone) -> RepoResult<()> {
        if day == 0 {
            return Err(ValidationError::ZeroElapsedDay.into());
        }

        let changed = self.conn.execute(
            "UPDATE content_items
             SET
                elapsed_day_count = ?1,
                zone = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![i64::from(day), zone.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn collect_items(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<ContentItem>> {
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_content_row(row)?);
    }
    Ok(items)
}

fn parse_content_row(row: &Row<'_>) -> RepoResult<ContentItem> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "content_items.id")?;

    let zone_text: String = row.get("zone")?;
    let zone = Zone::parse(&zone_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid zone `{zone_text}` in content_items.zone"))
    })?;

    let elapsed_day_count = parse_positive_u32(
        row.get::<_, i64>("elapsed_day_count")?,
        "content_items.elapsed_day_count",
    )?;

    let sponsored = match row.get::<_, i64>("sponsored")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid sponsored value `{other}` in content_items.sponsored"
            )));
        }
    };

    let item = ContentItem {
        id,
        title: row.get("title")?,
        published_at: row.get("published_at")?,
        elapsed_day_count,
        zone,
        sponsored,
    };
    item.validate()?;
    Ok(item)
}
