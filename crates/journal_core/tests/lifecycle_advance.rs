use journal_core::db::open_db_in_memory;
use journal_core::{
    classify, AdvanceMode, ContentItem, ContentItemId, ContentRepository, LifecycleAdvancer,
    RepoError, RepoResult, SqliteContentRepository, Zone, DAY_MS,
};

const NOW: i64 = 1_760_000_000_000;

fn stored_item(repo: &SqliteContentRepository<'_>, day: u32, zone: Zone) -> ContentItem {
    let mut item = ContentItem::new("article", NOW - i64::from(day) * DAY_MS);
    item.elapsed_day_count = day;
    item.zone = zone;
    repo.create_item(&item).unwrap();
    item
}

/// Delegates to SQLite but fails writes for one chosen item.
struct FlakyRepo<'conn> {
    inner: SqliteContentRepository<'conn>,
    failing: ContentItemId,
}

impl ContentRepository for FlakyRepo<'_> {
    fn create_item(&self, item: &ContentItem) -> RepoResult<ContentItemId> {
        self.inner.create_item(item)
    }

    fn get_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>> {
        self.inner.get_item(id)
    }

    fn list_published(&self, now: i64) -> RepoResult<Vec<ContentItem>> {
        self.inner.list_published(now)
    }

    fn list_active(&self) -> RepoResult<Vec<ContentItem>> {
        self.inner.list_active()
    }

    fn update_lifecycle(&self, id: ContentItemId, day: u32, zone: Zone) -> RepoResult<()> {
        if id == self.failing {
            return Err(RepoError::InvalidData("simulated write failure".to_string()));
        }
        self.inner.update_lifecycle(id, day, zone)
    }
}

#[test]
fn last_visible_day_advances_into_archives() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let item = stored_item(&repo, 21, Zone::Pages12To13);

    let report = LifecycleAdvancer::new(SqliteContentRepository::new(&conn))
        .advance_active(NOW)
        .unwrap();

    assert_eq!(report.processed_count, 1);
    assert_eq!(report.archived_count, 1);
    assert_eq!(report.advanced_count, 0);
    let loaded = repo.get_item(item.id).unwrap().unwrap();
    assert_eq!(loaded.elapsed_day_count, 22);
    assert_eq!(loaded.zone, Zone::Archives);

    let second = LifecycleAdvancer::new(SqliteContentRepository::new(&conn))
        .advance_active(NOW)
        .unwrap();
    assert_eq!(second.processed_count, 0);
}

#[test]
fn zone_change_counts_as_advanced_and_same_zone_does_not() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let crossing = stored_item(&repo, 3, Zone::Une);
    let staying = stored_item(&repo, 1, Zone::Une);

    let report = LifecycleAdvancer::new(SqliteContentRepository::new(&conn))
        .advance_active(NOW)
        .unwrap();

    assert_eq!(report.processed_count, 2);
    assert_eq!(report.advanced_count, 1);
    assert_eq!(report.archived_count, 0);
    assert_eq!(repo.get_item(crossing.id).unwrap().unwrap().zone, Zone::FaceUne);
    let staying = repo.get_item(staying.id).unwrap().unwrap();
    assert_eq!(staying.elapsed_day_count, 2);
    assert_eq!(staying.zone, Zone::Une);
}

#[test]
fn running_twice_on_the_same_day_increments_twice() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let item = stored_item(&repo, 5, Zone::FaceUne);
    let advancer = LifecycleAdvancer::new(SqliteContentRepository::new(&conn));

    advancer.advance_active(NOW).unwrap();
    advancer.advance_active(NOW).unwrap();

    let loaded = repo.get_item(item.id).unwrap().unwrap();
    assert_eq!(loaded.elapsed_day_count, 7);
    assert_eq!(loaded.zone, classify(7));
}

#[test]
fn recompute_mode_is_idempotent_within_a_day() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let item = stored_item(&repo, 5, Zone::FaceUne);
    let advancer =
        LifecycleAdvancer::with_mode(SqliteContentRepository::new(&conn), AdvanceMode::Recompute);

    let first = advancer.advance_active(NOW + DAY_MS).unwrap();
    let second = advancer.advance_active(NOW + DAY_MS).unwrap();

    let loaded = repo.get_item(item.id).unwrap().unwrap();
    assert_eq!(loaded.elapsed_day_count, 6);
    assert_eq!(loaded.zone, Zone::FaceUne);
    assert_eq!(first.processed_count, 1);
    assert_eq!(second.processed_count, 1);
    assert_eq!(second.advanced_count, 0);
}

#[test]
fn write_failure_on_one_item_does_not_abort_the_batch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let broken = stored_item(&repo, 3, Zone::Une);
    let healthy = stored_item(&repo, 8, Zone::Pages4To5);

    let advancer = LifecycleAdvancer::new(FlakyRepo {
        inner: SqliteContentRepository::new(&conn),
        failing: broken.id,
    });
    let report = advancer.advance_active(NOW).unwrap();

    assert_eq!(report.processed_count, 2);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.advanced_count, 1);
    assert_eq!(repo.get_item(broken.id).unwrap().unwrap().elapsed_day_count, 3);
    let healthy = repo.get_item(healthy.id).unwrap().unwrap();
    assert_eq!(healthy.elapsed_day_count, 9);
    assert_eq!(healthy.zone, Zone::Pages6To7);
}

#[test]
fn archived_items_in_explicit_input_are_skipped() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let archived = stored_item(&repo, 30, Zone::Archives);

    let report =
        LifecycleAdvancer::new(SqliteContentRepository::new(&conn)).advance(&[archived.clone()], NOW);

    assert_eq!(report.processed_count, 0);
    assert_eq!(repo.get_item(archived.id).unwrap().unwrap().elapsed_day_count, 30);
}

#[test]
fn report_serializes_with_camel_case_counts() {
    let conn = open_db_in_memory().unwrap();
    let report = LifecycleAdvancer::new(SqliteContentRepository::new(&conn)).advance(&[], 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["processedCount"], 0);
    assert_eq!(json["advancedCount"], 0);
    assert_eq!(json["archivedCount"], 0);
    assert_eq!(json["failedCount"], 0);
    assert_eq!(json["timestamp"], "1970-01-01T00:00:00.000Z");
}

#[test]
fn recompute_never_moves_a_stored_day_backwards() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::new(&conn);
    let mut item = ContentItem::new("ahead of the clock", NOW - 5 * DAY_MS);
    item.elapsed_day_count = 10;
    item.zone = Zone::Pages6To7;
    repo.create_item(&item).unwrap();

    let report =
        LifecycleAdvancer::with_mode(SqliteContentRepository::new(&conn), AdvanceMode::Recompute)
            .advance_active(NOW)
            .unwrap();

    assert_eq!(report.processed_count, 1);
    assert_eq!(report.advanced_count, 0);
    let loaded = repo.get_item(item.id).unwrap().unwrap();
    assert_eq!(loaded.elapsed_day_count, 10);
    assert_eq!(loaded.zone, Zone::Pages6To7);
}
