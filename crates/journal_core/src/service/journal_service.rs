//! Read-path article service.
//!
//! # Invariants
//! - Zones returned here are derived from `published_at` and `now`; the
//!   cached `zone` column is never trusted on reads.

use crate::lifecycle::grouping::{group_by_zone, ZoneGroups};
use crate::model::content_item::{ContentItem, ContentItemId};
use crate::model::zone::Zone;
use crate::repo::content_repo::ContentRepository;
use crate::repo::RepoResult;

/// Article facade for publishing and layout queries.
pub struct JournalService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> JournalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Publishes an article on its first lifecycle day.
    pub fn publish(
        &self,
        title: impl Into<String>,
        published_at: i64,
        sponsored: bool,
    ) -> RepoResult<ContentItem> {
        let item = ContentItem::new(title, published_at).sponsored(sponsored);
        self.repo.create_item(&item)?;
        Ok(item)
    }

    pub fn get_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>> {
        self.repo.get_item(id)
    }

    /// Current zone of one article, or `None` when it does not exist.
    pub fn zone_of(&self, id: ContentItemId, now: i64) -> RepoResult<Option<Zone>> {
        Ok(self.repo.get_item(id)?.map(|item| item.current_zone(now)))
    }

    /// Published articles grouped into all eight zone buckets.
    pub fn layout(&self, now: i64) -> RepoResult<ZoneGroups> {
        let items = self.repo.list_published(now)?;
        Ok(group_by_zone(items, now))
    }
}
