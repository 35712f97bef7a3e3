//! Zone buckets for the journal front-end.
//!
//! # Invariants
//! - The result always holds one bucket per zone, empty or not.
//! - Inside a bucket: sponsored first, then newest first; ties keep input
//!   order.

use crate::lifecycle::classifier::zone_at;
use crate::model::content_item::ContentItem;
use crate::model::zone::Zone;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Zone-keyed article buckets, iterated in layout order.
pub type ZoneGroups = BTreeMap<Zone, Vec<ContentItem>>;

/// Partitions articles into zone buckets derived from `published_at` and `now`.
///
/// The cached `zone` field on each item is ignored.
pub fn group_by_zone<I>(items: I, now: i64) -> ZoneGroups
where
    I: IntoIterator<Item = ContentItem>,
{
    let mut groups: ZoneGroups = Zone::ALL.into_iter().map(|zone| (zone, Vec::new())).collect();

    for item in items {
        let zone = zone_at(item.published_at, now);
        groups.entry(zone).or_default().push(item);
    }

    for bucket in groups.values_mut() {
        bucket.sort_by_key(|item| (Reverse(item.sponsored), Reverse(item.published_at)));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::group_by_zone;
    use crate::lifecycle::DAY_MS;
    use crate::model::content_item::ContentItem;
    use crate::model::zone::Zone;

    const NOW: i64 = 1_760_000_000_000;

    #[test]
    fn empty_input_yields_all_zone_keys() {
        let groups = group_by_zone(Vec::new(), NOW);
        assert_eq!(groups.len(), 8);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), Zone::ALL.to_vec());
        assert!(groups.values().all(Vec::is_empty));
    }

    #[test]
    fn sponsored_older_item_precedes_newer_regular_item() {
        let older = ContentItem::new("sponsored", NOW - 2 * DAY_MS).sponsored(true);
        let newer = ContentItem::new("regular", NOW - DAY_MS / 2);

        let groups = group_by_zone(vec![newer.clone(), older.clone()], NOW);
        let front = &groups[&Zone::Une];
        assert_eq!(front.len(), 2);
        assert_eq!(front[0].id, older.id);
        assert_eq!(front[1].id, newer.id);
    }

    #[test]
    fn items_are_bucketed_by_elapsed_time_not_cached_zone() {
        let mut stale = ContentItem::new("stale cache", NOW - 30 * DAY_MS);
        stale.zone = Zone::Une;
        let fresh = ContentItem::new("fresh", NOW);

        let groups = group_by_zone(vec![stale.clone(), fresh.clone()], NOW);
        assert_eq!(groups[&Zone::Archives][0].id, stale.id);
        assert_eq!(groups[&Zone::Une][0].id, fresh.id);
        assert_eq!(groups.len(), 8);
    }

    #[test]
    fn recency_orders_items_and_ties_keep_input_order() {
        let first = ContentItem::new("first", NOW - DAY_MS * 5);
        let second = ContentItem::new("second", NOW - DAY_MS * 5);
        let newest = ContentItem::new("newest", NOW - DAY_MS * 4);

        let groups = group_by_zone(vec![first.clone(), second.clone(), newest.clone()], NOW);
        let ids: Vec<_> = groups[&Zone::FaceUne].iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![newest.id, first.id, second.id]);
    }
}
