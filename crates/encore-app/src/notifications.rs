// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::{BookingRuntime, DataError, DataResult, EntityKind, Notification, NotificationId};

/// Local copy of the notification list and its read flags.
///
/// A read flag only ever goes from false to true. Merging a fresh list from
/// the store keeps any flag this tracker has already seen set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTracker {
    items: Vec<Notification>,
}

impl NotificationTracker {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn load<R>(runtime: &mut R) -> DataResult<Self>
    where
        R: BookingRuntime + ?Sized,
    {
        runtime.list_notifications().map(Self::new)
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|item| !item.read)
    }

    /// Replaces the held list with `incoming`, in its order.
    pub fn merge(&mut self, incoming: Vec<Notification>) {
        let known: HashMap<NotificationId, &Notification> = self
            .items
            .iter()
            .filter(|item| item.read)
            .map(|item| (item.id, item))
            .collect();
        let merged = incoming
            .into_iter()
            .map(|mut item| {
                if !item.read
                    && let Some(previous) = known.get(&item.id)
                {
                    item.read = true;
                    item.read_at = previous.read_at;
                }
                item
            })
            .collect();
        self.items = merged;
    }

    /// Marks one notification read. Already-read items are left alone
    /// without a store call.
    pub fn mark_read<R>(&mut self, runtime: &mut R, id: NotificationId) -> DataResult<()>
    where
        R: BookingRuntime + ?Sized,
    {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Err(DataError::not_found(EntityKind::Notification, id.get()));
        };
        if self.items[index].read {
            return Ok(());
        }
        let mut stored = runtime.mark_notification_read(id)?;
        stored.read = true;
        self.items[index] = stored;
        Ok(())
    }

    /// Marks every held notification read with one batch call. Does nothing
    /// when none are unread.
    pub fn mark_all_read<R>(&mut self, runtime: &mut R) -> DataResult<()>
    where
        R: BookingRuntime + ?Sized,
    {
        if self.unread_count() == 0 {
            return Ok(());
        }
        let stored = runtime.mark_all_notifications_read()?;
        tracing::debug!(count = stored.len(), "marked all notifications read");
        self.merge(stored);
        for item in &mut self.items {
            item.read = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationTracker;
    use crate::fake::{FakeRuntime, notification};
    use crate::{NotificationId, NotificationKind};
    use anyhow::Result;

    #[test]
    fn unread_count_follows_the_held_list() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let tracker = NotificationTracker::load(&mut runtime)?;
        assert_eq!(tracker.unread_count(), 2);
        assert_eq!(tracker.unread().count(), 2);
        Ok(())
    }

    #[test]
    fn mark_read_flips_exactly_one_item() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut tracker = NotificationTracker::load(&mut runtime)?;

        tracker.mark_read(&mut runtime, NotificationId::new(1))?;

        let first = tracker.get(NotificationId::new(1)).map(|item| item.read);
        let third = tracker.get(NotificationId::new(3)).map(|item| item.read);
        assert_eq!(first, Some(true));
        assert_eq!(third, Some(false));
        assert_eq!(tracker.unread_count(), 1);
        Ok(())
    }

    #[test]
    fn mark_read_twice_matches_once() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut tracker = NotificationTracker::load(&mut runtime)?;

        tracker.mark_read(&mut runtime, NotificationId::new(3))?;
        let once = tracker.clone();
        let calls = runtime.calls;
        tracker.mark_read(&mut runtime, NotificationId::new(3))?;

        assert_eq!(tracker, once);
        assert_eq!(runtime.calls, calls, "second mark should not hit the store");
        Ok(())
    }

    #[test]
    fn mark_read_on_unknown_id_is_not_found() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut tracker = NotificationTracker::load(&mut runtime)?;

        let error = tracker
            .mark_read(&mut runtime, NotificationId::new(77))
            .expect_err("missing notification");
        assert!(error.is_not_found());
        Ok(())
    }

    #[test]
    fn mark_all_read_clears_any_mix() -> Result<()> {
        for pattern in [[false, false, false], [true, false, true], [false, true, false]] {
            let mut runtime = FakeRuntime::seeded();
            runtime.notifications = pattern
                .iter()
                .enumerate()
                .map(|(i, read)| notification(i as i64 + 1, NotificationKind::Reminder, *read))
                .collect();
            let mut tracker = NotificationTracker::load(&mut runtime)?;

            tracker.mark_all_read(&mut runtime)?;

            assert_eq!(tracker.unread_count(), 0, "pattern {pattern:?}");
            assert_eq!(tracker.items().len(), 3);
        }
        Ok(())
    }

    #[test]
    fn mark_all_read_skips_store_when_nothing_unread() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        for item in &mut runtime.notifications {
            item.read = true;
        }
        let mut tracker = NotificationTracker::load(&mut runtime)?;
        let calls = runtime.calls;

        tracker.mark_all_read(&mut runtime)?;

        assert_eq!(runtime.calls, calls);
        Ok(())
    }

    #[test]
    fn failed_mark_leaves_flags_alone() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut tracker = NotificationTracker::load(&mut runtime)?;
        runtime.fail_writes = true;

        tracker
            .mark_read(&mut runtime, NotificationId::new(1))
            .expect_err("offline store");
        tracker
            .mark_all_read(&mut runtime)
            .expect_err("offline store");

        assert_eq!(tracker.unread_count(), 2);
        Ok(())
    }

    #[test]
    fn merge_never_unreads_a_read_item() {
        let mut tracker = NotificationTracker::new(vec![
            notification(1, NotificationKind::NewInquiry, true),
            notification(2, NotificationKind::Reminder, false),
        ]);

        tracker.merge(vec![
            notification(4, NotificationKind::StatusUpdate, false),
            notification(1, NotificationKind::NewInquiry, false),
            notification(2, NotificationKind::Reminder, false),
        ]);

        let ids: Vec<i64> = tracker.items().iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![4, 1, 2]);
        assert_eq!(tracker.get(NotificationId::new(1)).map(|n| n.read), Some(true));
        assert_eq!(tracker.unread_count(), 2);
    }
}
