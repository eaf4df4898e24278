// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use encore_app::{
    Artist, ArtistFields, ArtistId, BookingRuntime, DataError, DataResult, Inquiry,
    InquiryFields, InquiryId, Notification, NotificationId,
};
use encore_db::Store;

pub struct DbRuntime<'a> {
    store: &'a Store,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

/// Store errors that already carry a `DataError` keep it. Anything else is
/// an I/O failure the caller may retry.
fn classify<T>(context: &'static str, result: anyhow::Result<T>) -> DataResult<T> {
    result.map_err(|error| match error.downcast::<DataError>() {
        Ok(data) => data,
        Err(other) => DataError::transient(context, other),
    })
}

impl BookingRuntime for DbRuntime<'_> {
    fn list_inquiries(&mut self) -> DataResult<Vec<Inquiry>> {
        classify("list inquiries", self.store.list_inquiries())
    }

    fn get_inquiry(&mut self, id: InquiryId) -> DataResult<Inquiry> {
        classify("load inquiry", self.store.get_inquiry(id))
    }

    fn update_inquiry(&mut self, id: InquiryId, fields: &InquiryFields) -> DataResult<Inquiry> {
        classify("update inquiry", self.store.update_inquiry(id, fields))
    }

    fn list_notifications(&mut self) -> DataResult<Vec<Notification>> {
        classify("list notifications", self.store.list_notifications())
    }

    fn mark_notification_read(&mut self, id: NotificationId) -> DataResult<Notification> {
        classify("mark notification read", self.store.mark_notification_read(id))
    }

    fn mark_all_notifications_read(&mut self) -> DataResult<Vec<Notification>> {
        classify(
            "mark all notifications read",
            self.store.mark_all_notifications_read(),
        )
    }

    fn get_artist_profile(&mut self, id: ArtistId) -> DataResult<Artist> {
        classify("load artist profile", self.store.get_artist(id))
    }

    fn update_artist_profile(
        &mut self,
        id: ArtistId,
        fields: &ArtistFields,
    ) -> DataResult<Artist> {
        classify("update artist profile", self.store.update_artist(id, fields))
    }
}
