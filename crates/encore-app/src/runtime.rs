// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    Artist, ArtistFields, ArtistId, DataResult, Inquiry, InquiryFields, InquiryId, Notification,
    NotificationId,
};

/// Data-layer calls the client makes. The composition root owns the backing
/// store and hands consumers an implementation by reference.
pub trait BookingRuntime {
    /// Newest submission first.
    fn list_inquiries(&mut self) -> DataResult<Vec<Inquiry>>;

    fn get_inquiry(&mut self, id: InquiryId) -> DataResult<Inquiry>;

    /// Writes the whole record and returns what the store now holds.
    fn update_inquiry(&mut self, id: InquiryId, fields: &InquiryFields) -> DataResult<Inquiry>;

    /// Newest first.
    fn list_notifications(&mut self) -> DataResult<Vec<Notification>>;

    fn mark_notification_read(&mut self, id: NotificationId) -> DataResult<Notification>;

    fn mark_all_notifications_read(&mut self) -> DataResult<Vec<Notification>>;

    fn get_artist_profile(&mut self, id: ArtistId) -> DataResult<Artist>;

    fn update_artist_profile(&mut self, id: ArtistId, fields: &ArtistFields)
    -> DataResult<Artist>;
}
