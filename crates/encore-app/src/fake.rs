// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::{date, datetime};

use crate::{
    Artist, ArtistFields, ArtistId, BookingRuntime, DataError, DataResult, EntityKind, EventType,
    Inquiry, InquiryFields, InquiryId, InquiryStatus, Notification, NotificationId,
    NotificationKind, complete_availability,
};

/// In-memory runtime for unit tests. Counts calls and can be told to fail
/// the next write.
#[derive(Debug, Default)]
pub struct FakeRuntime {
    pub inquiries: Vec<Inquiry>,
    pub notifications: Vec<Notification>,
    pub artists: Vec<Artist>,
    pub calls: usize,
    pub fail_writes: bool,
}

impl FakeRuntime {
    pub fn seeded() -> Self {
        Self {
            inquiries: vec![
                inquiry(1, "Sarah Johnson", EventType::Wedding, InquiryStatus::New),
                inquiry(2, "Tech Corp", EventType::Corporate, InquiryStatus::Seen),
                inquiry(3, "Mike Chen", EventType::Birthday, InquiryStatus::Responded),
            ],
            notifications: vec![
                notification(1, NotificationKind::NewInquiry, false),
                notification(2, NotificationKind::StatusUpdate, true),
                notification(3, NotificationKind::Reminder, false),
            ],
            artists: vec![Artist {
                id: ArtistId::new(1),
                name: "Mara Quinn".to_owned(),
                bio: "Jazz vocalist".to_owned(),
                email: "mara@example.com".to_owned(),
                phone: String::new(),
                website: String::new(),
                instagram: String::new(),
                profile_photo: String::new(),
                event_types: vec![EventType::Wedding],
                availability: complete_availability(Default::default()),
                hourly_rate_cents: 12_500,
            }],
            ..Self::default()
        }
    }

    fn write_guard(&self, context: &str) -> DataResult<()> {
        if self.fail_writes {
            return Err(DataError::transient(
                context.to_owned(),
                std::io::Error::other("store offline"),
            ));
        }
        Ok(())
    }
}

pub fn inquiry(id: i64, name: &str, event_type: EventType, status: InquiryStatus) -> Inquiry {
    Inquiry {
        id: InquiryId::new(id),
        client_name: name.to_owned(),
        client_email: format!("client{id}@example.com"),
        client_phone: String::new(),
        event_type,
        event_date: date!(2026 - 07 - 04),
        message: format!("Inquiry body {id}"),
        submitted_at: datetime!(2026-01-10 09:30 UTC),
        status,
        artist_notes: None,
    }
}

pub fn notification(id: i64, kind: NotificationKind, read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        message: format!("Notification {id}"),
        kind,
        created_at: datetime!(2026-01-10 10:00 UTC),
        read,
        read_at: None,
        inquiry_id: Some(InquiryId::new(id)),
        event_type: None,
    }
}

impl BookingRuntime for FakeRuntime {
    fn list_inquiries(&mut self) -> DataResult<Vec<Inquiry>> {
        self.calls += 1;
        Ok(self.inquiries.clone())
    }

    fn get_inquiry(&mut self, id: InquiryId) -> DataResult<Inquiry> {
        self.calls += 1;
        self.inquiries
            .iter()
            .find(|inquiry| inquiry.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Inquiry, id.get()))
    }

    fn update_inquiry(&mut self, id: InquiryId, fields: &InquiryFields) -> DataResult<Inquiry> {
        self.calls += 1;
        self.write_guard("update inquiry")?;
        let inquiry = self
            .inquiries
            .iter_mut()
            .find(|inquiry| inquiry.id == id)
            .ok_or_else(|| DataError::not_found(EntityKind::Inquiry, id.get()))?;
        inquiry.client_name = fields.client_name.clone();
        inquiry.client_email = fields.client_email.clone();
        inquiry.client_phone = fields.client_phone.clone();
        inquiry.event_type = fields.event_type.clone();
        inquiry.event_date = fields.event_date;
        inquiry.message = fields.message.clone();
        inquiry.status = fields.status;
        inquiry.artist_notes = fields.artist_notes.clone();
        Ok(inquiry.clone())
    }

    fn list_notifications(&mut self) -> DataResult<Vec<Notification>> {
        self.calls += 1;
        Ok(self.notifications.clone())
    }

    fn mark_notification_read(&mut self, id: NotificationId) -> DataResult<Notification> {
        self.calls += 1;
        self.write_guard("mark notification read")?;
        let notification = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .ok_or_else(|| DataError::not_found(EntityKind::Notification, id.get()))?;
        if !notification.read {
            notification.read = true;
            notification.read_at = Some(datetime!(2026-01-11 08:00 UTC));
        }
        Ok(notification.clone())
    }

    fn mark_all_notifications_read(&mut self) -> DataResult<Vec<Notification>> {
        self.calls += 1;
        self.write_guard("mark all notifications read")?;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            notification.read_at = Some(datetime!(2026-01-11 08:00 UTC));
        }
        Ok(self.notifications.clone())
    }

    fn get_artist_profile(&mut self, id: ArtistId) -> DataResult<Artist> {
        self.calls += 1;
        self.artists
            .iter()
            .find(|artist| artist.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Artist, id.get()))
    }

    fn update_artist_profile(
        &mut self,
        id: ArtistId,
        fields: &ArtistFields,
    ) -> DataResult<Artist> {
        self.calls += 1;
        self.write_guard("update artist")?;
        let artist = self
            .artists
            .iter_mut()
            .find(|artist| artist.id == id)
            .ok_or_else(|| DataError::not_found(EntityKind::Artist, id.get()))?;
        artist.name = fields.name.clone();
        artist.bio = fields.bio.clone();
        artist.email = fields.email.clone();
        artist.phone = fields.phone.clone();
        artist.website = fields.website.clone();
        artist.instagram = fields.instagram.clone();
        artist.profile_photo = fields.profile_photo.clone();
        artist.hourly_rate_cents = fields.hourly_rate_cents;
        artist.availability = fields.availability.clone();
        artist.event_types = fields.event_types.clone();
        Ok(artist.clone())
    }
}
