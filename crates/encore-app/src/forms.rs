// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;

use crate::{
    Artist, Availability, DataError, DataResult, EventType, Inquiry, InquiryStatus,
    complete_availability,
};

/// Every writable column of an inquiry. Updates always carry the whole
/// record so the store never merges partial patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryFields {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_type: EventType,
    pub event_date: Date,
    pub message: String,
    pub status: InquiryStatus,
    pub artist_notes: Option<String>,
}

impl InquiryFields {
    pub fn from_inquiry(inquiry: &Inquiry) -> Self {
        Self {
            client_name: inquiry.client_name.clone(),
            client_email: inquiry.client_email.clone(),
            client_phone: inquiry.client_phone.clone(),
            event_type: inquiry.event_type.clone(),
            event_date: inquiry.event_date,
            message: inquiry.message.clone(),
            status: inquiry.status,
            artist_notes: inquiry.artist_notes.clone(),
        }
    }

    pub fn with_status(mut self, status: InquiryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> DataResult<()> {
        if self.client_name.trim().is_empty() {
            return Err(DataError::rejected(
                "client_name",
                "client name is required -- enter a name and retry",
            ));
        }
        if !self.client_email.is_empty() && !looks_like_email(&self.client_email) {
            return Err(DataError::rejected(
                "client_email",
                format!("{:?} is not an email address", self.client_email),
            ));
        }
        if let EventType::Custom(label) = &self.event_type
            && label.is_empty()
        {
            return Err(DataError::rejected(
                "event_type",
                "event type is required -- choose one and retry",
            ));
        }
        Ok(())
    }
}

/// Parses a raw status value. Anything outside the four known statuses is
/// rejected rather than stored.
pub fn parse_status(raw: &str) -> DataResult<InquiryStatus> {
    InquiryStatus::parse(raw.trim()).ok_or_else(|| {
        DataError::rejected(
            "status",
            format!("unknown status {raw:?}; expected one of new, seen, responded, confirmed"),
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub instagram: String,
    pub profile_photo: String,
    pub event_types: Vec<EventType>,
    pub availability: Availability,
    pub hourly_rate_cents: i64,
}

impl ArtistFields {
    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            bio: artist.bio.clone(),
            email: artist.email.clone(),
            phone: artist.phone.clone(),
            website: artist.website.clone(),
            instagram: artist.instagram.clone(),
            profile_photo: artist.profile_photo.clone(),
            event_types: artist.event_types.clone(),
            availability: artist.availability.clone(),
            hourly_rate_cents: artist.hourly_rate_cents,
        }
    }

    pub fn validate(&self) -> DataResult<()> {
        if self.name.trim().is_empty() {
            return Err(DataError::rejected(
                "name",
                "artist name is required -- enter a name and retry",
            ));
        }
        if !self.email.is_empty() && !looks_like_email(&self.email) {
            return Err(DataError::rejected(
                "email",
                format!("{:?} is not an email address", self.email),
            ));
        }
        if self.hourly_rate_cents < 0 {
            return Err(DataError::rejected(
                "hourly_rate",
                "hourly rate cannot be negative",
            ));
        }
        let mut seen = Vec::with_capacity(self.event_types.len());
        for event_type in &self.event_types {
            if seen.contains(&event_type) {
                return Err(DataError::rejected(
                    "event_types",
                    format!("{event_type} is listed twice"),
                ));
            }
            seen.push(event_type);
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.availability = complete_availability(self.availability);
        self
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
