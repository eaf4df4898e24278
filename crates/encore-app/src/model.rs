// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    New,
    Seen,
    Responded,
    Confirmed,
}

impl InquiryStatus {
    pub const ALL: [Self; 4] = [Self::New, Self::Seen, Self::Responded, Self::Confirmed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Seen => "seen",
            Self::Responded => "responded",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "seen" => Some(Self::Seen),
            "responded" => Some(Self::Responded),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Seen => "Seen",
            Self::Responded => "Responded",
            Self::Confirmed => "Confirmed",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::New => "Inquiry not yet reviewed",
            Self::Seen => "Inquiry has been viewed",
            Self::Responded => "Response sent to client",
            Self::Confirmed => "Booking confirmed",
        }
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of event a client is booking for.
///
/// Labels outside the known set are kept verbatim in `Custom` so that a
/// record written by another client still loads and displays.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EventType {
    Wedding,
    Corporate,
    Birthday,
    Anniversary,
    Graduation,
    Festival,
    Private,
    Other,
    Custom(String),
}

impl EventType {
    pub const KNOWN: [Self; 8] = [
        Self::Wedding,
        Self::Corporate,
        Self::Birthday,
        Self::Anniversary,
        Self::Graduation,
        Self::Festival,
        Self::Private,
        Self::Other,
    ];

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "wedding" => Self::Wedding,
            "corporate" => Self::Corporate,
            "birthday" => Self::Birthday,
            "anniversary" => Self::Anniversary,
            "graduation" => Self::Graduation,
            "festival" => Self::Festival,
            "private" => Self::Private,
            "other" => Self::Other,
            _ => Self::Custom(trimmed.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Wedding => "Wedding",
            Self::Corporate => "Corporate",
            Self::Birthday => "Birthday",
            Self::Anniversary => "Anniversary",
            Self::Graduation => "Graduation",
            Self::Festival => "Festival",
            Self::Private => "Private",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.label().to_owned()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewInquiry,
    StatusUpdate,
    Reminder,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewInquiry => "new_inquiry",
            Self::StatusUpdate => "status_update",
            Self::Reminder => "reminder",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new_inquiry" => Some(Self::NewInquiry),
            "status_update" => Some(Self::StatusUpdate),
            "reminder" => Some(Self::Reminder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Some(Self::Monday),
            "tuesday" | "tue" => Some(Self::Tuesday),
            "wednesday" | "wed" => Some(Self::Wednesday),
            "thursday" | "thu" => Some(Self::Thursday),
            "friday" | "fri" => Some(Self::Friday),
            "saturday" | "sat" => Some(Self::Saturday),
            "sunday" | "sun" => Some(Self::Sunday),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_type: EventType,
    #[serde(with = "iso_date")]
    pub event_date: Date,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    pub status: InquiryStatus,
    pub artist_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub inquiry_id: Option<InquiryId>,
    pub event_type: Option<EventType>,
}

pub type Availability = BTreeMap<Weekday, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
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

impl Artist {
    pub fn is_available(&self, day: Weekday) -> bool {
        self.availability.get(&day).copied().unwrap_or(false)
    }
}

/// Fills in every weekday missing from `availability` as unavailable.
pub fn complete_availability(mut availability: Availability) -> Availability {
    for day in Weekday::ALL {
        availability.entry(day).or_insert(false);
    }
    availability
}

#[cfg(test)]
mod tests {
    use super::{EventType, InquiryStatus, NotificationKind, Weekday, complete_availability};
    use std::collections::BTreeMap;

    #[test]
    fn status_parse_and_as_str_agree() {
        for status in InquiryStatus::ALL {
            assert_eq!(InquiryStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InquiryStatus::parse("archived"), None);
        assert_eq!(InquiryStatus::parse("New"), None);
    }

    #[test]
    fn event_type_parse_is_case_insensitive() {
        assert_eq!(EventType::parse("wedding"), EventType::Wedding);
        assert_eq!(EventType::parse("WEDDING"), EventType::Wedding);
        assert_eq!(EventType::parse(" Festival "), EventType::Festival);
    }

    #[test]
    fn unknown_event_type_keeps_label() {
        let parsed = EventType::parse("Bar Mitzvah");
        assert_eq!(parsed, EventType::Custom("Bar Mitzvah".to_owned()));
        assert_eq!(parsed.label(), "Bar Mitzvah");
    }

    #[test]
    fn notification_kind_rejects_unknown_values() {
        assert_eq!(
            NotificationKind::parse("status_update"),
            Some(NotificationKind::StatusUpdate)
        );
        assert_eq!(NotificationKind::parse("digest"), None);
    }

    #[test]
    fn weekday_accepts_short_names() {
        assert_eq!(Weekday::parse("Sat"), Some(Weekday::Saturday));
        assert_eq!(Weekday::parse("funday"), None);
    }

    #[test]
    fn complete_availability_fills_missing_days() {
        let mut partial = BTreeMap::new();
        partial.insert(Weekday::Friday, true);

        let full = complete_availability(partial);
        assert_eq!(full.len(), 7);
        assert_eq!(full.get(&Weekday::Friday), Some(&true));
        assert_eq!(full.get(&Weekday::Monday), Some(&false));
    }
}
