// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use encore_app::{
    ArtistFields, EventType, Inquiry, InquiryId, InquiryStatus, Notification, NotificationId,
    NotificationKind, Weekday,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use time::{Date, Duration, Month, OffsetDateTime, Time};

const REFERENCE_YEAR: i32 = 2026;

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const COMPANIES: [&str; 8] = [
    "Northwind",
    "Bluebird Labs",
    "Summit Partners",
    "Harbor Health",
    "Lakeside Bank",
    "Evergreen Studio",
    "Apex Logistics",
    "Meridian Group",
];
const VENUES: [&str; 10] = [
    "vineyard",
    "rooftop terrace",
    "hotel ballroom",
    "backyard",
    "barn",
    "art gallery",
    "beach house",
    "community hall",
    "brewery",
    "city park",
];
const REQUESTS: [&str; 8] = [
    "an acoustic set during dinner",
    "a first dance song",
    "two sets with a short break",
    "background music for cocktail hour",
    "a surprise performance",
    "a full band for dancing",
    "a ceremony and reception package",
    "a short set after speeches",
];

pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    pub fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible booking records. Ids count up from 1 per
/// record kind.
pub struct BookingFaker {
    rng: DeterministicRng,
    next_inquiry: i64,
    next_notification: i64,
}

impl BookingFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_inquiry: 1,
            next_notification: 1,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn inquiry(&mut self) -> Inquiry {
        let submitted_at = self.date_in_year(REFERENCE_YEAR);
        self.inquiry_at(submitted_at)
    }

    pub fn inquiry_at(&mut self, submitted_at: OffsetDateTime) -> Inquiry {
        let id = InquiryId::new(self.next_inquiry);
        self.next_inquiry += 1;

        let event_type = EventType::KNOWN[self.rng.int_n(EventType::KNOWN.len())].clone();
        let client_name = if event_type == EventType::Corporate {
            format!("{} Events", self.pick(&COMPANIES))
        } else {
            self.person_name()
        };
        let email_user = client_name.to_ascii_lowercase().replace(' ', ".");
        let lead_days = self.int_range(14, 300);
        let status = InquiryStatus::ALL[self.rng.int_n(InquiryStatus::ALL.len())];

        Inquiry {
            id,
            client_phone: if self.rng.bool() {
                format!("555-{:04}", self.int_range(100, 9999))
            } else {
                String::new()
            },
            client_email: format!("{email_user}@example.com"),
            message: self.message(&event_type),
            event_date: (submitted_at + Duration::days(lead_days)).date(),
            client_name,
            event_type,
            submitted_at,
            status,
            artist_notes: None,
        }
    }

    pub fn inquiries(&mut self, count: usize) -> Vec<Inquiry> {
        (0..count).map(|_| self.inquiry()).collect()
    }

    pub fn notification_for(&mut self, inquiry: &Inquiry) -> Notification {
        let kind = match self.rng.int_n(3) {
            0 => NotificationKind::NewInquiry,
            1 => NotificationKind::StatusUpdate,
            _ => NotificationKind::Reminder,
        };
        let message = match kind {
            NotificationKind::NewInquiry => format!("New inquiry from {}", inquiry.client_name),
            NotificationKind::StatusUpdate => {
                format!("{} is now {}", inquiry.client_name, inquiry.status.label())
            }
            NotificationKind::Reminder => format!("Reminder: reply to {}", inquiry.client_name),
        };
        let id = NotificationId::new(self.next_notification);
        self.next_notification += 1;

        Notification {
            id,
            message,
            kind,
            created_at: inquiry.submitted_at + Duration::minutes(self.int_range(1, 600)),
            read: false,
            read_at: None,
            inquiry_id: Some(inquiry.id),
            event_type: Some(inquiry.event_type.clone()),
        }
    }

    pub fn artist(&mut self) -> ArtistFields {
        let mut event_types = Vec::new();
        for event_type in EventType::KNOWN {
            if self.rng.bool() {
                event_types.push(event_type);
            }
        }
        let availability: BTreeMap<Weekday, bool> = Weekday::ALL
            .into_iter()
            .map(|day| (day, self.rng.bool()))
            .collect();
        let name = self.person_name();
        let handle = name.to_ascii_lowercase().replace(' ', "");

        ArtistFields {
            bio: format!("Performer available for {}.", self.pick(&REQUESTS)),
            email: format!("{handle}@example.com"),
            phone: format!("555-{:04}", self.int_range(100, 9999)),
            website: format!("https://{handle}.example"),
            instagram: format!("@{handle}"),
            profile_photo: String::new(),
            event_types,
            availability,
            hourly_rate_cents: self.int_range(50, 500) * 100,
            name,
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> OffsetDateTime {
        let start = midnight_utc(year, Month::January, 1);
        let end =
            midnight_utc(year, Month::December, 31) + Duration::days(1) - Duration::seconds(1);
        self.random_datetime_between(start, end)
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn message(&mut self, event_type: &EventType) -> String {
        format!(
            "Planning a {} at a {} and looking for {}.",
            event_type.label().to_lowercase(),
            self.pick(&VENUES),
            self.pick(&REQUESTS),
        )
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn random_datetime_between(
        &mut self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> OffsetDateTime {
        let start_ts = start.unix_timestamp();
        let end_ts = end.unix_timestamp();
        if end_ts <= start_ts {
            return start;
        }
        let span = (end_ts - start_ts) as u64;
        let offset = self.rng.next_u64() % (span + 1);
        OffsetDateTime::from_unix_timestamp(start_ts + offset as i64).unwrap_or(start)
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("encore.db");
    Ok((dir, db_path))
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

fn midnight_utc(year: i32, month: Month, day: u8) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN);
    date.with_time(Time::MIDNIGHT).assume_utc()
}
