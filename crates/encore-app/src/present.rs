// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Display lookups: badge tones, icons, date formats.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::{EventType, InquiryStatus, NotificationKind};

const EVENT_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");
const SHORT_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");
const CLOCK: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Muted,
    Warning,
    Success,
    Error,
}

impl Tone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Muted => "muted",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// SGR foreground code for terminals.
    pub const fn ansi(self) -> &'static str {
        match self {
            Self::Info => "34",
            Self::Muted => "90",
            Self::Warning => "33",
            Self::Success => "32",
            Self::Error => "31",
        }
    }

    pub fn paint(self, text: &str) -> String {
        format!("\x1b[{}m{text}\x1b[0m", self.ansi())
    }
}

pub const fn status_tone(status: InquiryStatus) -> Tone {
    match status {
        InquiryStatus::New => Tone::Info,
        InquiryStatus::Seen => Tone::Muted,
        InquiryStatus::Responded => Tone::Warning,
        InquiryStatus::Confirmed => Tone::Success,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Heart,
    Building,
    Gift,
    Calendar,
    GraduationCap,
    Music,
    Users,
    Star,
    Mail,
    CheckCircle,
    Clock,
}

impl Icon {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Building => "building",
            Self::Gift => "gift",
            Self::Calendar => "calendar",
            Self::GraduationCap => "graduation-cap",
            Self::Music => "music",
            Self::Users => "users",
            Self::Star => "star",
            Self::Mail => "mail",
            Self::CheckCircle => "check-circle",
            Self::Clock => "clock",
        }
    }

    /// Single-width glyph for plain terminals.
    pub const fn glyph(self) -> char {
        match self {
            Self::Heart => '♥',
            Self::Building => '▦',
            Self::Gift => '✦',
            Self::Calendar => '▤',
            Self::GraduationCap => '▲',
            Self::Music => '♪',
            Self::Users => '☺',
            Self::Star => '★',
            Self::Mail => '✉',
            Self::CheckCircle => '✓',
            Self::Clock => '◷',
        }
    }
}

pub fn event_icon(event_type: &EventType) -> Icon {
    match event_type {
        EventType::Wedding => Icon::Heart,
        EventType::Corporate => Icon::Building,
        EventType::Birthday => Icon::Gift,
        EventType::Anniversary => Icon::Calendar,
        EventType::Graduation => Icon::GraduationCap,
        EventType::Festival => Icon::Music,
        EventType::Private => Icon::Users,
        EventType::Other => Icon::Star,
        EventType::Custom(_) => Icon::Calendar,
    }
}

pub const fn notification_icon(kind: NotificationKind) -> Icon {
    match kind {
        NotificationKind::NewInquiry => Icon::Mail,
        NotificationKind::StatusUpdate => Icon::CheckCircle,
        NotificationKind::Reminder => Icon::Clock,
    }
}

pub const fn availability_tone(available: bool) -> Tone {
    if available { Tone::Success } else { Tone::Error }
}

pub const fn availability_label(available: bool) -> &'static str {
    if available { "Available" } else { "Unavailable" }
}

/// "Saturday, June 14, 2025"
pub fn format_event_date(date: Date) -> String {
    date.format(EVENT_DATE).unwrap_or_else(|_| date.to_string())
}

/// "Jun 14, 2025"
pub fn format_short_date(date: Date) -> String {
    date.format(SHORT_DATE).unwrap_or_else(|_| date.to_string())
}

/// "3:05 PM"
pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(CLOCK).unwrap_or_else(|_| at.time().to_string())
}

/// "Jun 14, 2025 at 3:05 PM"
pub fn format_submitted(at: OffsetDateTime) -> String {
    format!("{} at {}", format_short_date(at.date()), format_clock(at))
}

pub fn avatar_initial(name: &str) -> char {
    name.trim()
        .chars()
        .next()
        .and_then(|first| first.to_uppercase().next())
        .unwrap_or('?')
}
