// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Plain-text views for terminal output.

use std::fmt::Write as _;

use encore_app::present::{
    Tone, availability_label, availability_tone, avatar_initial, event_icon, format_event_date,
    format_short_date, format_submitted, notification_icon, status_tone,
};
use encore_app::{
    Artist, Inquiry, InquiryFilter, ListOutcome, MessageKind, Notification, UserMessage, Weekday,
};
use encore_db::validation::format_cents;

const MESSAGE_PREVIEW: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(self, tone: Tone, text: &str) -> String {
        if self.color {
            tone.paint(text)
        } else {
            text.to_owned()
        }
    }

    fn badge(self, tone: Tone, text: &str) -> String {
        self.paint(tone, &format!("[{text}]"))
    }
}

pub fn inquiry_list(
    visible: &[&Inquiry],
    outcome: ListOutcome,
    filter: &InquiryFilter,
    palette: Palette,
) -> String {
    let mut out = String::new();
    match outcome {
        ListOutcome::Empty => {
            out.push_str("No inquiries yet. New booking requests will show up here.\n");
            return out;
        }
        ListOutcome::NoMatches => {
            out.push_str("No inquiries match your search");
            if filter.is_active() {
                out.push_str(" and filters");
            }
            out.push_str(". Try a broader search or clear the filters.\n");
            return out;
        }
        ListOutcome::Showing(count) => {
            let noun = if count == 1 { "inquiry" } else { "inquiries" };
            let _ = writeln!(out, "{count} {noun}");
        }
    }

    for inquiry in visible {
        let status = palette.badge(status_tone(inquiry.status), inquiry.status.label());
        let _ = writeln!(
            out,
            "#{:<4} {} {:<24} {:<12} {:<14} {}",
            inquiry.id,
            event_icon(&inquiry.event_type).glyph(),
            truncate(&inquiry.client_name, 24),
            truncate(inquiry.event_type.label(), 12),
            format_short_date(inquiry.event_date),
            status,
        );
        let _ = writeln!(
            out,
            "      {}",
            palette.paint(Tone::Muted, &truncate(&inquiry.message, MESSAGE_PREVIEW)),
        );
    }
    out
}

pub fn inquiry_detail(inquiry: &Inquiry, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  {}",
        avatar_initial(&inquiry.client_name),
        inquiry.client_name,
        palette.badge(status_tone(inquiry.status), inquiry.status.label()),
    );
    let _ = writeln!(
        out,
        "  {}",
        palette.paint(Tone::Muted, inquiry.status.description())
    );
    let _ = writeln!(
        out,
        "  {} {}",
        event_icon(&inquiry.event_type).glyph(),
        inquiry.event_type.label()
    );
    let _ = writeln!(out, "  Event date:  {}", format_event_date(inquiry.event_date));
    let _ = writeln!(out, "  Submitted:   {}", format_submitted(inquiry.submitted_at));
    if !inquiry.client_email.is_empty() {
        let _ = writeln!(out, "  Email:       {}", inquiry.client_email);
    }
    if !inquiry.client_phone.is_empty() {
        let _ = writeln!(out, "  Phone:       {}", inquiry.client_phone);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", inquiry.message);
    if let Some(notes) = inquiry.artist_notes.as_deref()
        && !notes.trim().is_empty()
    {
        let _ = writeln!(out);
        let _ = writeln!(out, "Notes: {notes}");
    }
    out
}

pub fn notification_list(items: &[&Notification], unread: usize, palette: Palette) -> String {
    let mut out = String::new();
    if items.is_empty() {
        out.push_str("No notifications. You're all caught up.\n");
        return out;
    }

    let _ = writeln!(out, "{unread} unread");
    for item in items {
        let marker = if item.read {
            " ".to_owned()
        } else {
            palette.paint(Tone::Info, "●")
        };
        let _ = writeln!(
            out,
            "{marker} #{:<4} {} {}",
            item.id,
            notification_icon(item.kind).glyph(),
            item.message,
        );
        let mut detail = format_submitted(item.created_at);
        if let Some(event_type) = &item.event_type {
            let _ = write!(detail, " · {}", event_type.label());
        }
        let _ = writeln!(out, "        {}", palette.paint(Tone::Muted, &detail));
    }
    out
}

pub fn profile(artist: &Artist, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", avatar_initial(&artist.name), artist.name);
    if !artist.bio.is_empty() {
        let _ = writeln!(out, "  {}", artist.bio);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Rate:       {}/hr", format_cents(artist.hourly_rate_cents));
    for (label, value) in [
        ("Email:", &artist.email),
        ("Phone:", &artist.phone),
        ("Website:", &artist.website),
        ("Instagram:", &artist.instagram),
    ] {
        if !value.is_empty() {
            let _ = writeln!(out, "  {label:<11} {value}");
        }
    }

    if !artist.event_types.is_empty() {
        let types = artist
            .event_types
            .iter()
            .map(|event_type| format!("{} {}", event_icon(event_type).glyph(), event_type.label()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  Events:     {types}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Availability");
    for day in Weekday::ALL {
        let available = artist.is_available(day);
        let _ = writeln!(
            out,
            "  {:<10} {}",
            day.label(),
            palette.badge(availability_tone(available), availability_label(available)),
        );
    }
    out
}

pub fn message(message: &UserMessage, palette: Palette) -> String {
    let tone = match message.kind {
        MessageKind::Info => Tone::Success,
        MessageKind::NotFound | MessageKind::Rejected { .. } => Tone::Warning,
        MessageKind::Unavailable => Tone::Error,
    };
    palette.paint(tone, &message.text)
}

fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut cut = single_line
        .chars()
        .take(max.saturating_sub(1))
        .collect::<String>();
    cut.push('…');
    cut
}
