// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use time::Date;

use crate::{EventType, Inquiry, InquiryStatus};

/// Inclusive event-date window. Either bound may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    pub const fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Filter selections for the inquiry list. An empty set places no
/// constraint on its field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InquiryFilter {
    pub statuses: BTreeSet<InquiryStatus>,
    pub event_types: BTreeSet<EventType>,
    pub event_dates: Option<DateRange>,
}

impl InquiryFilter {
    pub fn is_active(&self) -> bool {
        !self.statuses.is_empty()
            || !self.event_types.is_empty()
            || self.event_dates.is_some_and(|range| !range.is_open())
    }

    pub fn toggle_status(&mut self, status: InquiryStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn toggle_event_type(&mut self, event_type: EventType) {
        if !self.event_types.remove(&event_type) {
            self.event_types.insert(event_type);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, inquiry: &Inquiry) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&inquiry.status) {
            return false;
        }
        if !self.event_types.is_empty() && !self.event_types.contains(&inquiry.event_type) {
            return false;
        }
        if let Some(range) = &self.event_dates
            && !range.contains(inquiry.event_date)
        {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match against client name, event type, and
/// message. An empty search matches everything.
pub fn matches_search(inquiry: &Inquiry, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        inquiry.client_name.as_str(),
        inquiry.event_type.label(),
        inquiry.message.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

pub fn filter_inquiries<'a>(
    inquiries: &'a [Inquiry],
    search: &str,
    filter: &InquiryFilter,
) -> Vec<&'a Inquiry> {
    inquiries
        .iter()
        .filter(|inquiry| matches_search(inquiry, search) && filter.matches(inquiry))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// Nothing has been received at all.
    Empty,
    /// Records exist but the search or filters exclude all of them.
    NoMatches,
    Showing(usize),
}

pub fn list_outcome(total: usize, visible: usize) -> ListOutcome {
    match (total, visible) {
        (0, _) => ListOutcome::Empty,
        (_, 0) => ListOutcome::NoMatches,
        (_, visible) => ListOutcome::Showing(visible),
    }
}
