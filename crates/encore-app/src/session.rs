// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    AppCommand, AppState, Artist, ArtistFields, ArtistId, BookingRuntime, DataError, DataResult,
    Inquiry, InquiryFilter, InquiryId, InquiryStatus, ListOutcome, LoadOutcome, LoadTicket,
    NotificationId, NotificationTracker, Page, UserMessage, filter_inquiries, list_outcome,
    parse_status, replace_inquiry, set_status,
};

/// View state for one interactive session over a borrowed runtime.
///
/// Every action is one round trip. Failures land in `state.message` and
/// leave the held data as it was.
pub struct Session<'r, R: BookingRuntime + ?Sized> {
    runtime: &'r mut R,
    artist_id: ArtistId,
    pub state: AppState,
    inquiries: Vec<Inquiry>,
    search: String,
    filter: InquiryFilter,
    detail: Option<Inquiry>,
    notifications: NotificationTracker,
    profile: Option<Artist>,
}

impl<'r, R: BookingRuntime + ?Sized> Session<'r, R> {
    pub fn new(runtime: &'r mut R, artist_id: ArtistId) -> Self {
        Self {
            runtime,
            artist_id,
            state: AppState::default(),
            inquiries: Vec::new(),
            search: String::new(),
            filter: InquiryFilter::default(),
            detail: None,
            notifications: NotificationTracker::default(),
            profile: None,
        }
    }

    pub fn inquiries(&self) -> &[Inquiry] {
        &self.inquiries
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> &InquiryFilter {
        &self.filter
    }

    pub fn detail(&self) -> Option<&Inquiry> {
        self.detail.as_ref()
    }

    pub fn notifications(&self) -> &NotificationTracker {
        &self.notifications
    }

    pub fn profile(&self) -> Option<&Artist> {
        self.profile.as_ref()
    }

    pub fn visible_inquiries(&self) -> Vec<&Inquiry> {
        filter_inquiries(&self.inquiries, &self.search, &self.filter)
    }

    pub fn list_outcome(&self) -> ListOutcome {
        list_outcome(self.inquiries.len(), self.visible_inquiries().len())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn apply_filter(&mut self, filter: InquiryFilter) {
        self.filter = filter;
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn open_inquiries(&mut self) -> LoadOutcome {
        self.state.dispatch(AppCommand::Navigate(Page::Inquiries));
        let ticket = self.state.begin_load();
        let result = self.runtime.list_inquiries();
        self.deliver_inquiries(ticket, result)
    }

    pub fn deliver_inquiries(
        &mut self,
        ticket: LoadTicket,
        result: DataResult<Vec<Inquiry>>,
    ) -> LoadOutcome {
        match result {
            Ok(list) => self.state.finish(ticket, || self.inquiries = list),
            Err(error) => self.report(ticket, "load inquiries", &error),
        }
    }

    pub fn open_inquiry(&mut self, id: InquiryId) -> LoadOutcome {
        self.state
            .dispatch(AppCommand::Navigate(Page::InquiryDetail(id)));
        let ticket = self.state.begin_load();
        let result = self.runtime.get_inquiry(id);
        self.deliver_inquiry(ticket, result)
    }

    pub fn deliver_inquiry(&mut self, ticket: LoadTicket, result: DataResult<Inquiry>) -> LoadOutcome {
        match result {
            Ok(inquiry) => self.state.finish(ticket, || self.detail = Some(inquiry)),
            Err(error) => {
                let outcome = self.report(ticket, "load inquiry", &error);
                if outcome == LoadOutcome::Applied {
                    self.detail = None;
                }
                outcome
            }
        }
    }

    /// Updates the open inquiry's status. Returns true once the store has
    /// accepted it.
    pub fn set_status(&mut self, status: InquiryStatus) -> bool {
        let Some(detail) = self.detail.as_mut() else {
            self.show(UserMessage::info("open an inquiry first"));
            return false;
        };
        match set_status(&mut *self.runtime, detail, status) {
            Ok(()) => {
                replace_inquiry(&mut self.inquiries, detail);
                let text = format!("Status updated to {}", status.label());
                self.show(UserMessage::info(text));
                true
            }
            Err(error) => {
                tracing::warn!(inquiry = detail.id.get(), error = %error, "status update failed");
                self.show(UserMessage::from_error(&error));
                false
            }
        }
    }

    pub fn set_status_str(&mut self, raw: &str) -> bool {
        match parse_status(raw) {
            Ok(status) => self.set_status(status),
            Err(error) => {
                tracing::warn!(error = %error, "status update rejected");
                self.show(UserMessage::from_error(&error));
                false
            }
        }
    }

    pub fn open_notifications(&mut self) -> LoadOutcome {
        self.state
            .dispatch(AppCommand::Navigate(Page::Notifications));
        let ticket = self.state.begin_load();
        let result = self.runtime.list_notifications();
        match result {
            Ok(list) => self
                .state
                .finish(ticket, || self.notifications.merge(list)),
            Err(error) => self.report(ticket, "load notifications", &error),
        }
    }

    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.mark_read(&mut *self.runtime, id) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(notification = id.get(), error = %error, "mark read failed");
                self.show(UserMessage::from_error(&error));
                false
            }
        }
    }

    pub fn mark_all_read(&mut self) -> bool {
        match self.notifications.mark_all_read(&mut *self.runtime) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(error = %error, "mark all read failed");
                self.show(UserMessage::from_error(&error));
                false
            }
        }
    }

    pub fn open_profile(&mut self) -> LoadOutcome {
        self.state.dispatch(AppCommand::Navigate(Page::Profile));
        let ticket = self.state.begin_load();
        let result = self.runtime.get_artist_profile(self.artist_id);
        match result {
            Ok(artist) => self.state.finish(ticket, || self.profile = Some(artist)),
            Err(error) => self.report(ticket, "load profile", &error),
        }
    }

    pub fn save_profile(&mut self, fields: ArtistFields) -> bool {
        let fields = fields.normalized();
        let result = fields
            .validate()
            .and_then(|()| self.runtime.update_artist_profile(self.artist_id, &fields));
        match result {
            Ok(artist) => {
                self.profile = Some(artist);
                self.show(UserMessage::info("Profile saved"));
                true
            }
            Err(error) => {
                tracing::warn!(artist = self.artist_id.get(), error = %error, "profile save failed");
                self.show(UserMessage::from_error(&error));
                false
            }
        }
    }

    pub fn dismiss_message(&mut self) {
        self.state.dispatch(AppCommand::DismissMessage);
    }

    fn show(&mut self, message: UserMessage) {
        self.state.dispatch(AppCommand::Report(message));
    }

    fn report(
        &mut self,
        ticket: LoadTicket,
        action: &'static str,
        error: &DataError,
    ) -> LoadOutcome {
        tracing::warn!(action, error = %error, "load failed");
        if !self.state.accepts(ticket) {
            return LoadOutcome::Discarded;
        }
        self.show(UserMessage::from_error(error));
        LoadOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::fake::FakeRuntime;
    use crate::{
        ArtistFields, ArtistId, BookingRuntime, InquiryFilter, InquiryId, InquiryStatus, ListOutcome,
        LoadOutcome, MessageKind, NotificationId, Page, Weekday,
    };
    use anyhow::Result;

    #[test]
    fn open_inquiries_loads_the_list() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));

        assert_eq!(session.open_inquiries(), LoadOutcome::Applied);
        assert_eq!(session.inquiries().len(), 3);
        assert_eq!(session.list_outcome(), ListOutcome::Showing(3));
    }

    #[test]
    fn search_and_filter_narrow_the_visible_list() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_inquiries();

        session.set_search("mike");
        assert_eq!(session.list_outcome(), ListOutcome::Showing(1));

        let mut filter = InquiryFilter::default();
        filter.toggle_status(InquiryStatus::Confirmed);
        session.apply_filter(filter);
        assert_eq!(session.list_outcome(), ListOutcome::NoMatches);

        session.set_search("");
        session.clear_filter();
        assert_eq!(session.visible_inquiries().len(), 3);
    }

    #[test]
    fn empty_store_is_reported_as_empty() {
        let mut runtime = FakeRuntime::default();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_inquiries();
        assert_eq!(session.list_outcome(), ListOutcome::Empty);
    }

    #[test]
    fn stale_inquiry_load_is_dropped_after_leaving_the_page() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let list = runtime.list_inquiries()?;
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        let ticket = session.state.begin_load();
        session.open_profile();

        assert_eq!(
            session.deliver_inquiries(ticket, Ok(list)),
            LoadOutcome::Discarded
        );
        assert!(session.inquiries().is_empty());
        Ok(())
    }

    #[test]
    fn status_change_updates_detail_and_list() {
        let mut runtime = FakeRuntime::seeded();
        {
            let mut session = Session::new(&mut runtime, ArtistId::new(1));
            session.open_inquiries();
            session.open_inquiry(InquiryId::new(2));

            assert!(session.set_status(InquiryStatus::Responded));
            assert_eq!(
                session.detail().map(|inquiry| inquiry.status),
                Some(InquiryStatus::Responded)
            );
            assert_eq!(session.inquiries()[1].status, InquiryStatus::Responded);
            assert_eq!(
                session.state.message.as_ref().map(|m| m.kind),
                Some(MessageKind::Info)
            );
        }
        assert_eq!(runtime.inquiries[1].status, InquiryStatus::Responded);
    }

    #[test]
    fn failed_status_change_shows_error_and_keeps_state() {
        let mut runtime = FakeRuntime::seeded();
        runtime.fail_writes = true;
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_inquiry(InquiryId::new(1));

        assert!(!session.set_status(InquiryStatus::Confirmed));
        assert_eq!(
            session.detail().map(|inquiry| inquiry.status),
            Some(InquiryStatus::New)
        );
        assert_eq!(
            session.state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Unavailable)
        );
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_inquiry(InquiryId::new(1));

        assert!(!session.set_status_str("archived"));
        assert_eq!(
            session.state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Rejected { field: "status" })
        );
        assert_eq!(
            session.detail().map(|inquiry| inquiry.status),
            Some(InquiryStatus::New)
        );
    }

    #[test]
    fn missing_inquiry_shows_not_found() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));

        assert_eq!(session.open_inquiry(InquiryId::new(40)), LoadOutcome::Applied);
        assert!(session.detail().is_none());
        assert_eq!(session.state.page, Page::InquiryDetail(InquiryId::new(40)));
        assert_eq!(
            session.state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::NotFound)
        );
        session.dismiss_message();
        assert!(session.state.message.is_none());
    }

    #[test]
    fn notification_actions_update_unread_count() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_notifications();
        assert_eq!(session.notifications().unread_count(), 2);

        assert!(session.mark_read(NotificationId::new(1)));
        assert_eq!(session.notifications().unread_count(), 1);

        assert!(session.mark_all_read());
        assert_eq!(session.notifications().unread_count(), 0);
    }

    #[test]
    fn profile_load_and_save() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_profile();

        let Some(artist) = session.profile() else {
            panic!("profile should load");
        };
        let mut fields = ArtistFields::from_artist(artist);
        fields.bio = "Jazz and soul vocalist".to_owned();
        fields.availability.insert(Weekday::Saturday, true);

        assert!(session.save_profile(fields));
        let saved = session.profile().map(|artist| {
            (artist.bio.clone(), artist.is_available(Weekday::Saturday))
        });
        assert_eq!(saved, Some(("Jazz and soul vocalist".to_owned(), true)));
    }

    #[test]
    fn invalid_profile_is_rejected_before_the_store() {
        let mut runtime = FakeRuntime::seeded();
        let mut session = Session::new(&mut runtime, ArtistId::new(1));
        session.open_profile();
        let Some(artist) = session.profile() else {
            panic!("profile should load");
        };
        let mut fields = ArtistFields::from_artist(artist);
        fields.name = String::new();

        assert!(!session.save_profile(fields));
        assert_eq!(
            session.state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Rejected { field: "name" })
        );
        assert_eq!(session.profile().map(|a| a.name.as_str()), Some("Mara Quinn"));
    }
}
