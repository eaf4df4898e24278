// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DataError, InquiryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Inquiries,
    InquiryDetail(InquiryId),
    Notifications,
    Profile,
}

impl Page {
    /// Top-level pages in navigation order. Details hang off `Inquiries`.
    pub const TABS: [Self; 3] = [Self::Inquiries, Self::Notifications, Self::Profile];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Inquiries => "Inquiries",
            Self::InquiryDetail(_) => "Inquiry",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
        }
    }

    const fn tab(self) -> Self {
        match self {
            Self::InquiryDetail(_) => Self::Inquiries,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    NotFound,
    Unavailable,
    Rejected { field: &'static str },
    Info,
}

/// A dismissable line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl UserMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn from_error(error: &DataError) -> Self {
        let kind = match error {
            DataError::NotFound { .. } => MessageKind::NotFound,
            DataError::TransientIo { .. } => MessageKind::Unavailable,
            DataError::ValidationRejected { field, .. } => MessageKind::Rejected { field: *field },
        };
        Self {
            kind,
            text: error.to_string(),
        }
    }

    pub const fn is_error(&self) -> bool {
        !matches!(self.kind, MessageKind::Info)
    }
}

/// Binds an in-flight load to the page and navigation generation that
/// started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    page: Page,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The page was left before the result arrived.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub page: Page,
    generation: u64,
    pub message: Option<UserMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Inquiries,
            generation: 0,
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Navigate(Page),
    NextTab,
    PrevTab,
    Back,
    Report(UserMessage),
    DismissMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PageChanged(Page),
    MessageShown(UserMessage),
    MessageDismissed,
}

impl AppState {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Navigate(page) => self.navigate(page),
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::Back => match self.page {
                Page::InquiryDetail(_) => self.navigate(Page::Inquiries),
                _ => Vec::new(),
            },
            AppCommand::Report(message) => {
                self.message = Some(message.clone());
                vec![AppEvent::MessageShown(message)]
            }
            AppCommand::DismissMessage => {
                if self.message.take().is_some() {
                    vec![AppEvent::MessageDismissed]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Starts a load for the current page.
    pub const fn begin_load(&self) -> LoadTicket {
        LoadTicket {
            page: self.page,
            generation: self.generation,
        }
    }

    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.page == self.page
    }

    /// Runs `apply` only when `ticket` still belongs to the visible page.
    pub fn finish<F>(&self, ticket: LoadTicket, apply: F) -> LoadOutcome
    where
        F: FnOnce(),
    {
        if self.accepts(ticket) {
            apply();
            LoadOutcome::Applied
        } else {
            tracing::debug!(page = ticket.page.title(), "discarded stale load");
            LoadOutcome::Discarded
        }
    }

    fn navigate(&mut self, page: Page) -> Vec<AppEvent> {
        if page == self.page {
            return Vec::new();
        }
        self.page = page;
        self.generation += 1;
        vec![AppEvent::PageChanged(page)]
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = Page::TABS;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.page.tab())
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.navigate(tabs[next])
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, LoadOutcome, MessageKind, Page, UserMessage};
    use crate::{DataError, EntityKind, InquiryId};

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            page: Page::Profile,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.page, Page::Inquiries);
        assert_eq!(events, vec![AppEvent::PageChanged(Page::Inquiries)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.page, Page::Profile);
    }

    #[test]
    fn detail_rotates_from_its_parent_tab() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::Navigate(Page::InquiryDetail(InquiryId::new(3))));

        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.page, Page::Notifications);
    }

    #[test]
    fn back_from_detail_returns_to_list() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::Navigate(Page::InquiryDetail(InquiryId::new(1))));

        let events = state.dispatch(AppCommand::Back);
        assert_eq!(events, vec![AppEvent::PageChanged(Page::Inquiries)]);
        assert!(state.dispatch(AppCommand::Back).is_empty());
    }

    #[test]
    fn load_after_navigation_is_discarded() {
        let mut state = AppState::default();
        let ticket = state.begin_load();
        state.dispatch(AppCommand::Navigate(Page::Notifications));

        let mut applied = false;
        let outcome = state.finish(ticket, || applied = true);
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(!applied);
    }

    #[test]
    fn returning_to_a_page_still_discards_the_old_load() {
        let mut state = AppState::default();
        let ticket = state.begin_load();
        state.dispatch(AppCommand::Navigate(Page::Profile));
        state.dispatch(AppCommand::Navigate(Page::Inquiries));

        assert!(!state.accepts(ticket));
        assert!(state.accepts(state.begin_load()));
    }

    #[test]
    fn current_load_is_applied() {
        let state = AppState::default();
        let ticket = state.begin_load();
        let mut applied = false;
        assert_eq!(state.finish(ticket, || applied = true), LoadOutcome::Applied);
        assert!(applied);
    }

    #[test]
    fn errors_become_dismissable_messages() {
        let mut state = AppState::default();
        let error = DataError::not_found(EntityKind::Inquiry, 9);
        let message = UserMessage::from_error(&error);
        assert_eq!(message.kind, MessageKind::NotFound);
        assert!(message.is_error());

        state.dispatch(AppCommand::Report(message.clone()));
        assert_eq!(state.message.as_ref(), Some(&message));

        assert_eq!(
            state.dispatch(AppCommand::DismissMessage),
            vec![AppEvent::MessageDismissed]
        );
        assert!(state.message.is_none());
        assert!(state.dispatch(AppCommand::DismissMessage).is_empty());
    }

    #[test]
    fn rejected_messages_name_the_field() {
        let error = DataError::rejected("status", "unknown status");
        assert_eq!(
            UserMessage::from_error(&error).kind,
            MessageKind::Rejected { field: "status" }
        );
    }
}
