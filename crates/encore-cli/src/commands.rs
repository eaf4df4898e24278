// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use encore_app::{
    AppState, ArtistFields, ArtistId, DateRange, EventType, InquiryFilter, InquiryId,
    InquiryStatus, NotificationId, Session, Weekday, parse_status,
};
use encore_db::validation::{
    parse_availability, parse_event_type, parse_required_cents, parse_required_date,
};
use encore_db::{NewInquiry, Store};
use serde::Serialize;
use time::Date;

use crate::render::{self, Palette};
use crate::runtime::DbRuntime;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Browse and update booking inquiries
    #[command(subcommand, alias = "i")]
    Inquiries(InquiryCommand),
    /// Review notifications
    #[command(subcommand, alias = "n")]
    Notifications(NotificationCommand),
    /// View or edit the artist profile
    #[command(subcommand, alias = "p")]
    Profile(ProfileCommand),
    /// Load demo data into an empty database
    Seed,
}

impl Default for Command {
    fn default() -> Self {
        Self::Inquiries(InquiryCommand::List(ListArgs::default()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum InquiryCommand {
    /// List inquiries, newest first
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show one inquiry
    Show { id: i64 },
    /// Change an inquiry's status (new, seen, responded, confirmed)
    SetStatus { id: i64, status: String },
    /// Record an inquiry received outside the app
    New(NewInquiryArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListArgs {
    /// Case-insensitive match on client name, event type, or message
    #[arg(long, short)]
    pub search: Option<String>,
    /// Only show these statuses (repeatable)
    #[arg(long = "status", value_parser = parse_status)]
    pub statuses: Vec<InquiryStatus>,
    /// Only show these event types (repeatable)
    #[arg(long = "event-type", value_parser = parse_event_type)]
    pub event_types: Vec<EventType>,
    /// Earliest event date, YYYY-MM-DD
    #[arg(long, value_parser = parse_required_date)]
    pub from: Option<Date>,
    /// Latest event date, YYYY-MM-DD
    #[arg(long, value_parser = parse_required_date)]
    pub to: Option<Date>,
}

impl ListArgs {
    fn filter(&self) -> InquiryFilter {
        let event_dates = if self.from.is_some() || self.to.is_some() {
            Some(DateRange {
                from: self.from,
                to: self.to,
            })
        } else {
            None
        };
        InquiryFilter {
            statuses: self.statuses.iter().copied().collect(),
            event_types: self.event_types.iter().cloned().collect(),
            event_dates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct NewInquiryArgs {
    #[arg(long = "client")]
    pub client_name: String,
    #[arg(long = "email", default_value = "")]
    pub client_email: String,
    #[arg(long = "phone", default_value = "")]
    pub client_phone: String,
    #[arg(long, value_parser = parse_event_type)]
    pub event_type: EventType,
    /// YYYY-MM-DD
    #[arg(long, value_parser = parse_required_date)]
    pub event_date: Date,
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum NotificationCommand {
    /// List notifications, newest first
    #[command(alias = "ls")]
    List {
        /// Hide notifications already read
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    Read { id: i64 },
    /// Mark every notification read
    ReadAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Change profile fields; anything omitted keeps its value
    Edit(ProfileEditArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ProfileEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub instagram: Option<String>,
    /// Hourly rate in dollars, e.g. 275 or $275.50
    #[arg(long, value_parser = parse_required_cents)]
    pub rate: Option<i64>,
    /// Replaces the event types offered (repeatable)
    #[arg(long = "event-type", value_parser = parse_event_type)]
    pub event_types: Vec<EventType>,
    /// DAY=yes or DAY=no (repeatable)
    #[arg(long = "available", value_parser = parse_availability)]
    pub availability: Vec<(Weekday, bool)>,
}

impl ProfileEditArgs {
    fn apply(&self, fields: &mut ArtistFields) {
        let text_fields = [
            (&self.name, &mut fields.name),
            (&self.bio, &mut fields.bio),
            (&self.email, &mut fields.email),
            (&self.phone, &mut fields.phone),
            (&self.website, &mut fields.website),
            (&self.instagram, &mut fields.instagram),
        ];
        for (value, target) in text_fields {
            if let Some(value) = value {
                *target = value.trim().to_owned();
            }
        }
        if let Some(rate) = self.rate {
            fields.hourly_rate_cents = rate;
        }
        if !self.event_types.is_empty() {
            fields.event_types = self.event_types.clone();
        }
        for (day, available) in &self.availability {
            fields.availability.insert(*day, *available);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub palette: Palette,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(self, value: &T, text: impl FnOnce() -> String) -> Result<String> {
        if self.json {
            let mut out = serde_json::to_string_pretty(value).context("encode JSON output")?;
            out.push('\n');
            Ok(out)
        } else {
            Ok(text())
        }
    }
}

/// Runs one command against `store` and returns what to print.
pub fn execute(command: &Command, store: &Store, artist_id: ArtistId, output: Output) -> Result<String> {
    match command {
        Command::Inquiries(command) => inquiries(command, store, artist_id, output),
        Command::Notifications(command) => notifications(command, store, artist_id, output),
        Command::Profile(command) => profile(command, store, artist_id, output),
        Command::Seed => seed(store, output),
    }
}

fn inquiries(
    command: &InquiryCommand,
    store: &Store,
    artist_id: ArtistId,
    output: Output,
) -> Result<String> {
    let mut runtime = DbRuntime::new(store);
    let mut session = Session::new(&mut runtime, artist_id);
    match command {
        InquiryCommand::List(args) => {
            session.open_inquiries();
            fail_on_error(&session.state)?;
            if let Some(search) = &args.search {
                session.set_search(search.as_str());
            }
            session.apply_filter(args.filter());
            let visible = session.visible_inquiries();
            output.emit(&visible, || {
                render::inquiry_list(
                    &visible,
                    session.list_outcome(),
                    session.filter(),
                    output.palette,
                )
            })
        }
        InquiryCommand::Show { id } => {
            session.open_inquiry(InquiryId::new(*id));
            fail_on_error(&session.state)?;
            let Some(inquiry) = session.detail() else {
                bail!("inquiry {id} did not load; retry the command");
            };
            output.emit(inquiry, || render::inquiry_detail(inquiry, output.palette))
        }
        InquiryCommand::SetStatus { id, status } => {
            session.open_inquiry(InquiryId::new(*id));
            fail_on_error(&session.state)?;
            session.set_status_str(status);
            fail_on_error(&session.state)?;
            let Some(inquiry) = session.detail() else {
                bail!("inquiry {id} did not load; retry the command");
            };
            output.emit(inquiry, || {
                let mut out = String::new();
                if let Some(message) = &session.state.message {
                    out.push_str(&render::message(message, output.palette));
                    out.push('\n');
                }
                out.push_str(&render::inquiry_detail(inquiry, output.palette));
                out
            })
        }
        InquiryCommand::New(args) => new_inquiry(args, store, output),
    }
}

fn new_inquiry(args: &NewInquiryArgs, store: &Store, output: Output) -> Result<String> {
    let inquiry = store.record_inquiry(&NewInquiry {
        client_name: args.client_name.trim().to_owned(),
        client_email: args.client_email.trim().to_owned(),
        client_phone: args.client_phone.trim().to_owned(),
        event_type: args.event_type.clone(),
        event_date: args.event_date,
        message: args.message.trim().to_owned(),
    })?;
    output.emit(&inquiry, || render::inquiry_detail(&inquiry, output.palette))
}

fn notifications(
    command: &NotificationCommand,
    store: &Store,
    artist_id: ArtistId,
    output: Output,
) -> Result<String> {
    let mut runtime = DbRuntime::new(store);
    let mut session = Session::new(&mut runtime, artist_id);
    session.open_notifications();
    fail_on_error(&session.state)?;

    match command {
        NotificationCommand::List { unread } => {
            let tracker = session.notifications();
            let items = tracker
                .items()
                .iter()
                .filter(|item| !*unread || !item.read)
                .collect::<Vec<_>>();
            output.emit(&items, || {
                render::notification_list(&items, tracker.unread_count(), output.palette)
            })
        }
        NotificationCommand::Read { id } => {
            let id = NotificationId::new(*id);
            session.mark_read(id);
            fail_on_error(&session.state)?;
            let Some(item) = session.notifications().get(id) else {
                bail!("notification {id} did not load; retry the command");
            };
            output.emit(item, || format!("Marked notification {id} read\n"))
        }
        NotificationCommand::ReadAll => {
            let before = session.notifications().unread_count();
            session.mark_all_read();
            fail_on_error(&session.state)?;
            let items = session.notifications().items();
            output.emit(items, || match before {
                0 => "No unread notifications\n".to_owned(),
                1 => "Marked 1 notification read\n".to_owned(),
                count => format!("Marked {count} notifications read\n"),
            })
        }
    }
}

fn profile(
    command: &ProfileCommand,
    store: &Store,
    artist_id: ArtistId,
    output: Output,
) -> Result<String> {
    let mut runtime = DbRuntime::new(store);
    let mut session = Session::new(&mut runtime, artist_id);
    session.open_profile();
    fail_on_error(&session.state)?;

    if let ProfileCommand::Edit(args) = command {
        let Some(current) = session.profile() else {
            bail!("artist {artist_id} did not load; check [profile].artist_id");
        };
        let mut fields = ArtistFields::from_artist(current);
        args.apply(&mut fields);
        session.save_profile(fields);
        fail_on_error(&session.state)?;
    }

    let Some(artist) = session.profile() else {
        bail!("artist {artist_id} did not load; check [profile].artist_id");
    };
    output.emit(artist, || render::profile(artist, output.palette))
}

#[derive(Debug, Serialize)]
struct SeedReport {
    seeded: bool,
    artists: i64,
    inquiries: i64,
    notifications: i64,
}

fn seed(store: &Store, output: Output) -> Result<String> {
    let seeded = store.seed_demo_data()?;
    let counts = store.counts()?;
    let report = SeedReport {
        seeded,
        artists: counts.artists,
        inquiries: counts.inquiries,
        notifications: counts.notifications,
    };
    output.emit(&report, || {
        if seeded {
            format!(
                "Loaded demo data: {} inquiries, {} notifications\n",
                counts.inquiries, counts.notifications
            )
        } else {
            "Database already has data; nothing seeded\n".to_owned()
        }
    })
}

/// Surfaces a session error as the command's failure.
fn fail_on_error(state: &AppState) -> Result<()> {
    match &state.message {
        Some(message) if message.is_error() => bail!("{}", message.text),
        _ => Ok(()),
    }
}
