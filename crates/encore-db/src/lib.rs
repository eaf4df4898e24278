// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod validation;

use anyhow::{Context, Result, anyhow, bail};
use encore_app::{
    Artist, ArtistFields, ArtistId, DataError, EntityKind, EventType, Inquiry, InquiryFields,
    InquiryId, InquiryStatus, Notification, NotificationId, NotificationKind, Weekday,
    complete_availability,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

pub const APP_NAME: &str = "encore";
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "artists",
        &[
            "id",
            "name",
            "bio",
            "email",
            "phone",
            "website",
            "instagram",
            "profile_photo",
            "hourly_rate_cents",
            "created_at",
            "updated_at",
        ],
    ),
    (
        "artist_event_types",
        &["artist_id", "position", "event_type"],
    ),
    ("artist_availability", &["artist_id", "weekday", "available"]),
    (
        "inquiries",
        &[
            "id",
            "client_name",
            "client_email",
            "client_phone",
            "event_type",
            "event_date",
            "message",
            "submitted_at",
            "status",
            "artist_notes",
            "updated_at",
        ],
    ),
    (
        "notifications",
        &[
            "id",
            "message",
            "kind",
            "created_at",
            "read",
            "read_at",
            "inquiry_id",
            "event_type",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_inquiries_submitted_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_inquiries_submitted_at ON inquiries (submitted_at);",
    },
    RequiredIndex {
        name: "idx_inquiries_status",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_inquiries_status ON inquiries (status);",
    },
    RequiredIndex {
        name: "idx_notifications_created_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_notifications_created_at ON notifications (created_at);",
    },
    RequiredIndex {
        name: "idx_notifications_read",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_notifications_read ON notifications (read);",
    },
    RequiredIndex {
        name: "idx_notifications_inquiry_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_notifications_inquiry_id ON notifications (inquiry_id);",
    },
];

const INQUIRY_COLUMNS: &str = "
    id, client_name, client_email, client_phone, event_type, event_date,
    message, submitted_at, status, artist_notes
";

const NOTIFICATION_COLUMNS: &str = "
    id, message, kind, created_at, read, read_at, inquiry_id, event_type
";

const DEMO_FIXTURES: &str = include_str!("fixtures/demo.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub event_type: EventType,
    pub event_date: Date,
    pub message: String,
}

impl NewInquiry {
    fn as_fields(&self) -> InquiryFields {
        InquiryFields {
            client_name: self.client_name.clone(),
            client_email: self.client_email.clone(),
            client_phone: self.client_phone.clone(),
            event_type: self.event_type.clone(),
            event_date: self.event_date,
            message: self.message.clone(),
            status: InquiryStatus::New,
            artist_notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub message: String,
    pub kind: NotificationKind,
    pub inquiry_id: Option<InquiryId>,
    pub event_type: Option<EventType>,
}

/// Row counts per table, for `--check` and seeding decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub artists: i64,
    pub inquiries: i64,
    pub notifications: i64,
    pub unread_notifications: i64,
}

impl StoreCounts {
    pub const fn is_empty(&self) -> bool {
        self.artists == 0 && self.inquiries == 0 && self.notifications == 0
    }
}

#[derive(Debug, Deserialize)]
struct DemoData {
    artists: Vec<Artist>,
    inquiries: Vec<Inquiry>,
    notifications: Vec<Notification>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        if timeout.is_zero() {
            bail!("busy timeout must be positive -- set [storage].busy_timeout to e.g. \"5s\"");
        }
        self.conn
            .busy_timeout(timeout)
            .context("set sqlite busy timeout")
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            tracing::debug!("created encore schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    pub fn counts(&self) -> Result<StoreCounts> {
        self.conn
            .query_row(
                "
                SELECT
                  (SELECT COUNT(*) FROM artists),
                  (SELECT COUNT(*) FROM inquiries),
                  (SELECT COUNT(*) FROM notifications),
                  (SELECT COUNT(*) FROM notifications WHERE read = 0)
                ",
                [],
                |row| {
                    Ok(StoreCounts {
                        artists: row.get(0)?,
                        inquiries: row.get(1)?,
                        notifications: row.get(2)?,
                        unread_notifications: row.get(3)?,
                    })
                },
            )
            .context("count rows")
    }

    /// Loads the bundled demo records. Returns false without writing when
    /// the database already holds data.
    pub fn seed_demo_data(&self) -> Result<bool> {
        if !self.counts()?.is_empty() {
            tracing::debug!("database not empty; skipping demo seed");
            return Ok(false);
        }

        let demo: DemoData =
            serde_json::from_str(DEMO_FIXTURES).context("parse bundled demo fixtures")?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin demo seed")?;
        for artist in &demo.artists {
            insert_artist(&tx, Some(artist.id), &ArtistFields::from_artist(artist))?;
        }
        for inquiry in &demo.inquiries {
            insert_inquiry_row(&tx, inquiry)?;
        }
        for notification in &demo.notifications {
            insert_notification_row(&tx, notification)?;
        }
        tx.commit().context("commit demo seed")?;

        tracing::debug!(
            artists = demo.artists.len(),
            inquiries = demo.inquiries.len(),
            notifications = demo.notifications.len(),
            "seeded demo data"
        );
        Ok(true)
    }

    pub fn create_inquiry(&self, new_inquiry: &NewInquiry) -> Result<InquiryId> {
        create_inquiry_row(&self.conn, new_inquiry)
    }

    /// Stores a new inquiry and its "New inquiry" notification in one
    /// transaction.
    pub fn record_inquiry(&self, new_inquiry: &NewInquiry) -> Result<Inquiry> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin inquiry insert")?;
        let id = create_inquiry_row(&tx, new_inquiry)?;
        create_notification_row(
            &tx,
            &NewNotification {
                message: format!("New inquiry from {}", new_inquiry.client_name),
                kind: NotificationKind::NewInquiry,
                inquiry_id: Some(id),
                event_type: Some(new_inquiry.event_type.clone()),
            },
        )?;
        tx.commit().context("commit inquiry insert")?;
        tracing::debug!(inquiry = id.get(), "recorded inquiry");
        self.get_inquiry(id)
    }

    /// Inserts a complete record, keeping its id and timestamps.
    pub fn import_inquiry(&self, inquiry: &Inquiry) -> Result<InquiryId> {
        insert_inquiry_row(&self.conn, inquiry)
    }

    pub fn get_inquiry(&self, inquiry_id: InquiryId) -> Result<Inquiry> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = ?"),
                params![inquiry_id.get()],
                inquiry_from_row,
            )
            .optional()
            .with_context(|| format!("load inquiry {}", inquiry_id.get()))?;
        found.ok_or_else(|| DataError::not_found(EntityKind::Inquiry, inquiry_id.get()).into())
    }

    /// Newest submission first; ties go to the higher id.
    pub fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.query_inquiries(
            &format!(
                "SELECT {INQUIRY_COLUMNS} FROM inquiries ORDER BY submitted_at DESC, id DESC"
            ),
            [],
        )
    }

    pub fn list_inquiries_by_status(&self, status: InquiryStatus) -> Result<Vec<Inquiry>> {
        self.query_inquiries(
            &format!(
                "
                SELECT {INQUIRY_COLUMNS} FROM inquiries
                WHERE status = ?
                ORDER BY submitted_at DESC, id DESC
                "
            ),
            [status.as_str()],
        )
    }

    /// Writes every field and returns the stored record.
    pub fn update_inquiry(&self, inquiry_id: InquiryId, fields: &InquiryFields) -> Result<Inquiry> {
        fields.validate()?;
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE inquiries
                SET
                  client_name = ?,
                  client_email = ?,
                  client_phone = ?,
                  event_type = ?,
                  event_date = ?,
                  message = ?,
                  status = ?,
                  artist_notes = ?,
                  updated_at = ?
                WHERE id = ?
                ",
                params![
                    fields.client_name,
                    fields.client_email,
                    fields.client_phone,
                    fields.event_type.label(),
                    format_date(fields.event_date),
                    fields.message,
                    fields.status.as_str(),
                    fields.artist_notes,
                    now,
                    inquiry_id.get(),
                ],
            )
            .context("update inquiry")?;
        if rows_affected == 0 {
            return Err(DataError::not_found(EntityKind::Inquiry, inquiry_id.get()).into());
        }
        tracing::debug!(
            inquiry = inquiry_id.get(),
            status = fields.status.as_str(),
            "updated inquiry"
        );
        self.get_inquiry(inquiry_id)
    }

    pub fn create_notification(&self, new_notification: &NewNotification) -> Result<NotificationId> {
        create_notification_row(&self.conn, new_notification)
    }

    pub fn import_notification(&self, notification: &Notification) -> Result<NotificationId> {
        insert_notification_row(&self.conn, notification)
    }

    pub fn get_notification(&self, notification_id: NotificationId) -> Result<Notification> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?"),
                params![notification_id.get()],
                notification_from_row,
            )
            .optional()
            .with_context(|| format!("load notification {}", notification_id.get()))?;
        found.ok_or_else(|| {
            DataError::not_found(EntityKind::Notification, notification_id.get()).into()
        })
    }

    /// Newest first.
    pub fn list_notifications(&self) -> Result<Vec<Notification>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC, id DESC"
            ))
            .context("prepare notifications query")?;
        let rows = stmt
            .query_map([], notification_from_row)
            .context("query notifications")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect notifications")
    }

    /// Sets the read flag. A notification that is already read keeps its
    /// original `read_at`.
    pub fn mark_notification_read(&self, notification_id: NotificationId) -> Result<Notification> {
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE notifications
                SET read = 1, read_at = COALESCE(read_at, ?)
                WHERE id = ?
                ",
                params![now, notification_id.get()],
            )
            .context("mark notification read")?;
        if rows_affected == 0 {
            return Err(
                DataError::not_found(EntityKind::Notification, notification_id.get()).into(),
            );
        }
        self.get_notification(notification_id)
    }

    /// Marks every unread notification read in one statement.
    pub fn mark_all_notifications_read(&self) -> Result<Vec<Notification>> {
        let now = now_rfc3339()?;
        let changed = self
            .conn
            .execute(
                "UPDATE notifications SET read = 1, read_at = ? WHERE read = 0",
                params![now],
            )
            .context("mark all notifications read")?;
        tracing::debug!(changed, "marked notifications read");
        self.list_notifications()
    }

    pub fn create_artist(&self, fields: &ArtistFields) -> Result<ArtistId> {
        fields.validate()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin artist insert")?;
        let artist_id = insert_artist(&tx, None, fields)?;
        tx.commit().context("commit artist insert")?;
        Ok(artist_id)
    }

    pub fn get_artist(&self, artist_id: ArtistId) -> Result<Artist> {
        let found = self
            .conn
            .query_row(
                "
                SELECT
                  id, name, bio, email, phone, website, instagram,
                  profile_photo, hourly_rate_cents
                FROM artists
                WHERE id = ?
                ",
                params![artist_id.get()],
                |row| {
                    Ok(Artist {
                        id: ArtistId::new(row.get(0)?),
                        name: row.get(1)?,
                        bio: row.get(2)?,
                        email: row.get(3)?,
                        phone: row.get(4)?,
                        website: row.get(5)?,
                        instagram: row.get(6)?,
                        profile_photo: row.get(7)?,
                        event_types: Vec::new(),
                        availability: Default::default(),
                        hourly_rate_cents: row.get(8)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("load artist {}", artist_id.get()))?;
        let Some(mut artist) = found else {
            return Err(DataError::not_found(EntityKind::Artist, artist_id.get()).into());
        };

        artist.event_types = self.artist_event_types(artist_id)?;
        artist.availability = complete_availability(self.artist_availability(artist_id)?);
        Ok(artist)
    }

    pub fn update_artist(&self, artist_id: ArtistId, fields: &ArtistFields) -> Result<Artist> {
        fields.validate()?;
        let now = now_rfc3339()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin artist update")?;
        let rows_affected = tx
            .execute(
                "
                UPDATE artists
                SET
                  name = ?,
                  bio = ?,
                  email = ?,
                  phone = ?,
                  website = ?,
                  instagram = ?,
                  profile_photo = ?,
                  hourly_rate_cents = ?,
                  updated_at = ?
                WHERE id = ?
                ",
                params![
                    fields.name,
                    fields.bio,
                    fields.email,
                    fields.phone,
                    fields.website,
                    fields.instagram,
                    fields.profile_photo,
                    fields.hourly_rate_cents,
                    now,
                    artist_id.get(),
                ],
            )
            .context("update artist")?;
        if rows_affected == 0 {
            return Err(DataError::not_found(EntityKind::Artist, artist_id.get()).into());
        }
        replace_artist_details(&tx, artist_id, fields)?;
        tx.commit().context("commit artist update")?;

        tracing::debug!(artist = artist_id.get(), "updated artist profile");
        self.get_artist(artist_id)
    }

    fn artist_event_types(&self, artist_id: ArtistId) -> Result<Vec<EventType>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT event_type FROM artist_event_types
                WHERE artist_id = ?
                ORDER BY position ASC
                ",
            )
            .context("prepare artist event types query")?;
        let rows = stmt
            .query_map(params![artist_id.get()], |row| {
                let raw: String = row.get(0)?;
                Ok(EventType::parse(&raw))
            })
            .context("query artist event types")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect artist event types")
    }

    fn artist_availability(&self, artist_id: ArtistId) -> Result<encore_app::Availability> {
        let mut stmt = self
            .conn
            .prepare("SELECT weekday, available FROM artist_availability WHERE artist_id = ?")
            .context("prepare artist availability query")?;
        let rows = stmt
            .query_map(params![artist_id.get()], |row| {
                let raw: String = row.get(0)?;
                let weekday = Weekday::parse(&raw)
                    .ok_or_else(|| invalid_column(0, format!("unknown weekday {raw}")))?;
                Ok((weekday, row.get::<_, bool>(1)?))
            })
            .context("query artist availability")?;
        rows.collect::<rusqlite::Result<_>>()
            .context("collect artist availability")
    }

    fn query_inquiries<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Inquiry>> {
        let mut stmt = self.conn.prepare(sql).context("prepare inquiries query")?;
        let rows = stmt
            .query_map(params, inquiry_from_row)
            .context("query inquiries")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect inquiries")
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("ENCORE_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set ENCORE_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("encore.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn create_inquiry_row(conn: &Connection, new_inquiry: &NewInquiry) -> Result<InquiryId> {
    new_inquiry.as_fields().validate()?;
    let now = now_rfc3339()?;
    conn.execute(
        "
        INSERT INTO inquiries (
          client_name, client_email, client_phone, event_type, event_date,
          message, submitted_at, status, artist_notes, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?)
        ",
        params![
            new_inquiry.client_name,
            new_inquiry.client_email,
            new_inquiry.client_phone,
            new_inquiry.event_type.label(),
            format_date(new_inquiry.event_date),
            new_inquiry.message,
            now,
            InquiryStatus::New.as_str(),
            now,
        ],
    )
    .context("insert inquiry")?;

    Ok(InquiryId::new(conn.last_insert_rowid()))
}

fn create_notification_row(
    conn: &Connection,
    new_notification: &NewNotification,
) -> Result<NotificationId> {
    let now = now_rfc3339()?;
    conn.execute(
        "
        INSERT INTO notifications (
          message, kind, created_at, read, read_at, inquiry_id, event_type
        ) VALUES (?, ?, ?, 0, NULL, ?, ?)
        ",
        params![
            new_notification.message,
            new_notification.kind.as_str(),
            now,
            new_notification.inquiry_id.map(InquiryId::get),
            new_notification.event_type.as_ref().map(EventType::label),
        ],
    )
    .context("insert notification")?;

    Ok(NotificationId::new(conn.last_insert_rowid()))
}

/// Imported rows pass the same checks as updates, so every stored inquiry
/// can later change status.
fn insert_inquiry_row(conn: &Connection, inquiry: &Inquiry) -> Result<InquiryId> {
    InquiryFields::from_inquiry(inquiry).validate()?;
    let submitted_at = format_datetime(inquiry.submitted_at)?;
    conn.execute(
        "
        INSERT INTO inquiries (
          id, client_name, client_email, client_phone, event_type, event_date,
          message, submitted_at, status, artist_notes, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
        params![
            inquiry.id.get(),
            inquiry.client_name,
            inquiry.client_email,
            inquiry.client_phone,
            inquiry.event_type.label(),
            format_date(inquiry.event_date),
            inquiry.message,
            submitted_at,
            inquiry.status.as_str(),
            inquiry.artist_notes,
            submitted_at,
        ],
    )
    .with_context(|| format!("insert inquiry {}", inquiry.id.get()))?;
    Ok(inquiry.id)
}

fn insert_notification_row(conn: &Connection, notification: &Notification) -> Result<NotificationId> {
    let read_at = notification.read_at.map(format_datetime).transpose()?;
    conn.execute(
        "
        INSERT INTO notifications (
          id, message, kind, created_at, read, read_at, inquiry_id, event_type
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ",
        params![
            notification.id.get(),
            notification.message,
            notification.kind.as_str(),
            format_datetime(notification.created_at)?,
            notification.read,
            read_at,
            notification.inquiry_id.map(InquiryId::get),
            notification.event_type.as_ref().map(EventType::label),
        ],
    )
    .with_context(|| format!("insert notification {}", notification.id.get()))?;
    Ok(notification.id)
}

fn insert_artist(
    conn: &Connection,
    artist_id: Option<ArtistId>,
    fields: &ArtistFields,
) -> Result<ArtistId> {
    let now = now_rfc3339()?;
    conn.execute(
        "
        INSERT INTO artists (
          id, name, bio, email, phone, website, instagram,
          profile_photo, hourly_rate_cents, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
        params![
            artist_id.map(ArtistId::get),
            fields.name,
            fields.bio,
            fields.email,
            fields.phone,
            fields.website,
            fields.instagram,
            fields.profile_photo,
            fields.hourly_rate_cents,
            now,
            now,
        ],
    )
    .context("insert artist")?;
    let artist_id = ArtistId::new(conn.last_insert_rowid());
    replace_artist_details(conn, artist_id, fields)?;
    Ok(artist_id)
}

fn replace_artist_details(conn: &Connection, artist_id: ArtistId, fields: &ArtistFields) -> Result<()> {
    conn.execute(
        "DELETE FROM artist_event_types WHERE artist_id = ?",
        params![artist_id.get()],
    )
    .context("clear artist event types")?;
    for (position, event_type) in fields.event_types.iter().enumerate() {
        conn.execute(
            "INSERT INTO artist_event_types (artist_id, position, event_type) VALUES (?, ?, ?)",
            params![artist_id.get(), position as i64, event_type.label()],
        )
        .with_context(|| format!("insert artist event type {event_type}"))?;
    }

    conn.execute(
        "DELETE FROM artist_availability WHERE artist_id = ?",
        params![artist_id.get()],
    )
    .context("clear artist availability")?;
    for (weekday, available) in complete_availability(fields.availability.clone()) {
        conn.execute(
            "INSERT INTO artist_availability (artist_id, weekday, available) VALUES (?, ?, ?)",
            params![artist_id.get(), weekday.as_str(), available],
        )
        .with_context(|| format!("insert availability for {}", weekday.label()))?;
    }
    Ok(())
}

fn inquiry_from_row(row: &Row<'_>) -> rusqlite::Result<Inquiry> {
    let event_type_raw: String = row.get(4)?;
    let event_date_raw: String = row.get(5)?;
    let submitted_at_raw: String = row.get(7)?;
    let status_raw: String = row.get(8)?;
    let status = InquiryStatus::parse(&status_raw)
        .ok_or_else(|| invalid_column(8, format!("unknown inquiry status {status_raw}")))?;

    Ok(Inquiry {
        id: InquiryId::new(row.get(0)?),
        client_name: row.get(1)?,
        client_email: row.get(2)?,
        client_phone: row.get(3)?,
        event_type: EventType::parse(&event_type_raw),
        event_date: parse_date(&event_date_raw).map_err(to_sql_error)?,
        message: row.get(6)?,
        submitted_at: parse_datetime(&submitted_at_raw).map_err(to_sql_error)?,
        status,
        artist_notes: row.get(9)?,
    })
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let kind_raw: String = row.get(2)?;
    let kind = NotificationKind::parse(&kind_raw)
        .ok_or_else(|| invalid_column(2, format!("unknown notification kind {kind_raw}")))?;
    let created_at_raw: String = row.get(3)?;
    let read_at_raw: Option<String> = row.get(5)?;
    let event_type_raw: Option<String> = row.get(7)?;

    Ok(Notification {
        id: NotificationId::new(row.get(0)?),
        message: row.get(1)?,
        kind,
        created_at: parse_datetime(&created_at_raw).map_err(to_sql_error)?,
        read: row.get(4)?,
        read_at: parse_opt_datetime(read_at_raw).map_err(to_sql_error)?,
        inquiry_id: row.get::<_, Option<i64>>(6)?.map(InquiryId::new),
        event_type: event_type_raw.as_deref().map(EventType::parse),
    })
}

fn invalid_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use an encore database or point [storage].db_path at a new file"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; run migration before launching",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        ",
    )
    .context("configure sqlite pragmas")?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)
        .context("set sqlite busy timeout")
}

fn now_rfc3339() -> Result<String> {
    format_datetime(OffsetDateTime::now_utc())
}

/// Fixed-width UTC text, so `ORDER BY` on the column is time order.
fn format_datetime(value: OffsetDateTime) -> Result<String> {
    value
        .to_offset(UtcOffset::UTC)
        .format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
        ))
        .context("format timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn parse_date(raw: &str) -> Result<Date> {
    if let Ok(value) = Date::parse(raw, &format_description!("[year]-[month]-[day]")) {
        return Ok(value);
    }

    // Some writers store event dates as full timestamps.
    let date_time = parse_datetime(raw)?;
    Ok(date_time.date())
}

fn parse_opt_datetime(raw: Option<String>) -> Result<Option<OffsetDateTime>> {
    raw.as_deref().map(parse_datetime).transpose()
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_owned())
}
