// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod commands;
mod config;
mod render;
mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, Output};
use config::Config;
use encore_db::Store;
use render::Palette;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "encore",
    version,
    about = "Booking inquiries, notifications, and profile for a performing artist"
)]
struct Cli {
    /// Use a specific config path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Run against seeded demo data (in-memory)
    #[arg(long, global = true)]
    demo: bool,
    /// Print resolved config path
    #[arg(long)]
    print_config_path: bool,
    /// Print resolved database path
    #[arg(long = "print-path")]
    print_db_path: bool,
    /// Print a v1 config template
    #[arg(long = "print-example-config")]
    print_example: bool,
    /// Validate config and database, then exit
    #[arg(long = "check")]
    check_only: bool,
    /// Machine-readable output
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if cli.print_config_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if cli.print_example {
        print!("{}", Config::example_config(&config_path));
        return Ok(());
    }

    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; run `encore --print-example-config` to generate a v1 template",
            config_path.display()
        )
    })?;
    init_tracing(config.log_filter());

    let db_path = if cli.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if cli.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or ENCORE_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    store.set_busy_timeout(config.busy_timeout()?)?;
    if cli.demo {
        store.seed_demo_data()?;
    }
    if cli.check_only {
        let counts = store.counts()?;
        tracing::debug!(
            db_path = %db_path.display(),
            inquiries = counts.inquiries,
            notifications = counts.notifications,
            "startup check passed"
        );
        return Ok(());
    }

    let output = Output {
        json: cli.json,
        palette: Palette::new(config.color() && !cli.json),
    };
    let command = cli.command.unwrap_or_default();
    print!(
        "{}",
        commands::execute(&command, &store, config.artist_id(), output)?
    );
    Ok(())
}

/// `RUST_LOG` wins over the config filter.
fn init_tracing(config_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use crate::commands::{Command, InquiryCommand, NotificationCommand, ProfileCommand};
    use anyhow::Result;
    use clap::{CommandFactory, Parser};
    use encore_app::{EventType, InquiryStatus, Weekday};
    use std::path::PathBuf;
    use time::macros::date;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_defaults_to_inquiry_list() -> Result<()> {
        let cli = Cli::try_parse_from(["encore"])?;
        assert_eq!(cli.config, None);
        assert!(!cli.demo && !cli.json && !cli.check_only);
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
        Ok(())
    }

    #[test]
    fn global_flags_parse_after_subcommand() -> Result<()> {
        let cli = Cli::try_parse_from([
            "encore",
            "notifications",
            "list",
            "--unread",
            "--json",
            "--config",
            "/custom/config.toml",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(
            cli.command,
            Some(Command::Notifications(NotificationCommand::List {
                unread: true
            }))
        );
        Ok(())
    }

    #[test]
    fn print_and_check_flags() -> Result<()> {
        let cli = Cli::try_parse_from([
            "encore",
            "--print-config-path",
            "--print-example-config",
            "--check",
        ])?;
        assert!(cli.print_config_path);
        assert!(cli.print_example);
        assert!(cli.check_only);
        assert!(!cli.print_db_path);

        let cli = Cli::try_parse_from(["encore", "--demo", "--print-path"])?;
        assert!(cli.demo);
        assert!(cli.print_db_path);
        Ok(())
    }

    #[test]
    fn list_filters_parse_into_typed_values() -> Result<()> {
        let cli = Cli::try_parse_from([
            "encore",
            "inquiries",
            "list",
            "--search",
            "vineyard",
            "--status",
            "new",
            "--status",
            "confirmed",
            "--event-type",
            "wedding",
            "--from",
            "2026-03-01",
        ])?;
        let Some(Command::Inquiries(InquiryCommand::List(args))) = cli.command else {
            anyhow::bail!("expected inquiries list");
        };
        assert_eq!(args.search.as_deref(), Some("vineyard"));
        assert_eq!(
            args.statuses,
            vec![InquiryStatus::New, InquiryStatus::Confirmed]
        );
        assert_eq!(args.event_types, vec![EventType::Wedding]);
        assert_eq!(args.from, Some(date!(2026 - 03 - 01)));
        assert_eq!(args.to, None);
        Ok(())
    }

    #[test]
    fn bad_filter_values_are_usage_errors() {
        let error = Cli::try_parse_from(["encore", "inquiries", "list", "--status", "archived"])
            .expect_err("unknown status should fail");
        assert!(error.to_string().contains("archived"));

        let error = Cli::try_parse_from(["encore", "inquiries", "list", "--from", "03/01/2026"])
            .expect_err("bad date should fail");
        assert!(error.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn set_status_keeps_raw_value_for_validation() -> Result<()> {
        let cli = Cli::try_parse_from(["encore", "inquiries", "set-status", "4", "Booked"])?;
        assert_eq!(
            cli.command,
            Some(Command::Inquiries(InquiryCommand::SetStatus {
                id: 4,
                status: "Booked".to_owned(),
            }))
        );
        Ok(())
    }

    #[test]
    fn profile_edit_collects_availability_and_rate() -> Result<()> {
        let cli = Cli::try_parse_from([
            "encore",
            "profile",
            "edit",
            "--rate",
            "$300",
            "--available",
            "sun=yes",
            "--available",
            "wed=no",
        ])?;
        let Some(Command::Profile(ProfileCommand::Edit(args))) = cli.command else {
            anyhow::bail!("expected profile edit");
        };
        assert_eq!(args.rate, Some(30_000));
        assert_eq!(
            args.availability,
            vec![(Weekday::Sunday, true), (Weekday::Wednesday, false)]
        );
        assert_eq!(args.name, None);
        Ok(())
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let error = Cli::try_parse_from(["encore", "--wat"]).expect_err("unknown arg should fail");
        assert!(error.to_string().contains("--wat"));
    }
}
