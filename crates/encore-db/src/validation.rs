// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use encore_app::{EventType, Weekday};
use thiserror::Error;
use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid money value")]
    InvalidMoney,
    #[error("negative money value")]
    NegativeMoney,
    #[error("invalid date value; expected {DATE_LAYOUT}")]
    InvalidDate,
    #[error("invalid weekday")]
    InvalidWeekday,
    #[error("invalid availability; expected DAY=yes or DAY=no")]
    InvalidAvailability,
    #[error("invalid event type")]
    InvalidEventType,
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn parse_required_cents(input: &str) -> ValidationResult<i64> {
    parse_cents(input.trim())
}

pub fn format_cents(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    let dollars = cents / 100;
    let remainder = cents % 100;
    format!("{sign}${}.{:02}", comma_format(dollars), remainder)
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    parse_date(input.trim())
}

/// Parses `DAY=yes|no` as typed on the command line.
pub fn parse_availability(input: &str) -> ValidationResult<(Weekday, bool)> {
    let (day, flag) = input
        .split_once('=')
        .ok_or(ValidationError::InvalidAvailability)?;
    let weekday = Weekday::parse(day).ok_or(ValidationError::InvalidWeekday)?;
    let available = match flag.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => true,
        "no" | "n" | "false" | "off" => false,
        _ => return Err(ValidationError::InvalidAvailability),
    };
    Ok((weekday, available))
}

pub fn parse_event_type(input: &str) -> ValidationResult<EventType> {
    if input.trim().is_empty() {
        return Err(ValidationError::InvalidEventType);
    }
    Ok(EventType::parse(input))
}

fn parse_cents(input: &str) -> ValidationResult<i64> {
    let clean = input.replace(',', "");
    if clean.starts_with('-') {
        return Err(ValidationError::NegativeMoney);
    }

    let clean = clean.strip_prefix('$').unwrap_or(&clean);
    if clean.is_empty() {
        return Err(ValidationError::InvalidMoney);
    }

    let parts = clean.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(ValidationError::InvalidMoney);
    }

    let whole = parse_digits(parts[0], true)?;
    if whole > i64::MAX / 100 {
        return Err(ValidationError::InvalidMoney);
    }

    let mut frac = 0i64;
    if parts.len() == 2 {
        if parts[1].len() > 2 {
            return Err(ValidationError::InvalidMoney);
        }
        frac = parse_digits(parts[1], false)?;
        if parts[1].len() == 1 {
            frac = frac.checked_mul(10).ok_or(ValidationError::InvalidMoney)?;
        }
    }

    whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .ok_or(ValidationError::InvalidMoney)
}

fn parse_digits(input: &str, allow_empty: bool) -> ValidationResult<i64> {
    if input.is_empty() {
        if allow_empty {
            return Ok(0);
        }
        return Err(ValidationError::InvalidMoney);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoney);
    }
    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMoney)
}

fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().rev().enumerate() {
        if index > 0 && index % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
