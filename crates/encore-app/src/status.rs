// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{BookingRuntime, DataResult, Inquiry, InquiryFields, InquiryStatus, parse_status};

/// Persists `status` for `inquiry` and, once the store accepts it, replaces
/// the local copy with the stored record. Nothing changes locally on error.
///
/// Any status may follow any other; the four values are a label, not a
/// state machine.
pub fn set_status<R>(runtime: &mut R, inquiry: &mut Inquiry, status: InquiryStatus) -> DataResult<()>
where
    R: BookingRuntime + ?Sized,
{
    let fields = InquiryFields::from_inquiry(inquiry).with_status(status);
    fields.validate()?;
    let stored = runtime.update_inquiry(inquiry.id, &fields)?;
    tracing::debug!(
        inquiry = inquiry.id.get(),
        from = inquiry.status.as_str(),
        to = stored.status.as_str(),
        "inquiry status updated"
    );
    *inquiry = stored;
    Ok(())
}

/// Like [`set_status`] for a status that has not been parsed yet. Unknown
/// values are rejected before the store is called.
pub fn set_status_str<R>(runtime: &mut R, inquiry: &mut Inquiry, raw: &str) -> DataResult<()>
where
    R: BookingRuntime + ?Sized,
{
    let status = parse_status(raw)?;
    set_status(runtime, inquiry, status)
}

/// Swaps `updated` into `inquiries` by id. Returns false when the list does
/// not hold that record.
pub fn replace_inquiry(inquiries: &mut [Inquiry], updated: &Inquiry) -> bool {
    match inquiries.iter_mut().find(|inquiry| inquiry.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{replace_inquiry, set_status, set_status_str};
    use crate::fake::FakeRuntime;
    use crate::{BookingRuntime, InquiryId, InquiryStatus};
    use anyhow::Result;

    #[test]
    fn set_status_replaces_local_copy_with_stored_record() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut inquiry = runtime.get_inquiry(InquiryId::new(1))?;

        set_status(&mut runtime, &mut inquiry, InquiryStatus::Confirmed)?;

        assert_eq!(inquiry.status, InquiryStatus::Confirmed);
        assert_eq!(runtime.inquiries[0].status, InquiryStatus::Confirmed);
        assert_eq!(inquiry, runtime.inquiries[0]);
        Ok(())
    }

    #[test]
    fn any_status_can_follow_any_other() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut inquiry = runtime.get_inquiry(InquiryId::new(3))?;

        for status in [
            InquiryStatus::Confirmed,
            InquiryStatus::New,
            InquiryStatus::Responded,
            InquiryStatus::Seen,
            InquiryStatus::New,
        ] {
            set_status(&mut runtime, &mut inquiry, status)?;
            assert_eq!(inquiry.status, status);
        }
        Ok(())
    }

    #[test]
    fn store_failure_leaves_local_copy_untouched() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut inquiry = runtime.get_inquiry(InquiryId::new(2))?;
        let before = inquiry.clone();
        runtime.fail_writes = true;

        let error = set_status(&mut runtime, &mut inquiry, InquiryStatus::Confirmed)
            .expect_err("offline store should fail");

        assert!(error.to_string().contains("store offline"));
        assert_eq!(inquiry, before);
        Ok(())
    }

    #[test]
    fn unknown_status_string_is_rejected_without_store_call() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut inquiry = runtime.get_inquiry(InquiryId::new(1))?;
        let before = inquiry.clone();
        let calls = runtime.calls;

        let error = set_status_str(&mut runtime, &mut inquiry, "archived")
            .expect_err("unknown status should be rejected");

        assert_eq!(error.rejected_field(), Some("status"));
        assert_eq!(runtime.calls, calls);
        assert_eq!(inquiry, before);
        assert_eq!(runtime.inquiries[0].status, InquiryStatus::New);
        Ok(())
    }

    #[test]
    fn full_record_is_written_not_just_status() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut inquiry = runtime.get_inquiry(InquiryId::new(1))?;
        inquiry.artist_notes = Some("Call back Friday".to_owned());

        set_status_str(&mut runtime, &mut inquiry, "seen")?;

        assert_eq!(
            runtime.inquiries[0].artist_notes.as_deref(),
            Some("Call back Friday")
        );
        Ok(())
    }

    #[test]
    fn replace_inquiry_swaps_by_id() -> Result<()> {
        let mut runtime = FakeRuntime::seeded();
        let mut list = runtime.list_inquiries()?;
        let mut updated = list[1].clone();
        updated.status = InquiryStatus::Confirmed;

        assert!(replace_inquiry(&mut list, &updated));
        assert_eq!(list[1].status, InquiryStatus::Confirmed);

        updated.id = InquiryId::new(99);
        assert!(!replace_inquiry(&mut list, &updated));
        Ok(())
    }
}
