//! Course session status and meeting-type validation.
//!
//! Status transitions are deliberately unrestricted: the status endpoint
//! only checks that the value is one of the known states, so any-to-any
//! transitions (e.g. `done` back to `scheduled`) are allowed.

use crate::error::CoreError;

pub const SESSION_SCHEDULED: &str = "scheduled";
pub const SESSION_FULL: &str = "full";
pub const SESSION_CANCELLED: &str = "cancelled";
pub const SESSION_DONE: &str = "done";

pub const MEETING_GOOGLE_MEET: &str = "google-meet";
pub const MEETING_ZOOM: &str = "zoom";
pub const MEETING_OFFLINE: &str = "offline";

/// Default capacity applied when a session is created without one.
pub const DEFAULT_SESSION_CAPACITY: i32 = 10;

const VALID_STATUSES: &[&str] = &[
    SESSION_SCHEDULED,
    SESSION_FULL,
    SESSION_CANCELLED,
    SESSION_DONE,
];

const VALID_MEETING_TYPES: &[&str] = &[MEETING_GOOGLE_MEET, MEETING_ZOOM, MEETING_OFFLINE];

pub fn validate_session_status(value: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid session status '{value}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_meeting_type(value: &str) -> Result<(), CoreError> {
    if VALID_MEETING_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid meeting_type '{value}'. Must be one of: {VALID_MEETING_TYPES:?}"
        )))
    }
}
