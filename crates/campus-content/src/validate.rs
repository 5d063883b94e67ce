//! Boundary validation for content payloads and inquiry input.
//!
//! Runs on create and edit so that the state machine only ever sees
//! well-formed payloads; nothing downstream re-validates.

use campus_core::models::content::{ContentPayload, NoticePayload, SectionPayload};
use campus_core::models::lead::CreateLead;

use crate::config::ContentConfig;
use crate::error::ContentError;

/// Check a payload's type-specific shape.
pub fn validate_payload(
    payload: &ContentPayload,
    config: &ContentConfig,
) -> Result<(), ContentError> {
    match payload {
        ContentPayload::Section(section) => validate_section(section, config),
        ContentPayload::Notice(notice) => validate_notice(notice, config),
    }
}

fn validate_section(section: &SectionPayload, config: &ContentConfig) -> Result<(), ContentError> {
    if section.page.trim().is_empty() {
        return Err(ContentError::FieldEmpty("page"));
    }
    if section.variant.trim().is_empty() {
        return Err(ContentError::FieldEmpty("variant"));
    }
    if !section.props.is_object() {
        return Err(ContentError::PropsNotObject);
    }
    let serialized = section.props.to_string();
    if serialized.len() > config.max_props_bytes {
        return Err(ContentError::PropsTooLarge {
            max: config.max_props_bytes,
        });
    }
    Ok(())
}

fn validate_notice(notice: &NoticePayload, config: &ContentConfig) -> Result<(), ContentError> {
    if notice.title.trim().is_empty() {
        return Err(ContentError::FieldEmpty("title"));
    }
    if notice.title.chars().count() > config.max_title_len {
        return Err(ContentError::FieldTooLong {
            field: "title",
            max: config.max_title_len,
        });
    }
    if notice.body.trim().is_empty() {
        return Err(ContentError::FieldEmpty("body"));
    }
    if notice.body.chars().count() > config.max_body_len {
        return Err(ContentError::FieldTooLong {
            field: "body",
            max: config.max_body_len,
        });
    }
    if let Some(url) = &notice.attachment_url {
        if url.trim().is_empty() {
            return Err(ContentError::FieldEmpty("attachment_url"));
        }
    }
    Ok(())
}

/// Check an inquiry form submission.
pub fn validate_lead(input: &CreateLead, config: &ContentConfig) -> Result<(), ContentError> {
    if input.name.trim().is_empty() {
        return Err(ContentError::FieldEmpty("name"));
    }
    if !is_plausible_email(&input.email) {
        return Err(ContentError::InvalidEmail);
    }
    if input.message.trim().is_empty() {
        return Err(ContentError::FieldEmpty("message"));
    }
    if input.message.chars().count() > config.max_message_len {
        return Err(ContentError::FieldTooLong {
            field: "message",
            max: config.max_message_len,
        });
    }
    Ok(())
}

/// Minimal structural check; deliverability is not our problem.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
