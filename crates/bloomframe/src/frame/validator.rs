//! Inbound frame envelope validation.
//!
//! Accepts the standard frame action body:
//!
//! ```text
//! {"untrustedData": {"fid": 42, "buttonIndex": 2, "inputText": "...", "state": "..."},
//!  "trustedData": {"messageBytes": "..."}}
//! ```
//!
//! and the older shape where `trustedData` is itself a JSON-encoded string of
//! the action fields, posted either as an HTML form field
//! (`application/x-www-form-urlencoded`) or inside a JSON body. Message
//! signatures are NOT verified here.

use bloom_common::constants::limits::{MAX_BUTTONS, MAX_INPUT_CHARS};
use serde::Deserialize;
use thiserror::Error;

/// Malformed or incomplete inbound envelope
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body is empty")]
    EmptyBody,

    #[error("malformed frame envelope: {0}")]
    MalformedEnvelope(String),

    #[error("frame envelope carries no action data")]
    MissingAction,

    #[error("frame action has no viewer fid")]
    MissingViewer,

    #[error("viewer fid must be positive")]
    InvalidViewer,

    #[error("button index {0} outside 1..={MAX_BUTTONS}")]
    ButtonOutOfRange(u64),
}

/// One validated frame interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInteraction {
    pub viewer_id: u64,
    /// 1-based position of the pressed button
    pub button_index: u8,
    pub input_text: Option<String>,
    pub prior_state: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    untrusted_data: Option<ActionBody>,
    trusted_data: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionBody {
    fid: Option<u64>,
    button_index: Option<u64>,
    input_text: Option<String>,
    state: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyForm {
    trusted_data: Option<String>,
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn parse_legacy(trusted_data: &str) -> Result<ActionBody, ValidationError> {
    serde_json::from_str(trusted_data).map_err(|e| ValidationError::MalformedEnvelope(e.to_string()))
}

fn form_action(body: &[u8]) -> Result<ActionBody, ValidationError> {
    let form: LegacyForm = serde_urlencoded::from_bytes(body)
        .map_err(|e| ValidationError::MalformedEnvelope(e.to_string()))?;
    match form.trusted_data {
        Some(trusted_data) => parse_legacy(&trusted_data),
        None => Err(ValidationError::MissingAction),
    }
}

fn json_action(body: &[u8]) -> Result<ActionBody, ValidationError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedEnvelope(e.to_string()))?;

    match (envelope.untrusted_data, envelope.trusted_data) {
        (Some(action), _) => Ok(action),
        (None, Some(serde_json::Value::String(legacy))) => parse_legacy(&legacy),
        _ => Err(ValidationError::MissingAction),
    }
}

/// Extract and sanity-check an interaction from a raw request body.
///
/// `content_type` selects the form-field parse; anything else is read as JSON.
pub fn validate(content_type: Option<&str>, body: &[u8]) -> Result<FrameInteraction, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::EmptyBody);
    }

    let action = if is_form(content_type) {
        form_action(body)?
    } else {
        json_action(body)?
    };

    let viewer_id = action.fid.ok_or(ValidationError::MissingViewer)?;
    if viewer_id == 0 {
        return Err(ValidationError::InvalidViewer);
    }

    let button_index = match action.button_index {
        None => 1,
        Some(index) if (1..=MAX_BUTTONS as u64).contains(&index) => index as u8,
        Some(index) => return Err(ValidationError::ButtonOutOfRange(index)),
    };

    let input_text = action
        .input_text
        .map(|text| text.chars().take(MAX_INPUT_CHARS).collect());

    let prior_state = action.state.filter(|s| !s.trim().is_empty());

    Ok(FrameInteraction {
        viewer_id,
        button_index,
        input_text,
        prior_state,
    })
}
