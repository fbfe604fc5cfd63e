//! State token codec.
//!
//! Token format: base64url(JSON) without padding. The JSON object is the
//! navigation state in camelCase plus a version tag `v`:
//!
//! ```text
//! {"v":1,"viewerId":42,"screen":"challenges-browse","cursorIndex":0}
//! ```
//!
//! Decoding never panics; any structural problem is a [`DecodeFailure`]
//! which callers answer by starting a fresh session.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bloom_common::constants::{STATE_TOKEN_VERSION, limits::MAX_STATE_BYTES};
use bloom_common::{BloomError, NavigationState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a state token could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("state token is empty")]
    Empty,

    #[error("state token exceeds {MAX_STATE_BYTES} bytes ({0})")]
    TooLong(usize),

    #[error("state token is not base64url")]
    NotBase64,

    #[error("state token is not a state record: {0}")]
    Malformed(String),

    #[error("unsupported state token version {0}")]
    UnsupportedVersion(u8),
}

#[derive(Serialize)]
struct Outgoing<'a> {
    v: u8,
    #[serde(flatten)]
    state: &'a NavigationState,
}

#[derive(Deserialize)]
struct Incoming {
    v: u8,
    #[serde(flatten)]
    state: NavigationState,
}

/// Encode a state into a transport-safe token
pub fn encode(state: &NavigationState) -> Result<String, BloomError> {
    let json = serde_json::to_vec(&Outgoing {
        v: STATE_TOKEN_VERSION,
        state,
    })
    .map_err(|e| BloomError::StateEncoding(e.to_string()))?;

    let token = URL_SAFE_NO_PAD.encode(json);
    if token.len() > MAX_STATE_BYTES {
        return Err(BloomError::StateEncoding(format!(
            "token of {} bytes exceeds frame limit",
            token.len()
        )));
    }
    Ok(token)
}

/// Decode a client-echoed token back into a state
pub fn decode(token: &str) -> Result<NavigationState, DecodeFailure> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeFailure::Empty);
    }
    if token.len() > MAX_STATE_BYTES {
        return Err(DecodeFailure::TooLong(token.len()));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| DecodeFailure::NotBase64)?;

    let incoming: Incoming =
        serde_json::from_slice(&bytes).map_err(|e| DecodeFailure::Malformed(e.to_string()))?;

    if incoming.v != STATE_TOKEN_VERSION {
        return Err(DecodeFailure::UnsupportedVersion(incoming.v));
    }
    Ok(incoming.state)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use bloom_common::{Screen, ScreenError};
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    fn screen() -> impl Strategy<Value = Screen> {
        prop_oneof![
            Just(Screen::ChallengesOverview),
            Just(Screen::ChallengesBrowse),
            Just(Screen::CredentialsOverview),
            Just(Screen::CredentialsDetail),
            Just(Screen::SubmitSelectChallenge),
            Just(Screen::SubmitEnterSolution),
            Just(Screen::SubmitDone),
            Just(Screen::ProjectsBrowse),
        ]
    }

    fn id() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_\\-]{1,24}"
    }

    prop_compose! {
        fn navigation_state()(
            screen in screen(),
            viewer_id in proptest::option::of(any::<u64>()),
            selected_challenge_id in proptest::option::of(id()),
            selected_credential_index in proptest::option::of(any::<usize>()),
            selected_project_id in proptest::option::of(id()),
            cursor_index in proptest::option::of(any::<usize>()),
            has_credentials in proptest::option::of(any::<bool>()),
            submission_id in proptest::option::of(id()),
            empty_submission in any::<bool>(),
        ) -> NavigationState {
            NavigationState {
                viewer_id,
                screen,
                selected_challenge_id,
                selected_credential_index,
                selected_project_id,
                cursor_index,
                has_credentials,
                submission_id,
                error: empty_submission.then_some(ScreenError::EmptySubmission),
            }
        }
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]

        #[test]
        fn test_round_trip_is_identity(state in navigation_state()) {
            let token = encode(&state).unwrap();
            prop_assert!(token.len() <= MAX_STATE_BYTES);
            prop_assert_eq!(decode(&token).unwrap(), state);
        }

        #[test]
        fn test_decode_rejects_arbitrary_text(token in any::<String>()) {
            // Must return, never panic; random text is never a valid record
            let decoded = decode(&token);
            prop_assert!(decoded.is_err(), "decoded {:?}", decoded);
        }

        #[test]
        fn test_decode_rejects_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let token = URL_SAFE_NO_PAD.encode(&bytes);
            prop_assert!(decode(&token).is_err());
        }
    }
}
