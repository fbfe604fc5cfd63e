//! Frame navigation state machine.
//!
//! Every interaction is resolved from the client-echoed state alone:
//!
//! ```text
//! token ─decode─▶ prior ─settle─▶ layout[button] = Intent ─apply─▶ next ─settle─▶ render
//! ```
//!
//! `layout` is the single table of which intent sits at which button
//! position on each screen; the renderer draws from the same table, so a
//! button index always means what the viewer saw. `settle` normalizes a
//! state against the catalog: cursors are reduced modulo the list length,
//! empty lists branch to fallback screens before any index is taken, and
//! the transient submit-select screen resolves to a concrete challenge.
//! When settling changes the layout the viewer saw, the settled screen is
//! rendered and the button is not applied.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bloom_common::constants::routes;
use bloom_common::{ActionKind, NavigationState, Screen, ScreenError};
use rand::Rng;

use super::catalog::Catalog;
use super::codec;
use super::validator::FrameInteraction;

/// What pressing a button means, independent of its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    BrowseChallenges,
    NextChallenge,
    TakeChallenge,
    ChooseDifferentChallenge,
    SubmitSolution,
    BackToChallenges,
    MyCredentials,
    ViewCredentialDetails,
    NextCredential,
    StartProject,
    NextProject,
    CreateProject,
    VerifyOnChain,
    ShareCredentials,
    ShareProgress,
    ViewProject,
}

impl Intent {
    pub fn action(&self) -> ActionKind {
        match self {
            Self::CreateProject => ActionKind::PostRedirect,
            Self::VerifyOnChain | Self::ShareCredentials | Self::ShareProgress | Self::ViewProject => {
                ActionKind::Link
            }
            _ => ActionKind::Post,
        }
    }
}

/// One button position on a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    pub label: &'static str,
    pub intent: Intent,
}

const fn slot(label: &'static str, intent: Intent) -> ButtonSlot {
    ButtonSlot { label, intent }
}

const CHALLENGES_OVERVIEW: &[ButtonSlot] = &[
    slot("Browse Challenges", Intent::BrowseChallenges),
    slot("My Credentials", Intent::MyCredentials),
    slot("Start Project", Intent::StartProject),
];

const CHALLENGES_BROWSE: &[ButtonSlot] = &[
    slot("Take Challenge", Intent::TakeChallenge),
    slot("Next Challenge", Intent::NextChallenge),
    slot("My Credentials", Intent::MyCredentials),
    slot("Back", Intent::BackToChallenges),
];

const SUBMIT_ENTER: &[ButtonSlot] = &[
    slot("Submit Solution", Intent::SubmitSolution),
    slot("Choose Different Challenge", Intent::ChooseDifferentChallenge),
    slot("Cancel", Intent::BackToChallenges),
];

const SUBMIT_RETRY: &[ButtonSlot] = &[
    slot("Try Again", Intent::SubmitSolution),
    slot("Choose Different Challenge", Intent::ChooseDifferentChallenge),
    slot("Cancel", Intent::BackToChallenges),
];

const SUBMIT_DONE: &[ButtonSlot] = &[
    slot("View Status", Intent::MyCredentials),
    slot("Submit Another", Intent::BrowseChallenges),
    slot("Share Progress", Intent::ShareProgress),
];

const CREDENTIALS_OVERVIEW: &[ButtonSlot] = &[
    slot("View Details", Intent::ViewCredentialDetails),
    slot("Next Credential", Intent::NextCredential),
    slot("Share", Intent::ShareCredentials),
    slot("Take Challenge", Intent::BrowseChallenges),
];

const CREDENTIALS_EMPTY: &[ButtonSlot] = &[
    slot("Take Challenge", Intent::BrowseChallenges),
    slot("Start Project", Intent::StartProject),
];

const CREDENTIALS_DETAIL: &[ButtonSlot] = &[
    slot("Verify on Chain", Intent::VerifyOnChain),
    slot("Next Credential", Intent::NextCredential),
    slot("Share", Intent::ShareCredentials),
    slot("Challenges", Intent::BackToChallenges),
];

const PROJECTS_BROWSE: &[ButtonSlot] = &[
    slot("View Project", Intent::ViewProject),
    slot("Next Project", Intent::NextProject),
    slot("Create Project", Intent::CreateProject),
    slot("Challenges", Intent::BackToChallenges),
];

const PROJECTS_EMPTY: &[ButtonSlot] = &[
    slot("Browse Challenges", Intent::BrowseChallenges),
    slot("Create Project", Intent::CreateProject),
];

/// Button table for a settled state
pub fn layout(state: &NavigationState) -> &'static [ButtonSlot] {
    match state.screen {
        Screen::ChallengesOverview => CHALLENGES_OVERVIEW,
        Screen::ChallengesBrowse => CHALLENGES_BROWSE,
        Screen::SubmitSelectChallenge | Screen::SubmitEnterSolution => match state.error {
            Some(ScreenError::EmptySubmission) => SUBMIT_RETRY,
            None => SUBMIT_ENTER,
        },
        Screen::SubmitDone => SUBMIT_DONE,
        Screen::CredentialsOverview if state.has_credentials == Some(true) => CREDENTIALS_OVERVIEW,
        Screen::CredentialsOverview => CREDENTIALS_EMPTY,
        Screen::CredentialsDetail => CREDENTIALS_DETAIL,
        Screen::ProjectsBrowse if state.cursor_index.is_some() => PROJECTS_BROWSE,
        Screen::ProjectsBrowse => PROJECTS_EMPTY,
    }
}

/// The frame endpoint an interaction arrived on.
///
/// Only consulted when no usable prior state came with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Challenges,
    Credentials,
    Submit,
    Projects,
}

impl EntryPoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Challenges => routes::FRAME_CHALLENGES,
            Self::Credentials => routes::FRAME_CREDENTIALS,
            Self::Submit => routes::FRAME_SUBMIT,
            Self::Projects => routes::FRAME_PROJECTS,
        }
    }

    /// Endpoint that owns a screen
    pub fn for_screen(screen: Screen) -> Self {
        match screen {
            Screen::ChallengesOverview | Screen::ChallengesBrowse => Self::Challenges,
            Screen::CredentialsOverview | Screen::CredentialsDetail => Self::Credentials,
            Screen::SubmitSelectChallenge | Screen::SubmitEnterSolution | Screen::SubmitDone => {
                Self::Submit
            }
            Screen::ProjectsBrowse => Self::Projects,
        }
    }
}

/// Result of routing one interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Screen the viewer was on, `None` for a fresh session
    pub prior: Option<Screen>,
    /// Intent behind the pressed button, `None` when no transition applied
    pub intent: Option<Intent>,
    pub next: NavigationState,
}

/// Position within a cyclic list; `None` when the list is empty
fn cyclic(cursor: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(cursor.unwrap_or(0) % len)
}

/// Cursor one step past `cursor`, reduced later by `settle`
fn advance(cursor: Option<usize>) -> usize {
    cursor.unwrap_or(0).saturating_add(1)
}

/// Mint a submission id from the current time and viewer.
///
/// A random suffix keeps ids unique when one viewer submits twice within
/// the same millisecond.
pub fn mint_submission_id(viewer_id: u64) -> String {
    let mut suffix = [0u8; 6];
    rand::rng().fill(&mut suffix);
    format!(
        "sub_{}_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        viewer_id,
        URL_SAFE_NO_PAD.encode(suffix)
    )
}

/// Stateless router over an injected catalog
pub struct Navigator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Navigator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Route one validated interaction to the next settled state
    pub fn navigate(&self, entry: EntryPoint, interaction: &FrameInteraction) -> Navigation {
        let viewer = interaction.viewer_id;
        let input = interaction.input_text.as_deref();

        let prior = interaction
            .prior_state
            .as_deref()
            .and_then(|token| match codec::decode(token) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::debug!(viewer, error = %e, "Discarding undecodable state, starting fresh");
                    None
                }
            });

        match prior {
            Some(mut seen) => {
                seen.viewer_id = Some(viewer);
                let shown = layout(&seen);
                let settled = self.settle(seen.clone());

                // The catalog no longer backs the screen the viewer saw
                // (emptied list, foreign viewer): show the fallback as is.
                if layout(&settled) != shown {
                    tracing::debug!(
                        viewer,
                        seen = %seen.screen,
                        fallback = %settled.screen,
                        "Prior screen no longer valid, rendering fallback"
                    );
                    return Navigation {
                        prior: Some(seen.screen),
                        intent: None,
                        next: settled,
                    };
                }

                let intent = shown
                    .get(usize::from(interaction.button_index).wrapping_sub(1))
                    .map(|slot| slot.intent);
                let next = self.transition(&settled, interaction.button_index, input);
                Navigation {
                    prior: Some(settled.screen),
                    intent,
                    next,
                }
            }
            None => self.first_contact(entry, viewer, interaction.button_index, input),
        }
    }

    fn first_contact(
        &self,
        entry: EntryPoint,
        viewer: u64,
        button_index: u8,
        input: Option<&str>,
    ) -> Navigation {
        let (intent, next) = match entry {
            EntryPoint::Challenges => {
                let overview = self.settle(NavigationState::fresh(viewer));
                let intent = layout(&overview)
                    .get(usize::from(button_index).wrapping_sub(1))
                    .map(|slot| slot.intent);
                (intent, self.transition(&overview, button_index, input))
            }
            EntryPoint::Credentials => (
                Some(Intent::MyCredentials),
                self.settle(NavigationState::new(Screen::CredentialsOverview).with_viewer(viewer)),
            ),
            EntryPoint::Submit => (
                Some(Intent::TakeChallenge),
                self.settle(NavigationState::new(Screen::SubmitSelectChallenge).with_viewer(viewer)),
            ),
            EntryPoint::Projects => (
                Some(Intent::StartProject),
                self.settle(
                    NavigationState::new(Screen::ProjectsBrowse)
                        .with_viewer(viewer)
                        .with_cursor(0),
                ),
            ),
        };

        Navigation {
            prior: None,
            intent,
            next,
        }
    }

    /// Next settled state for `button_index` pressed on a settled `prior`.
    ///
    /// Buttons outside the layout and link buttons leave the viewer where
    /// they were.
    pub fn transition(
        &self,
        prior: &NavigationState,
        button_index: u8,
        input: Option<&str>,
    ) -> NavigationState {
        let slot = layout(prior).get(usize::from(button_index).wrapping_sub(1));
        match slot {
            Some(slot) => self.settle(self.apply(prior, slot.intent, input)),
            None => {
                tracing::debug!(
                    screen = %prior.screen,
                    button_index,
                    "Button outside layout, re-rendering"
                );
                prior.clone()
            }
        }
    }

    fn apply(&self, prior: &NavigationState, intent: Intent, input: Option<&str>) -> NavigationState {
        let viewer = prior.viewer_id;
        let fresh = |screen| {
            let mut state = NavigationState::new(screen);
            state.viewer_id = viewer;
            state
        };

        match intent {
            Intent::BrowseChallenges => fresh(Screen::ChallengesBrowse).with_cursor(0),
            Intent::NextChallenge => {
                fresh(Screen::ChallengesBrowse).with_cursor(advance(prior.cursor_index))
            }
            Intent::TakeChallenge => {
                let mut state = fresh(Screen::SubmitSelectChallenge);
                state.selected_challenge_id = prior.selected_challenge_id.clone();
                state
            }
            Intent::ChooseDifferentChallenge => {
                let position = prior
                    .selected_challenge_id
                    .as_deref()
                    .and_then(|id| self.catalog.challenge_position(id));
                fresh(Screen::ChallengesBrowse).with_cursor(position.map_or(0, |p| p + 1))
            }
            Intent::SubmitSolution => {
                let solution = input.map(str::trim).unwrap_or_default();
                if solution.is_empty() {
                    tracing::debug!(viewer = ?viewer, "Empty submission, re-prompting");
                    let mut state = fresh(Screen::SubmitEnterSolution);
                    state.selected_challenge_id = prior.selected_challenge_id.clone();
                    state.error = Some(ScreenError::EmptySubmission);
                    return state;
                }

                let submission_id = mint_submission_id(viewer.unwrap_or_default());
                tracing::info!(
                    viewer = ?viewer,
                    challenge_id = ?prior.selected_challenge_id,
                    submission_id = %submission_id,
                    solution_len = solution.len(),
                    "Solution submitted"
                );
                let mut state = fresh(Screen::SubmitDone);
                state.selected_challenge_id = prior.selected_challenge_id.clone();
                state.submission_id = Some(submission_id);
                state
            }
            Intent::BackToChallenges => fresh(Screen::ChallengesOverview),
            Intent::MyCredentials => fresh(Screen::CredentialsOverview),
            Intent::ViewCredentialDetails => fresh(Screen::CredentialsDetail).with_cursor(0),
            Intent::NextCredential => {
                fresh(Screen::CredentialsDetail).with_cursor(advance(prior.cursor_index))
            }
            Intent::StartProject => fresh(Screen::ProjectsBrowse).with_cursor(0),
            Intent::NextProject => {
                fresh(Screen::ProjectsBrowse).with_cursor(advance(prior.cursor_index))
            }
            Intent::CreateProject
            | Intent::VerifyOnChain
            | Intent::ShareCredentials
            | Intent::ShareProgress
            | Intent::ViewProject => prior.clone(),
        }
    }

    /// First challenge matching `selected`, else the first in the catalog
    fn resolve_challenge(&self, selected: Option<&str>) -> Option<String> {
        selected
            .and_then(|id| self.catalog.challenge(id))
            .or_else(|| self.catalog.challenge_at(0))
            .map(|c| c.challenge_id.clone())
    }

    /// Normalize a state against the catalog.
    ///
    /// Only the fields the screen uses survive; every list position is
    /// computed through `cyclic`, which refuses empty lists.
    pub fn settle(&self, state: NavigationState) -> NavigationState {
        let viewer = state.viewer_id;
        let fresh = |screen| {
            let mut next = NavigationState::new(screen);
            next.viewer_id = viewer;
            next
        };

        match state.screen {
            Screen::ChallengesOverview => fresh(Screen::ChallengesOverview),

            Screen::ChallengesBrowse => {
                match cyclic(state.cursor_index, self.catalog.challenges().len()) {
                    Some(position) => {
                        let mut next = fresh(Screen::ChallengesBrowse).with_cursor(position);
                        next.selected_challenge_id = self
                            .catalog
                            .challenge_at(position)
                            .map(|c| c.challenge_id.clone());
                        next
                    }
                    None => {
                        tracing::debug!(viewer = ?viewer, "No challenges to browse, falling back to overview");
                        fresh(Screen::ChallengesOverview)
                    }
                }
            }

            Screen::SubmitSelectChallenge => {
                match self.resolve_challenge(state.selected_challenge_id.as_deref()) {
                    Some(challenge_id) => {
                        fresh(Screen::SubmitEnterSolution).with_challenge(challenge_id)
                    }
                    None => fresh(Screen::ChallengesOverview),
                }
            }

            Screen::SubmitEnterSolution => {
                let known = state
                    .selected_challenge_id
                    .as_deref()
                    .is_some_and(|id| self.catalog.challenge(id).is_some());
                if known {
                    let mut next = fresh(Screen::SubmitEnterSolution);
                    next.selected_challenge_id = state.selected_challenge_id;
                    next.error = state.error;
                    next
                } else {
                    self.settle(NavigationState {
                        screen: Screen::SubmitSelectChallenge,
                        ..state
                    })
                }
            }

            Screen::SubmitDone => match state.submission_id {
                Some(submission_id) => {
                    let mut next = fresh(Screen::SubmitDone);
                    next.selected_challenge_id = state.selected_challenge_id;
                    next.submission_id = Some(submission_id);
                    next
                }
                None => self.settle(NavigationState {
                    screen: Screen::SubmitSelectChallenge,
                    ..state
                }),
            },

            Screen::CredentialsOverview => {
                let held = self.held_credentials(viewer);
                let mut next = fresh(Screen::CredentialsOverview);
                next.has_credentials = Some(held > 0);
                next
            }

            Screen::CredentialsDetail => match cyclic(state.cursor_index, self.held_credentials(viewer)) {
                Some(position) => {
                    let mut next = fresh(Screen::CredentialsDetail).with_cursor(position);
                    next.selected_credential_index = Some(position);
                    next.has_credentials = Some(true);
                    next
                }
                None => {
                    tracing::debug!(viewer = ?viewer, "Viewer holds no credentials, falling back to overview");
                    let mut next = fresh(Screen::CredentialsOverview);
                    next.has_credentials = Some(false);
                    next
                }
            },

            Screen::ProjectsBrowse => {
                let mut next = fresh(Screen::ProjectsBrowse);
                if let Some(position) = cyclic(state.cursor_index, self.catalog.projects().len()) {
                    next.cursor_index = Some(position);
                    next.selected_project_id = self
                        .catalog
                        .project_at(position)
                        .map(|p| p.project_id.clone());
                }
                next
            }
        }
    }

    fn held_credentials(&self, viewer: Option<u64>) -> usize {
        viewer.map_or(0, |fid| self.catalog.credentials_for(fid).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::catalog::fixtures;

    fn interaction(button_index: u8, state: Option<&NavigationState>, input: Option<&str>) -> FrameInteraction {
        FrameInteraction {
            viewer_id: 1,
            button_index,
            input_text: input.map(str::to_string),
            prior_state: state.map(|s| codec::encode(s).unwrap()),
        }
    }

    fn browse_at(cursor: usize) -> NavigationState {
        NavigationState::new(Screen::ChallengesBrowse).with_cursor(cursor)
    }

    #[test]
    fn test_first_contact_browse() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog).navigate(EntryPoint::Challenges, &interaction(1, None, None));

        assert_eq!(nav.prior, None);
        assert_eq!(nav.intent, Some(Intent::BrowseChallenges));
        let decoded = codec::decode(&codec::encode(&nav.next).unwrap()).unwrap();
        assert_eq!(decoded.screen, Screen::ChallengesBrowse);
        assert_eq!(decoded.cursor_index, Some(0));
        assert_eq!(decoded.selected_challenge_id.as_deref(), Some("ch1"));
        assert_eq!(decoded.viewer_id, Some(1));
    }

    #[test]
    fn test_next_challenge_advances_and_wraps() {
        let catalog = fixtures::sized(5, 0, 0);
        let nav = Navigator::new(&catalog);

        let next = nav.navigate(EntryPoint::Challenges, &interaction(2, Some(&browse_at(2)), None));
        assert_eq!(next.intent, Some(Intent::NextChallenge));
        assert_eq!(next.next.cursor_index, Some(3));
        assert_eq!(next.next.selected_challenge_id.as_deref(), Some("ch4"));

        let wrapped = nav.navigate(EntryPoint::Challenges, &interaction(2, Some(&browse_at(4)), None));
        assert_eq!(wrapped.next.screen, Screen::ChallengesBrowse);
        assert_eq!(wrapped.next.cursor_index, Some(0));
    }

    #[test]
    fn test_cycle_closure() {
        for len in 1..=6 {
            let catalog = fixtures::sized(len, len, len);
            let nav = Navigator::new(&catalog);
            for start in [
                nav.settle(browse_at(len - 1).with_viewer(1)),
                nav.settle(NavigationState::new(Screen::CredentialsDetail).with_viewer(1).with_cursor(len / 2)),
                nav.settle(NavigationState::new(Screen::ProjectsBrowse).with_viewer(1).with_cursor(0)),
            ] {
                let mut state = start.clone();
                for _ in 0..len {
                    state = nav.transition(&state, 2, None);
                }
                assert_eq!(state, start, "cycle of {len} on {}", start.screen);
            }
        }
    }

    #[test]
    fn test_client_cursor_is_reduced() {
        let catalog = fixtures::sized(3, 0, 0);
        let nav = Navigator::new(&catalog);
        let settled = nav.settle(browse_at(usize::MAX));
        assert_eq!(settled.cursor_index, Some(usize::MAX % 3));

        let next = nav.navigate(EntryPoint::Challenges, &interaction(2, Some(&browse_at(10)), None));
        assert_eq!(next.next.cursor_index, Some(2));
    }

    #[test]
    fn test_empty_lists_use_fallback_screens() {
        let catalog = fixtures::sized(0, 0, 0);
        let nav = Navigator::new(&catalog);

        let browse = nav.navigate(EntryPoint::Challenges, &interaction(1, None, None));
        assert_eq!(browse.next.screen, Screen::ChallengesOverview);
        assert_eq!(browse.next.cursor_index, None);

        let next = nav.navigate(EntryPoint::Challenges, &interaction(2, Some(&browse_at(3)), None));
        assert_eq!(next.next.screen, Screen::ChallengesOverview);

        let take = nav.navigate(EntryPoint::Submit, &interaction(1, None, None));
        assert_eq!(take.next.screen, Screen::ChallengesOverview);

        let detail = NavigationState::new(Screen::CredentialsDetail).with_cursor(1);
        let details = nav.navigate(EntryPoint::Credentials, &interaction(2, Some(&detail), None));
        assert_eq!(details.next.screen, Screen::CredentialsOverview);
        assert_eq!(details.next.has_credentials, Some(false));

        let projects = nav.navigate(EntryPoint::Projects, &interaction(1, None, None));
        assert_eq!(projects.next.screen, Screen::ProjectsBrowse);
        assert_eq!(projects.next.cursor_index, None);
        assert_eq!(layout(&projects.next), PROJECTS_EMPTY);
    }

    #[test]
    fn test_stale_screen_buttons_do_not_rebind() {
        let catalog = fixtures::sized(0, 0, 0);
        let nav = Navigator::new(&catalog);
        let detail = NavigationState::new(Screen::CredentialsDetail).with_cursor(0);
        let projects = NavigationState::new(Screen::ProjectsBrowse).with_cursor(1);

        for button in 1..=4 {
            let browse = nav.navigate(EntryPoint::Challenges, &interaction(button, Some(&browse_at(0)), None));
            assert_eq!(browse.intent, None);
            assert_eq!(browse.prior, Some(Screen::ChallengesBrowse));
            assert_eq!(browse.next.screen, Screen::ChallengesOverview);

            let credentials = nav.navigate(EntryPoint::Credentials, &interaction(button, Some(&detail), None));
            assert_eq!(credentials.intent, None);
            assert_eq!(credentials.next.screen, Screen::CredentialsOverview);
            assert_eq!(credentials.next.has_credentials, Some(false));

            let browsing = nav.navigate(EntryPoint::Projects, &interaction(button, Some(&projects), None));
            assert_eq!(browsing.intent, None);
            assert_eq!(browsing.next.screen, Screen::ProjectsBrowse);
            assert_eq!(browsing.next.cursor_index, None);
        }
    }

    #[test]
    fn test_take_challenge_carries_selection() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let browsing = nav.settle(browse_at(2).with_viewer(1));

        let next = nav.transition(&browsing, 1, None);
        assert_eq!(next.screen, Screen::SubmitEnterSolution);
        assert_eq!(next.selected_challenge_id.as_deref(), Some("ch3"));
        assert_eq!(next.cursor_index, None);
    }

    #[test]
    fn test_submit_entry_defaults_to_first_challenge() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);

        let first = nav.navigate(EntryPoint::Submit, &interaction(1, None, None));
        assert_eq!(first.next.screen, Screen::SubmitEnterSolution);
        assert_eq!(first.next.selected_challenge_id.as_deref(), Some("ch1"));

        let stale = NavigationState::new(Screen::SubmitEnterSolution).with_challenge("gone");
        let settled = nav.settle(stale);
        assert_eq!(settled.selected_challenge_id.as_deref(), Some("ch1"));
    }

    #[test]
    fn test_empty_submission_stays() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let entering = NavigationState::new(Screen::SubmitEnterSolution).with_challenge("ch1");

        for blank in [None, Some(""), Some("   \t")] {
            let outcome = nav.navigate(EntryPoint::Submit, &interaction(1, Some(&entering), blank));
            assert_eq!(outcome.next.screen, Screen::SubmitEnterSolution);
            assert_eq!(outcome.next.error, Some(ScreenError::EmptySubmission));
            assert_eq!(outcome.next.selected_challenge_id.as_deref(), Some("ch1"));
            assert_eq!(outcome.next.submission_id, None);
            assert_eq!(layout(&outcome.next)[0].label, "Try Again");
        }
    }

    #[test]
    fn test_submission_mints_id() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let entering = NavigationState::new(Screen::SubmitEnterSolution).with_challenge("ch1");

        let done = nav.navigate(
            EntryPoint::Submit,
            &interaction(1, Some(&entering), Some("https://github.com/x/y")),
        );
        assert_eq!(done.next.screen, Screen::SubmitDone);
        assert_eq!(done.next.selected_challenge_id.as_deref(), Some("ch1"));
        assert_eq!(done.next.error, None);
        let submission_id = done.next.submission_id.unwrap();
        assert!(submission_id.starts_with("sub_"));
        assert!(submission_id.contains("_1_"));
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..100).map(|_| mint_submission_id(7)).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_choose_different_challenge_moves_on() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let entering = nav.settle(NavigationState::new(Screen::SubmitEnterSolution).with_challenge("ch5"));

        let next = nav.transition(&entering, 2, None);
        assert_eq!(next.screen, Screen::ChallengesBrowse);
        assert_eq!(next.cursor_index, Some(0));
    }

    #[test]
    fn test_zero_credentials_overview() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let mut stranger = interaction(1, None, None);
        stranger.viewer_id = 999;

        let overview = nav.navigate(EntryPoint::Credentials, &stranger);
        assert_eq!(overview.next.screen, Screen::CredentialsOverview);
        assert_eq!(overview.next.has_credentials, Some(false));
        let intents: Vec<_> = layout(&overview.next).iter().map(|s| s.intent).collect();
        assert_eq!(intents, [Intent::BrowseChallenges, Intent::StartProject]);
    }

    #[test]
    fn test_credentials_carousel() {
        let catalog = fixtures::sized(1, 3, 0);
        let nav = Navigator::new(&catalog);

        let overview = nav.navigate(EntryPoint::Credentials, &interaction(1, None, None)).next;
        assert_eq!(overview.has_credentials, Some(true));

        let first = nav.transition(&overview, 1, None);
        assert_eq!(first.screen, Screen::CredentialsDetail);
        assert_eq!(first.selected_credential_index, Some(0));

        let skipped = nav.transition(&overview, 2, None);
        assert_eq!(skipped.cursor_index, Some(1));

        let second = nav.transition(&first, 2, None);
        assert_eq!(second.cursor_index, Some(1));
        assert_eq!(second.selected_credential_index, Some(1));
    }

    #[test]
    fn test_malformed_state_starts_fresh() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let fresh = nav.navigate(EntryPoint::Challenges, &interaction(1, None, None));

        for token in ["garbage!!", "e30", "eyJ2IjoyLCJzY3JlZW4iOiJzdWJtaXQtZG9uZSJ9"] {
            let mut bad = interaction(1, None, None);
            bad.prior_state = Some(token.to_string());
            let recovered = nav.navigate(EntryPoint::Challenges, &bad);
            assert_eq!(recovered, fresh);
        }
    }

    #[test]
    fn test_link_and_unknown_buttons_stay_put() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let detail = nav.settle(NavigationState::new(Screen::CredentialsDetail).with_viewer(123));

        assert_eq!(nav.transition(&detail, 1, None), detail);
        assert_eq!(nav.transition(&detail, 3, None), detail);

        let overview = nav.settle(NavigationState::fresh(1));
        assert_eq!(nav.transition(&overview, 4, None), overview);
    }

    #[test]
    fn test_state_viewer_follows_request() {
        let catalog = Catalog::demo();
        let nav = Navigator::new(&catalog);
        let foreign = NavigationState::new(Screen::CredentialsOverview).with_viewer(123);
        let mut request = interaction(1, Some(&foreign), None);
        request.viewer_id = 999;

        let next = nav.navigate(EntryPoint::Credentials, &request);
        assert_eq!(next.next.viewer_id, Some(999));
        // 999 holds nothing: button 1 is "Take Challenge" on the empty layout
        assert_eq!(next.intent, Some(Intent::BrowseChallenges));
        assert_eq!(next.next.screen, Screen::ChallengesBrowse);
    }

    #[test]
    fn test_next_keeps_its_position() {
        let catalog = fixtures::sized(2, 2, 2);
        let nav = Navigator::new(&catalog);
        for state in [
            nav.settle(browse_at(0).with_viewer(1)),
            nav.settle(NavigationState::new(Screen::CredentialsOverview).with_viewer(1)),
            nav.settle(NavigationState::new(Screen::CredentialsDetail).with_viewer(1)),
            nav.settle(NavigationState::new(Screen::ProjectsBrowse).with_viewer(1)),
        ] {
            let second = layout(&state)[1];
            assert!(second.label.starts_with("Next"), "{}: {}", state.screen, second.label);
        }
    }

    #[test]
    fn test_layouts_fit_frame_limits() {
        for table in [
            CHALLENGES_OVERVIEW,
            CHALLENGES_BROWSE,
            SUBMIT_ENTER,
            SUBMIT_RETRY,
            SUBMIT_DONE,
            CREDENTIALS_OVERVIEW,
            CREDENTIALS_EMPTY,
            CREDENTIALS_DETAIL,
            PROJECTS_BROWSE,
            PROJECTS_EMPTY,
        ] {
            assert!((1..=4).contains(&table.len()));
            assert!(table.iter().any(|slot| slot.intent.action().posts_back()));
        }
    }
}
