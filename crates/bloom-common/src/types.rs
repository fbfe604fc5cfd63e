//! Core types shared across SkillBloom components.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One named step of the frame navigation state machine.
///
/// Every screen corresponds to exactly one rendered frame. There is no
/// terminal screen: each one offers a way back to the challenges overview
/// or onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Landing card with entry buttons
    ChallengesOverview,
    /// One challenge at a time, cycled with "Next"
    ChallengesBrowse,
    /// Credential count and entry into the credential carousel
    CredentialsOverview,
    /// One credential at a time, cycled with "Next"
    CredentialsDetail,
    /// Transient: resolves a challenge and settles on `SubmitEnterSolution`
    #[serde(rename = "submit-select")]
    SubmitSelectChallenge,
    /// Free-text solution prompt
    SubmitEnterSolution,
    /// Submission accepted
    SubmitDone,
    /// One project at a time, cycled with "Next"
    ProjectsBrowse,
}

impl Screen {
    /// Colour theme used by the card image renderer
    pub fn category(&self) -> ImageCategory {
        match self {
            Self::ChallengesOverview | Self::ChallengesBrowse => ImageCategory::Challenges,
            Self::SubmitSelectChallenge | Self::SubmitEnterSolution | Self::SubmitDone => {
                ImageCategory::Challenges
            }
            Self::CredentialsOverview | Self::CredentialsDetail => ImageCategory::Credentials,
            Self::ProjectsBrowse => ImageCategory::Projects,
        }
    }

    /// Stable wire name, as carried in state tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChallengesOverview => "challenges-overview",
            Self::ChallengesBrowse => "challenges-browse",
            Self::CredentialsOverview => "credentials-overview",
            Self::CredentialsDetail => "credentials-detail",
            Self::SubmitSelectChallenge => "submit-select",
            Self::SubmitEnterSolution => "submit-enter-solution",
            Self::SubmitDone => "submit-done",
            Self::ProjectsBrowse => "projects-browse",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline error flag carried on a screen that re-renders instead of advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenError {
    /// Blank solution submitted
    EmptySubmission,
}

/// Client-held navigation state.
///
/// Only `screen` is required; every other field is screen-dependent and
/// absent unless the screen sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Farcaster id of the interacting viewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<u64>,

    pub screen: Screen,

    #[serde(default, alias = "challengeId", skip_serializing_if = "Option::is_none")]
    pub selected_challenge_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_credential_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_project_id: Option<String>,

    /// Position in the current cyclic list (always reduced modulo its length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_credentials: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ScreenError>,
}

impl NavigationState {
    /// A state on `screen` with every optional field absent
    pub fn new(screen: Screen) -> Self {
        Self {
            viewer_id: None,
            screen,
            selected_challenge_id: None,
            selected_credential_index: None,
            selected_project_id: None,
            cursor_index: None,
            has_credentials: None,
            submission_id: None,
            error: None,
        }
    }

    /// Fresh session state for a first interaction
    pub fn fresh(viewer_id: u64) -> Self {
        Self::new(Screen::ChallengesOverview).with_viewer(viewer_id)
    }

    pub fn with_viewer(mut self, viewer_id: u64) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor_index = Some(cursor);
        self
    }

    pub fn with_challenge(mut self, challenge_id: impl Into<String>) -> Self {
        self.selected_challenge_id = Some(challenge_id.into());
        self
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Screen::ChallengesOverview)
    }
}

/// Challenge difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// A skill challenge viewers can take and submit solutions for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub challenge_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub submission_guidelines: String,
}

/// A verifiable skill credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub credential_id: String,
    pub skill_name: String,
    pub issuance_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_proof_url: Option<String>,
    pub issuer_id: String,

    /// Viewer fids holding this credential
    #[serde(default)]
    pub holders: Vec<u64>,
}

/// A collaborative project open for team members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub creator_id: String,
    #[serde(default)]
    pub team_members: Vec<String>,
}

/// What a frame button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// POST back to the target, render the returned frame
    Post,
    /// POST back to the target, follow the returned redirect
    PostRedirect,
    /// Open an external URL in the viewer's client
    Link,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::PostRedirect => "post_redirect",
            Self::Link => "link",
        }
    }

    /// Returns true if pressing this button calls back into the server
    pub fn posts_back(&self) -> bool {
        matches!(self, Self::Post | Self::PostRedirect)
    }
}

/// Colour theme selector for the card image renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Challenges,
    Credentials,
    Projects,
    Matchmaking,
    #[default]
    Default,
}

impl ImageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Challenges => "challenges",
            Self::Credentials => "credentials",
            Self::Projects => "projects",
            Self::Matchmaking => "matchmaking",
            Self::Default => "default",
        }
    }

    /// Lenient parse of the `type` query parameter; unknown values use the default theme
    pub fn from_query(value: &str) -> Self {
        match value {
            "challenges" => Self::Challenges,
            "credentials" => Self::Credentials,
            "projects" => Self::Projects,
            "matchmaking" => Self::Matchmaking,
            _ => Self::Default,
        }
    }

    /// (primary, accent) gradient colours
    pub fn palette(&self) -> (&'static str, &'static str) {
        match self {
            Self::Challenges | Self::Default => ("#4F46E5", "#6366F1"),
            Self::Credentials => ("#10B981", "#34D399"),
            Self::Projects => ("#8B5CF6", "#A78BFA"),
            Self::Matchmaking => ("#F59E0B", "#FCD34D"),
        }
    }
}
