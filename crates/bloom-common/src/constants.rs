//! Shared constants for SkillBloom components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default public base URL (absolute button targets, image and share links)
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Current version tag embedded in every state token
pub const STATE_TOKEN_VERSION: u8 = 1;

/// Frame protocol limits
pub mod limits {
    /// Largest state token a client will echo back (bytes)
    pub const MAX_STATE_BYTES: usize = 4096;

    /// Buttons per frame
    pub const MAX_BUTTONS: usize = 4;

    /// Longest free-text input accepted (characters)
    pub const MAX_INPUT_CHARS: usize = 256;

    /// Longest challenge description shown on a card before truncation
    pub const CARD_DESCRIPTION_CHARS: usize = 100;
}

/// HTTP route paths
pub mod routes {
    pub const FRAME_INDEX: &str = "/api/frame";
    pub const FRAME_CHALLENGES: &str = "/api/frame/challenges";
    pub const FRAME_CREDENTIALS: &str = "/api/frame/credentials";
    pub const FRAME_SUBMIT: &str = "/api/frame/submit";
    pub const FRAME_PROJECTS: &str = "/api/frame/projects";
    pub const FRAME_REDIRECT: &str = "/api/frame/redirect";
    pub const CARD_IMAGE: &str = "/api/og";
}

/// Frame metadata property names
pub mod meta {
    pub const FRAME: &str = "fc:frame";
    pub const FRAME_VERSION: &str = "vNext";
    pub const IMAGE: &str = "fc:frame:image";
    pub const POST_URL: &str = "fc:frame:post_url";
    pub const INPUT_TEXT: &str = "fc:frame:input:text";
    pub const STATE: &str = "fc:frame:state";
    pub const BUTTON_PREFIX: &str = "fc:frame:button";
    pub const OG_IMAGE: &str = "og:image";
}
