//! Screen rendering: settled state → frame metadata HTML.
//!
//! The card image itself is produced elsewhere (`/api/og`); this module
//! only builds the URL that asks for it.

use bloom_common::constants::{limits::CARD_DESCRIPTION_CHARS, meta, routes};
use bloom_common::{ActionKind, BloomError, ImageCategory, NavigationState, Screen, ScreenError};

use super::catalog::Catalog;
use super::codec;
use super::router::{EntryPoint, Intent, layout};

/// Placeholder shown in the free-text field
pub const SOLUTION_PROMPT: &str = "Enter your solution URL or description...";

/// External URLs a frame can point at
#[derive(Debug, Clone)]
pub struct SiteLinks {
    /// Public base URL without trailing slash
    pub base_url: String,
    pub credential_contract_address: String,
}

impl SiteLinks {
    pub fn new(base_url: &str, credential_contract_address: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential_contract_address: credential_contract_address.to_string(),
        }
    }

    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Request for the card image renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub title: String,
    pub description: String,
    pub category: ImageCategory,
}

impl ImageQuery {
    fn new(title: impl Into<String>, description: impl Into<String>, category: ImageCategory) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
        }
    }

    /// URL of the rendered card on the image renderer
    pub fn url(&self, links: &SiteLinks) -> String {
        format!(
            "{}?title={}&description={}&type={}",
            links.absolute(routes::CARD_IMAGE),
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.description),
            self.category.as_str()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ActionKind,
    pub target: String,
}

/// Everything needed to draw one screen
#[derive(Debug, Clone)]
pub struct ScreenDescriptor {
    pub image: ImageQuery,
    pub buttons: Vec<Button>,
    pub input_prompt: Option<String>,
    pub next_state: NavigationState,
    pub post_url: String,
}

/// A rendered frame, ready to serialize
#[derive(Debug, Clone)]
pub struct FrameResponse {
    pub image_url: String,
    pub buttons: Vec<Button>,
    pub input_prompt: Option<String>,
    pub state: String,
    pub post_url: String,
}

/// Builds screen descriptors from settled states
pub struct Renderer<'a> {
    catalog: &'a Catalog,
    links: &'a SiteLinks,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog, links: &'a SiteLinks) -> Self {
        Self { catalog, links }
    }

    /// Describe the screen for a settled state
    pub fn describe(&self, state: &NavigationState) -> ScreenDescriptor {
        let buttons = layout(state)
            .iter()
            .map(|slot| Button {
                label: slot.label.to_string(),
                action: slot.intent.action(),
                target: self.target(slot.intent, state),
            })
            .collect();

        let input_prompt = matches!(
            state.screen,
            Screen::SubmitSelectChallenge | Screen::SubmitEnterSolution
        )
        .then(|| SOLUTION_PROMPT.to_string());

        ScreenDescriptor {
            image: self.image(state),
            buttons,
            input_prompt,
            next_state: state.clone(),
            post_url: self.links.absolute(EntryPoint::for_screen(state.screen).path()),
        }
    }

    /// Describe and render in one step
    pub fn render_state(&self, state: &NavigationState) -> Result<FrameResponse, BloomError> {
        render(self.describe(state), self.links)
    }

    fn target(&self, intent: Intent, state: &NavigationState) -> String {
        let fid = state.viewer_id.unwrap_or_default();
        match intent {
            Intent::BrowseChallenges
            | Intent::NextChallenge
            | Intent::ChooseDifferentChallenge
            | Intent::BackToChallenges => self.links.absolute(routes::FRAME_CHALLENGES),
            Intent::TakeChallenge | Intent::SubmitSolution => {
                self.links.absolute(routes::FRAME_SUBMIT)
            }
            Intent::MyCredentials | Intent::ViewCredentialDetails | Intent::NextCredential => {
                self.links.absolute(routes::FRAME_CREDENTIALS)
            }
            Intent::StartProject | Intent::NextProject => self.links.absolute(routes::FRAME_PROJECTS),
            Intent::CreateProject => {
                self.links
                    .absolute(&format!("{}/projects-create", routes::FRAME_REDIRECT))
            }
            Intent::VerifyOnChain => format!(
                "https://basescan.org/token/{}",
                self.links.credential_contract_address
            ),
            Intent::ShareCredentials => match self.selected_credential(state) {
                Some(skill) => {
                    let text = format!("I just earned a {skill} credential on SkillBloom! 🌱");
                    let embed = self.links.absolute(&format!("/credentials?fid={fid}"));
                    format!(
                        "https://warpcast.com/~/compose?text={}&embeds[]={}",
                        urlencoding::encode(&text),
                        urlencoding::encode(&embed)
                    )
                }
                None => self.links.absolute(&format!("/credentials?fid={fid}")),
            },
            Intent::ShareProgress => self.links.absolute(&format!("/credentials?fid={fid}")),
            Intent::ViewProject => match state.selected_project_id.as_deref() {
                Some(project_id) => self.links.absolute(&format!("/projects/{project_id}")),
                None => self.links.absolute("/projects"),
            },
        }
    }

    fn selected_credential(&self, state: &NavigationState) -> Option<&str> {
        let fid = state.viewer_id?;
        let index = state.selected_credential_index?;
        self.catalog
            .credentials_for(fid)
            .get(index)
            .copied()
            .map(|c| c.skill_name.as_str())
    }

    fn image(&self, state: &NavigationState) -> ImageQuery {
        let category = state.screen.category();
        match state.screen {
            Screen::ChallengesOverview => {
                let total = self.catalog.challenges().len();
                let description = if total == 0 {
                    "New challenges are on their way. Check back soon!".to_string()
                } else {
                    format!("Explore {total} skill challenges across different difficulty levels")
                };
                ImageQuery::new("SkillBloom Challenges", description, category)
            }

            Screen::ChallengesBrowse => {
                let challenge = state
                    .selected_challenge_id
                    .as_deref()
                    .and_then(|id| self.catalog.challenge(id));
                match challenge {
                    Some(c) => ImageQuery::new(
                        format!("{} ({})", c.title, c.difficulty_level),
                        truncate(&c.description, CARD_DESCRIPTION_CHARS),
                        category,
                    ),
                    None => ImageQuery::new("SkillBloom Challenges", "Choose a challenge", category),
                }
            }

            Screen::SubmitSelectChallenge | Screen::SubmitEnterSolution => {
                if state.error == Some(ScreenError::EmptySubmission) {
                    return ImageQuery::new(
                        "Invalid Submission",
                        "Your solution can't be empty. Enter a link or description and try again.",
                        category,
                    );
                }
                let title = self.challenge_title(state).unwrap_or("a challenge");
                ImageQuery::new(
                    format!("Submit: {title}"),
                    "Provide your solution or link to your submission",
                    category,
                )
            }

            Screen::SubmitDone => {
                let title = self.challenge_title(state).unwrap_or("your challenge");
                ImageQuery::new(
                    "Submission Received!",
                    format!("Your solution for \"{title}\" has been submitted and is under review."),
                    category,
                )
            }

            Screen::CredentialsOverview => {
                let held = state
                    .viewer_id
                    .map_or(0, |fid| self.catalog.credentials_for(fid).len());
                if held == 0 {
                    ImageQuery::new(
                        "No Credentials Yet",
                        "Complete challenges to earn your first credential!",
                        category,
                    )
                } else {
                    let plural = if held > 1 { "s" } else { "" };
                    ImageQuery::new(
                        format!("Your Credentials ({held})"),
                        format!("You have earned {held} verifiable credential{plural}"),
                        category,
                    )
                }
            }

            Screen::CredentialsDetail => {
                let credential = state.viewer_id.zip(state.selected_credential_index).and_then(
                    |(fid, index)| self.catalog.credentials_for(fid).get(index).copied(),
                );
                match credential {
                    Some(c) => ImageQuery::new(
                        format!("Credential: {}", c.skill_name),
                        format!("Earned on {}", c.issuance_date.format("%b %-d, %Y")),
                        category,
                    ),
                    None => ImageQuery::new(
                        "Your Credentials",
                        "Complete challenges to earn your first credential!",
                        category,
                    ),
                }
            }

            Screen::ProjectsBrowse => {
                let project = state.cursor_index.and_then(|i| self.catalog.project_at(i));
                match project {
                    Some(p) => {
                        let mut description = truncate(&p.description, CARD_DESCRIPTION_CHARS);
                        if !p.required_skills.is_empty() {
                            description.push_str(&format!(" Needs: {}", p.required_skills.join(", ")));
                        }
                        ImageQuery::new(p.title.clone(), description, category)
                    }
                    None => ImageQuery::new(
                        "Start a Project",
                        "No open projects yet. Be the first to create one!",
                        category,
                    ),
                }
            }
        }
    }

    fn challenge_title(&self, state: &NavigationState) -> Option<&str> {
        state
            .selected_challenge_id
            .as_deref()
            .and_then(|id| self.catalog.challenge(id))
            .map(|c| c.title.as_str())
    }
}

/// Turn a descriptor into a frame response, encoding its next state
pub fn render(descriptor: ScreenDescriptor, links: &SiteLinks) -> Result<FrameResponse, BloomError> {
    Ok(FrameResponse {
        image_url: descriptor.image.url(links),
        buttons: descriptor.buttons,
        input_prompt: descriptor.input_prompt,
        state: codec::encode(&descriptor.next_state)?,
        post_url: descriptor.post_url,
    })
}

impl FrameResponse {
    /// Serialize as an HTML document of frame metadata tags
    pub fn to_html(&self) -> String {
        let mut tags = Vec::with_capacity(8 + self.buttons.len() * 3);
        tags.push(meta_tag(meta::FRAME, meta::FRAME_VERSION));
        tags.push(meta_tag(meta::IMAGE, &self.image_url));
        tags.push(meta_tag(meta::POST_URL, &self.post_url));

        for (index, button) in self.buttons.iter().enumerate() {
            let prefix = format!("{}:{}", meta::BUTTON_PREFIX, index + 1);
            tags.push(meta_tag(&prefix, &button.label));
            tags.push(meta_tag(&format!("{prefix}:action"), button.action.as_str()));
            tags.push(meta_tag(&format!("{prefix}:target"), &button.target));
        }

        if let Some(prompt) = &self.input_prompt {
            tags.push(meta_tag(meta::INPUT_TEXT, prompt));
        }
        tags.push(meta_tag(meta::STATE, &self.state));
        tags.push(meta_tag(meta::OG_IMAGE, &self.image_url));

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>SkillBloom</title>\n{}\n</head>\n<body>\n<img src=\"{}\" style=\"max-width: 100%; height: auto;\" />\n</body>\n</html>\n",
            tags.join("\n"),
            escape_markup(&self.image_url)
        )
    }
}

fn meta_tag(property: &str, content: &str) -> String {
    format!(
        "<meta property=\"{}\" content=\"{}\" />",
        property,
        escape_markup(content)
    )
}

/// Escape text for HTML attributes and SVG text nodes
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
