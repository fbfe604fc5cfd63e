//! Frame interaction core.
//!
//! One POST is one step: validate the envelope, decode the echoed state,
//! route to the next screen, render it with a freshly encoded state.
//! Nothing is remembered between requests.

pub mod catalog;
pub mod codec;
pub mod render;
pub mod router;
pub mod validator;

pub use catalog::Catalog;
pub use render::{FrameResponse, Renderer, SiteLinks};
pub use router::{EntryPoint, Navigation, Navigator};
pub use validator::ValidationError;

use bloom_common::{BloomError, NavigationState};

use crate::error::AppError;

/// Handle one frame action end to end
pub fn respond(
    catalog: &Catalog,
    links: &SiteLinks,
    entry: EntryPoint,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<(Navigation, FrameResponse), AppError> {
    let interaction = validator::validate(content_type, body)?;
    let navigation = Navigator::new(catalog).navigate(entry, &interaction);
    let response = Renderer::new(catalog, links).render_state(&navigation.next)?;
    Ok((navigation, response))
}

/// The embed frame shown before any interaction
pub fn initial_frame(catalog: &Catalog, links: &SiteLinks) -> Result<FrameResponse, BloomError> {
    let state = Navigator::new(catalog).settle(NavigationState::default());
    Renderer::new(catalog, links).render_state(&state)
}
