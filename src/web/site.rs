use crate::config::Settings;
use crate::error::Error;
use crate::outcome::{Outcome, View};
use crate::store::ServiceRequestStore;

use super::{extract_unauthed, ExtractFormData, ExtractMetadata};

/// Homepage.
///
/// What the page lists depends on who asks: guests get an empty page
/// without any store access, standard users see requests for their own
/// customers, administrators see every request.
#[derive(Debug)]
pub struct SiteController<R> {
    requests: R,
    settings: Settings,
}

impl<R: ServiceRequestStore> SiteController<R> {
    /// Creates the controller.
    pub fn new(requests: R, settings: Settings) -> Self {
        Self { requests, settings }
    }

    /// Renders the homepage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if loading requests fails.
    pub fn home<Q>(&self, request: &Q) -> Result<Outcome, Error>
    where
        Q: ExtractMetadata + ExtractFormData,
    {
        let ctx = extract_unauthed(request).context;

        let (requests, is_admin) = match ctx.principal() {
            None => (Vec::new(), false),
            Some(principal) if principal.is_admin() => (self.requests.find_all_ordered()?, true),
            Some(principal) => (self.requests.find_for_owner(principal.id)?, false),
        };
        ctx.log()
            .debug(format_args!("homepage lists {} request(s)", requests.len()));

        Ok(Outcome::Render(View::Home {
            title: self.settings.messages.title_home.to_string(),
            requests,
            is_admin,
        }))
    }

    /// Returns the request store.
    pub fn requests(&self) -> &R {
        &self.requests
    }
}
