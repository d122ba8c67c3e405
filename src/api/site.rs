use super::PloneClient;
use crate::error::GatewayError;
use crate::i18n::{LanguageSettings, SiteResponse};
use tracing::warn;

impl PloneClient {
    /// Fetch the site's language settings.
    ///
    /// Never fails: any error yields [`LanguageSettings::fallback`], a
    /// single-language configuration that disables redirects.
    pub async fn fetch_site_settings(&self) -> LanguageSettings {
        match self.try_fetch_site_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Falling back to single-language settings: {}", e);
                LanguageSettings::fallback()
            }
        }
    }

    async fn try_fetch_site_settings(&self) -> Result<LanguageSettings, GatewayError> {
        let url = self.endpoint("/@site");
        let site: SiteResponse = self.get_json(&url).await?;
        Ok(site.into())
    }
}
