mod auth;
mod catalog;
mod review;

pub use auth::AuthScraper;
pub use catalog::CatalogScraper;
pub use review::ReviewScraper;

use crate::error::{Result, ScrapeError};
use scraper::Html;
use url::Url;

/// Resolves a scraped href against the page's base URL.
pub(crate) fn join_url(base_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(base_url)
        .map_err(|e| ScrapeError::ParseError(format!("Invalid base URL {}: {}", base_url, e)))?;
    let joined = base
        .join(href)
        .map_err(|e| ScrapeError::ParseError(format!("Invalid href {}: {}", href, e)))?;
    Ok(joined.to_string())
}

/// Entry point for extracting data out of a fetched platform page.
pub struct Scraper {
    document: Html,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn auth(&self) -> AuthScraper {
        AuthScraper::new(&self.document)
    }

    pub fn catalog(&self) -> CatalogScraper {
        CatalogScraper::new(&self.document)
    }

    pub fn review(&self) -> ReviewScraper {
        ReviewScraper::new(&self.document)
    }
}
