use crate::error::{AuthError, Result, ScrapeError};
use scraper::{Html, Selector};

/// Pulls authentication details out of the sign-in page.
pub struct AuthScraper<'a> {
    document: &'a Html,
}

impl<'a> AuthScraper<'a> {
    pub(crate) fn new(document: &'a Html) -> Self {
        Self { document }
    }

    /// The CSRF token the platform expects back in the login form.
    pub fn authenticity_token(&self) -> Result<String> {
        let selector = Selector::parse("input[name='authenticity_token']")
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let token = self
            .document
            .select(&selector)
            .next()
            .and_then(|input| input.value().attr("value"))
            .ok_or(AuthError::TokenNotFound)?;

        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::scraper::Scraper;

    #[test]
    fn extracts_token_from_sign_in_form() {
        let html = r#"
            <form action="/users/sign_in" method="post">
              <input type="hidden" name="authenticity_token" value="abc123==" />
              <input type="text" name="user[login]" />
            </form>
        "#;

        let scraper = Scraper::new(html);
        assert_eq!(scraper.auth().authenticity_token().unwrap(), "abc123==");
    }

    #[test]
    fn missing_token_is_an_error() {
        let scraper = Scraper::new("<form><input name='user[login]'/></form>");
        assert!(scraper.auth().authenticity_token().is_err());
    }
}
