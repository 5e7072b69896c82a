use crate::client::{Client, ClientResponse};
use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::model::SkillBook;
use crate::scraper::Scraper;
use crate::{log_debug, log_info, log_warn};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

/// Walks the unit -> project -> latest evaluation hierarchy and gathers
/// every skill score into a [`SkillBook`].
pub struct Collector {
    client: Client,
    config: Config,
}

impl Collector {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .base_url(&config.base_url)
            .chrome_impersonation(config.chrome_impersonation)
            .header("user-agent", USER_AGENT)?
            .header("accept", "text/html")?
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn run(&self) -> Result<SkillBook> {
        self.login().await?;

        let units_page = self.fetch_signed_in(&self.config.units_path).await?;
        let units = Scraper::new(&units_page)
            .catalog()
            .with_base_url(&self.config.base_url)
            .units()?;
        log_info!("[collector] Found {} units", units.len());

        let mut book = SkillBook::new();
        for unit in units {
            log_info!("[collector] Unit: {}", unit.name);
            let unit_entry = book.entry(unit.name.clone()).or_default();

            let unit_page = self.fetch_signed_in(&unit.url).await?;
            let projects = Scraper::new(&unit_page)
                .catalog()
                .with_base_url(&self.config.base_url)
                .projects()?;

            for project in projects {
                log_info!("[collector]   Project: {}", project.name);
                let skills_entry = unit_entry.entry(project.name.clone()).or_default();

                let project_page = self.fetch_signed_in(&project.url).await?;
                let review_url = Scraper::new(&project_page)
                    .review()
                    .with_base_url(&self.config.base_url)
                    .latest_evaluation_url()?;

                let Some(review_url) = review_url else {
                    log_info!("[collector]     No evaluation");
                    continue;
                };

                let review_page = self.fetch_signed_in(&review_url).await?;
                let skills = Scraper::new(&review_page).review().skills()?;
                for skill in &skills {
                    log_info!(
                        "[collector]     {}: {} / {}",
                        skill.name,
                        skill.value,
                        skill.max_value
                    );
                }
                *skills_entry = skills;
            }
        }

        Ok(book)
    }

    /// Collects everything and persists the book to the configured output.
    pub async fn collect_and_save(&self) -> Result<SkillBook> {
        let book = self.run().await?;
        crate::utils::save_json(&book, &self.config.output)?;
        log_info!("[collector] Saved skill book to {}", self.config.output);
        Ok(book)
    }

    async fn login(&self) -> Result<()> {
        let (login, password) = self.config.credentials()?;

        let sign_in_page = self.fetch(&self.config.login_path).await?;
        let token = Scraper::new(&sign_in_page.content)
            .auth()
            .authenticity_token()?;

        let response = self
            .client
            .post_form(
                &self.config.login_path,
                &[
                    ("authenticity_token", token.as_str()),
                    ("user[login]", login.as_str()),
                    ("user[password]", password.as_str()),
                ],
            )
            .await?;

        // A rejected login re-renders the sign-in page at the same URL.
        if self.is_sign_in_url(&response.final_url)? {
            return Err(AuthError::LoginRejected { login }.into());
        }

        log_info!("[collector] Signed in as {}", login);
        Ok(())
    }

    /// Fetches a page, re-authenticating once if the platform bounced the
    /// request back to the sign-in page.
    async fn fetch_signed_in(&self, path: &str) -> Result<String> {
        let mut response = self.fetch(path).await?;

        if self.is_sign_in_url(&response.final_url)? {
            log_warn!("[collector] Session expired, signing in again");
            self.login().await?;
            response = self.fetch(path).await?;
            if self.is_sign_in_url(&response.final_url)? {
                let (login, _) = self.config.credentials()?;
                return Err(AuthError::LoginRejected { login }.into());
            }
        }

        if self.config.request_delay > 0 {
            tokio::time::sleep(Duration::from_secs(self.config.request_delay)).await;
        }

        Ok(response.content)
    }

    async fn fetch(&self, path: &str) -> Result<ClientResponse> {
        let mut attempt: u32 = 1;
        loop {
            match self.client.get(path).await {
                Ok(response) => {
                    log_debug!(
                        "[collector] GET {} -> {} ({} bytes)",
                        path,
                        response.status,
                        response.content.len()
                    );
                    return Ok(response);
                }
                Err(e) if attempt < self.config.max_retries => {
                    log_warn!(
                        "[collector] Request for {} failed (attempt {}/{}): {}",
                        path,
                        attempt,
                        self.config.max_retries,
                        e
                    );
                    attempt += 1;
                    tokio::time::sleep(Duration::from_secs(self.config.retry_delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn is_sign_in_url(&self, url: &str) -> Result<bool> {
        let login_url = self.client.resolve(&self.config.login_path)?;
        Ok(url.trim_end_matches('/') == login_url.trim_end_matches('/'))
    }
}
