use super::join_url;
use crate::error::{Result, ScrapeError};
use crate::log_debug;
use crate::model::{Project, Unit};
use scraper::{ElementRef, Html, Selector};

const UNIT_LINKS: &str = "div#unit-menus a";
const PROJECT_CARDS: &str = "div[id$='_timeline'] .row div.flex-column";
// Older unit pages lay the timeline out without the .row wrapper.
const PROJECT_CARDS_FALLBACK: &str = "div[id$='_timeline'] .timeline-container .flex-column";

/// Extracts the unit and project listings that make up the first two
/// levels of the hierarchy.
pub struct CatalogScraper<'a> {
    document: &'a Html,
    base_url: String,
}

impl<'a> CatalogScraper<'a> {
    pub(crate) fn new(document: &'a Html) -> Self {
        Self {
            document,
            base_url: "https://2600.rbean.io".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Units listed in the sidebar menu of the units page.
    pub fn units(&self) -> Result<Vec<Unit>> {
        let selector = Selector::parse(UNIT_LINKS)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let mut units = Vec::new();
        for link in self.document.select(&selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            units.push(Unit {
                name: link.text().collect::<String>().trim().to_string(),
                url: join_url(&self.base_url, href)?,
            });
        }

        log_debug!("[scraper] Found {} units", units.len());
        Ok(units)
    }

    /// Project cards on a unit's timeline page. Tries the current markup
    /// first and falls back to the older layout when nothing matches.
    pub fn projects(&self) -> Result<Vec<Project>> {
        let selector = Selector::parse(PROJECT_CARDS)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let mut cards: Vec<ElementRef> = self.document.select(&selector).collect();
        if cards.is_empty() {
            let fallback = Selector::parse(PROJECT_CARDS_FALLBACK)
                .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
            cards = self.document.select(&fallback).collect();
        }

        let mut projects = Vec::new();
        for card in cards {
            projects.push(self.parse_project(card)?);
        }

        log_debug!("[scraper] Found {} projects", projects.len());
        Ok(projects)
    }

    fn parse_project(&self, card: ElementRef) -> Result<Project> {
        let link_selector =
            Selector::parse("a").map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
        let title_selector =
            Selector::parse("h5, h6").map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let link = card
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ScrapeError::MissingElement("project card link".to_string()))?;

        let title = card
            .select(&title_selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("project card title".to_string()))?;

        Ok(Project {
            name: title.text().collect::<String>().trim().to_string(),
            url: join_url(&self.base_url, link)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::scraper::Scraper;

    const BASE: &str = "https://campus.example.org";

    #[test]
    fn units_from_menu_links() {
        let html = r#"
            <div id="unit-menus">
              <a href="/units/12"> Piscine </a>
              <a href="/units/34">Kernel</a>
            </div>
            <a href="/elsewhere">not a unit</a>
        "#;

        let units = Scraper::new(html)
            .catalog()
            .with_base_url(BASE)
            .units()
            .unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].name, "Piscine");
        assert_eq!(units[0].url, "https://campus.example.org/units/12");
        assert_eq!(units[1].name, "Kernel");
    }

    #[test]
    fn no_menu_means_no_units() {
        let units = Scraper::new("<div><a href='/x'>x</a></div>")
            .catalog()
            .with_base_url(BASE)
            .units()
            .unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn projects_from_timeline_cards() {
        let html = r#"
            <div id="kernel_timeline">
              <div class="row">
                <div class="flex-column">
                  <a href="/projects/ft_ls"><h5>ft_ls</h5></a>
                </div>
                <div class="flex-column">
                  <a href="/projects/minishell"><h6> minishell </h6></a>
                </div>
              </div>
            </div>
        "#;

        let projects = Scraper::new(html)
            .catalog()
            .with_base_url(BASE)
            .projects()
            .unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "ft_ls");
        assert_eq!(projects[0].url, "https://campus.example.org/projects/ft_ls");
        assert_eq!(projects[1].name, "minishell");
    }

    #[test]
    fn projects_fall_back_to_older_timeline_markup() {
        let html = r#"
            <div id="piscine_timeline">
              <div class="timeline-container">
                <div class="flex-column">
                  <a href="/projects/libft"><h5>libft</h5></a>
                </div>
              </div>
            </div>
        "#;

        let projects = Scraper::new(html)
            .catalog()
            .with_base_url(BASE)
            .projects()
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "libft");
    }

    #[test]
    fn card_without_title_is_an_error() {
        let html = r#"
            <div id="x_timeline">
              <div class="row">
                <div class="flex-column"><a href="/projects/p">no heading</a></div>
              </div>
            </div>
        "#;

        let result = Scraper::new(html).catalog().with_base_url(BASE).projects();
        assert!(result.is_err());
    }
}
