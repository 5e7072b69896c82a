use super::join_url;
use crate::error::{Result, ScrapeError};
use crate::log_debug;
use crate::model::Skill;
use scraper::{ElementRef, Html, Selector};

const PAST_FEEDBACKS: &str = "div#past-feedbacks";
const SKILLS_CONTAINER: &str = "div#review-skills";
const SKILL_CARDS: &str = "div.flex-column";
const SKILL_NAME: &str = "div.text-center";
const SKILL_VALUE: &str = "div.circle-text";

/// Extracts evaluation data: the link to a project's latest evaluation
/// and the skill scores on an evaluation page.
pub struct ReviewScraper<'a> {
    document: &'a Html,
    base_url: String,
}

impl<'a> ReviewScraper<'a> {
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

    /// URL of the most recent evaluation on a project page, or None when
    /// the project has never been evaluated.
    pub fn latest_evaluation_url(&self) -> Result<Option<String>> {
        let block_selector = Selector::parse(PAST_FEEDBACKS)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
        let link_selector =
            Selector::parse("a").map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        // Feedback blocks are newest-first; only the first one matters.
        let Some(latest) = self.document.select(&block_selector).next() else {
            return Ok(None);
        };

        let href = latest
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ScrapeError::MissingElement("evaluation link".to_string()))?;

        Ok(Some(join_url(&self.base_url, href)?))
    }

    /// Skill cards of an evaluation page.
    pub fn skills(&self) -> Result<Vec<Skill>> {
        let container_selector = Selector::parse(SKILLS_CONTAINER)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
        let card_selector = Selector::parse(SKILL_CARDS)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let container = self
            .document
            .select(&container_selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("review skills container".to_string()))?;

        let mut skills = Vec::new();
        for card in container.select(&card_selector) {
            skills.push(self.parse_skill(card)?);
        }

        log_debug!("[scraper] Found {} skills", skills.len());
        Ok(skills)
    }

    fn parse_skill(&self, card: ElementRef) -> Result<Skill> {
        let name_selector = Selector::parse(SKILL_NAME)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
        let value_selector = Selector::parse(SKILL_VALUE)
            .map_err(|e| ScrapeError::SelectorError(e.to_string()))?;
        let span_selector =
            Selector::parse("span").map_err(|e| ScrapeError::SelectorError(e.to_string()))?;

        let name = card
            .select(&name_selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("skill name".to_string()))?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        let value_el = card
            .select(&value_selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("skill value".to_string()))?;

        // The score is the circle's direct text; the max lives in a child
        // span as "/N", so descendant text must not be mixed in.
        let value_text: String = value_el
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect();
        let value: f64 = value_text.trim().parse().map_err(|_| {
            ScrapeError::ParseError(format!("Bad skill value for {}: {:?}", name, value_text))
        })?;

        let max_text = value_el
            .select(&span_selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("skill max value".to_string()))?
            .text()
            .collect::<String>();
        let max_value: u32 = max_text
            .trim()
            .trim_start_matches('/')
            .trim()
            .parse()
            .map_err(|_| {
            ScrapeError::ParseError(format!("Bad skill max for {}: {:?}", name, max_text))
        })?;

        Ok(Skill {
            name,
            value,
            max_value,
        })
    }
}
