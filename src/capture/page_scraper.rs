// src/capture/page_scraper.rs
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

use super::SelectionCapture;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Containers tried in order when no selector is given.
const DESCRIPTION_SELECTORS: [&str; 9] = [
    ".jobs-description__container",
    ".jobs-box__html-content",
    "[data-test-id='job-description']",
    "#job-description",
    "[class*='job-description']",
    "[class*='description']",
    "article",
    "main",
    "body",
];

/// Captures the text a CSS selector picks out of a job posting page.
pub struct PageSelection {
    client: Client,
    url: String,
    selector: Option<String>,
}

impl PageSelection {
    pub fn new(url: &str, selector: Option<String>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            selector,
        })
    }

    async fn fetch(&self) -> Option<String> {
        info!("Fetching job page: {}", self.url);

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch job page {}: {}", self.url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Job page {} returned {}", self.url, response.status());
            return None;
        }

        match response.text().await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!("Failed to read job page body: {}", e);
                None
            }
        }
    }

    /// Text of every element matching `selector`, or of the first fallback container.
    pub fn extract(html: &str, selector: Option<&str>) -> Option<String> {
        let document = Html::parse_document(html);

        match selector {
            Some(selector_str) => {
                let selector = match Selector::parse(selector_str) {
                    Ok(selector) => selector,
                    Err(e) => {
                        warn!("Invalid selector '{}': {}", selector_str, e);
                        return None;
                    }
                };
                let text = document
                    .select(&selector)
                    .map(|element| Self::clean_text(&element.text().collect::<Vec<_>>().join(" ")))
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                (!text.is_empty()).then_some(text)
            }
            None => Self::find_text_by_selectors(&document, &DESCRIPTION_SELECTORS),
        }
    }

    fn find_text_by_selectors(document: &Html, selectors: &[&str]) -> Option<String> {
        for selector_str in selectors {
            if let Ok(selector) = Selector::parse(selector_str) {
                if let Some(element) = document.select(&selector).next() {
                    let text = Self::clean_text(&element.text().collect::<Vec<_>>().join(" "));
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }

    fn clean_text(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[async_trait]
impl SelectionCapture for PageSelection {
    async fn capture_selection(&self) -> Option<String> {
        let html = self.fetch().await?;
        let text = Self::extract(&html, self.selector.as_deref());
        if text.is_none() {
            warn!("Nothing selected on {}", self.url);
        }
        text
    }
}
