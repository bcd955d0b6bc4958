// src/capture/mod.rs
//! Page-text capture: where the job description comes from.

use async_trait::async_trait;

pub mod page_scraper;

pub use page_scraper::PageSelection;

#[async_trait]
pub trait SelectionCapture: Send + Sync {
    /// Current selection, or `None` when nothing usable could be captured.
    async fn capture_selection(&self) -> Option<String>;
}

#[async_trait]
impl<T: SelectionCapture + ?Sized> SelectionCapture for Box<T> {
    async fn capture_selection(&self) -> Option<String> {
        (**self).capture_selection().await
    }
}

/// A selection that is already in hand (pasted, piped or read from a file).
#[derive(Debug, Clone, Default)]
pub struct TextSelection {
    text: Option<String>,
}

impl TextSelection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SelectionCapture for TextSelection {
    async fn capture_selection(&self) -> Option<String> {
        self.text
            .as_ref()
            .filter(|text| !text.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_selection_returns_text_untrimmed() {
        let selection = TextSelection::new("  Senior Rust engineer  ");
        assert_eq!(
            selection.capture_selection().await.as_deref(),
            Some("  Senior Rust engineer  ")
        );
    }

    #[tokio::test]
    async fn test_blank_selection_is_absent() {
        assert_eq!(TextSelection::new("\n  \t").capture_selection().await, None);
        assert_eq!(TextSelection::empty().capture_selection().await, None);
    }
}
