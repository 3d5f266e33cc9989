//! The filterable all-models listing grid.

use std::time::Duration;

use braustin_harness::{
    BrowsingContext, Error, HarnessConfig, Locator, PageHandle, Result,
};

use super::base::{BasePage, Header};

/// Path of the all-models grid.
pub const ALL_MODELS_PATH: &str = "/shop/all-models";

/// The grid refreshes client-side after a filter click; give it a beat.
const FILTER_SETTLE: Duration = Duration::from_secs(1);

/// How long an opened dropdown gets to render its listbox.
const DROPDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Page object for `/shop/all-models`.
#[derive(Debug, Clone)]
pub struct AllModelsPage {
    base: BasePage,
}

impl AllModelsPage {
    pub fn new(page: PageHandle, config: &HarnessConfig) -> Self {
        Self {
            base: BasePage::new(page, config),
        }
    }

    pub fn page(&self) -> &PageHandle {
        self.base.page()
    }

    pub fn header(&self) -> &Header {
        self.base.header()
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Navigates to the grid with retry.
    pub async fn goto(&self) -> Result<()> {
        self.base.navigate(ALL_MODELS_PATH).await
    }

    // Grid results

    pub fn home_cards(&self) -> Locator {
        self.page().locator("a.homecard")
    }

    pub fn starting_at_price(&self) -> Locator {
        self.page().get_by_partial_text("Starting at")
    }

    pub fn reset_filters_button(&self) -> Locator {
        self.page().get_by_text("Reset Filters")
    }

    pub fn no_items_match(&self) -> Locator {
        self.page().get_by_partial_text("No items match your filters")
    }

    // Section filters (the second "Any"/"Single" link group on the page)

    pub fn section_single(&self) -> Locator {
        self.page().get_by_text_within("a", "Single").nth(1)
    }

    pub fn section_multi(&self) -> Locator {
        self.page().get_by_text_within("a", "Multi").first()
    }

    /// Number of home cards currently rendered.
    pub async fn results_count(&self) -> Result<usize> {
        self.home_cards().count().await
    }

    /// Rendered card titles, for content assertions.
    pub async fn card_titles(&self) -> Result<Vec<String>> {
        self.home_cards().all_inner_texts().await
    }

    /// Waits out the client-side grid refresh after a filter change.
    pub async fn wait_for_filters(&self) {
        self.page().pause(FILTER_SETTLE).await;
    }

    pub async fn reset_filters(&self) -> Result<()> {
        self.reset_filters_button().click().await?;
        self.wait_for_filters().await;
        Ok(())
    }

    /// Clicks the bedroom-count filter (1-5). The bedroom row renders its
    /// numeric links before the bathroom row's.
    pub async fn filter_by_bedrooms(&self, count: u32) -> Result<()> {
        if !(1..=5).contains(&count) {
            return Err(Error::InvalidArgument(format!(
                "bedroom filter must be 1-5, got {count}"
            )));
        }
        self.page()
            .get_by_text_within("a", count.to_string())
            .first()
            .click()
            .await?;
        self.wait_for_filters().await;
        Ok(())
    }

    /// Clicks the bathroom-count filter (1-3); second numeric link group.
    pub async fn filter_by_bathrooms(&self, count: u32) -> Result<()> {
        if !(1..=3).contains(&count) {
            return Err(Error::InvalidArgument(format!(
                "bathroom filter must be 1-3, got {count}"
            )));
        }
        self.page()
            .get_by_text_within("a", count.to_string())
            .nth(1)
            .click()
            .await?;
        self.wait_for_filters().await;
        Ok(())
    }

    pub async fn select_estimated_payment_from(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(0, &format!("{value} /m")).await
    }

    pub async fn select_estimated_payment_to(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(1, &format!("{value} /m")).await
    }

    pub async fn select_size_from(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(2, &format!("{value} /ft2")).await
    }

    pub async fn select_size_to(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(3, &format!("{value} /ft2")).await
    }

    pub async fn select_max_width(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(4, &format!("{value} ft")).await
    }

    pub async fn select_max_length(&self, value: &str) -> Result<()> {
        self.select_from_dropdown(5, &format!("{value} ft")).await
    }

    pub async fn filter_by_manufacturer(&self, manufacturer: &str) -> Result<()> {
        let link = match manufacturer.to_lowercase().as_str() {
            "clayton" => self.page().get_by_text_within("a", "Clayton"),
            "tru" => self.page().get_by_text_within("a", "TRU"),
            "oak creek" => self.page().get_by_text_within("a", "Oak Creek"),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown manufacturer filter: {other}"
                )));
            }
        };
        link.click().await?;
        self.wait_for_filters().await;
        Ok(())
    }

    /// Opens the nth range dropdown and picks the option labeled
    /// `option_label`. Dropdown order follows the filter column: payment
    /// from/to, size from/to, max width, max length.
    async fn select_from_dropdown(&self, button_index: usize, option_label: &str) -> Result<()> {
        self.page()
            .locator(r#"button[aria-label="select button"]"#)
            .nth(button_index)
            .click()
            .await?;

        // Listboxes share the dropdown order, offset by the two section
        // listboxes that precede the range filters in the markup.
        self.page()
            .locator(r#"ul[role="listbox"]"#)
            .nth(2 + button_index)
            .wait_for_visible(DROPDOWN_TIMEOUT)
            .await?;

        // Only the opened listbox renders its options.
        self.page()
            .get_by_text_within("ul[role='listbox'] a", option_label)
            .click()
            .await?;
        self.wait_for_filters().await;
        Ok(())
    }
}
