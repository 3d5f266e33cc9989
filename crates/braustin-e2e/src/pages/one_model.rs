//! The single-model detail page and its pricing calculator.

use std::time::Duration;

use braustin_harness::{Error, HarnessConfig, Locator, PageHandle, Result};

use super::base::{BasePage, Header};

/// The model the calculator tests run against.
pub const ONE_MODEL_PATH: &str = "/shop/rgn-the-braustin";

/// Page object for a single model's detail page.
#[derive(Debug, Clone)]
pub struct OneModelPage {
    base: BasePage,
}

impl OneModelPage {
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

    /// Navigates to the reference model with retry.
    pub async fn goto(&self) -> Result<()> {
        self.base.navigate(ONE_MODEL_PATH).await
    }

    pub fn model_name(&self) -> Locator {
        self.page().locator("h1")
    }

    // Credit score tiers

    pub fn fair_credit(&self) -> Locator {
        self.page().locator("#creditClassId-1")
    }

    pub fn good_credit(&self) -> Locator {
        self.page().locator("#creditClassId-2")
    }

    pub fn very_good_credit(&self) -> Locator {
        self.page().locator("#creditClassId-3")
    }

    // Down payment

    pub fn down_payment_input(&self) -> Locator {
        self.page()
            .locator(r#"input[name="downPayment"][placeholder="Enter Down Payment"]"#)
    }

    fn down_payment_percent(&self, percentage: u32) -> Locator {
        self.page().get_by_text(format!("{percentage}%"))
    }

    // Calculator output and delivery inputs

    pub fn monthly_payment(&self) -> Locator {
        self.page().locator("span.text07-b.text-clr-cnt-body-darker")
    }

    pub fn air_conditioner_checkbox(&self) -> Locator {
        self.page().locator(r#"input[type="checkbox"]#air-conditioner"#)
    }

    pub fn zip_code_input(&self) -> Locator {
        self.page()
            .locator(r#"input[name="deliveryZipCode"][placeholder="Enter Zip Code"]"#)
    }

    /// The calculator's submit button (the second "Calculate" on the page).
    pub fn calculate_button(&self) -> Locator {
        self.page().get_by_text("Calculate").nth(1)
    }

    /// Current monthly payment readout.
    pub async fn monthly_payment_text(&self) -> Result<String> {
        self.monthly_payment().inner_text().await
    }

    /// Selects one of the preset down-payment percentages.
    pub async fn set_down_payment_percentage(&self, percentage: u32) -> Result<()> {
        self.down_payment_input()
            .wait_for_visible(Duration::from_secs(5))
            .await?;
        match percentage {
            0 | 5 | 10 | 15 | 20 => self.down_payment_percent(percentage).click().await?,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "invalid down payment percentage: {other}. Must be 0, 5, 10, 15, or 20."
                )));
            }
        }
        self.base.wait_for_page_load().await;
        Ok(())
    }
}
