//! Page objects for the Braustin Homes site.
//!
//! Each page object composes a [`BasePage`] (shared header and retrying
//! navigation) rather than inheriting from it; locators are thin mappings
//! to the site's markup and are expected to be regenerated whenever the
//! markup changes.
//!
//! [`BasePage`]: base::BasePage

mod all_models;
mod base;
mod one_model;

pub use all_models::{ALL_MODELS_PATH, AllModelsPage};
pub use base::{BasePage, Header};
pub use one_model::{ONE_MODEL_PATH, OneModelPage};
