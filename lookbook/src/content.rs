//! Declarative look book content.
//!
//! Everything the renderer prints comes from here; the page routines in
//! [`crate::pages`] only decide where it goes.

use serde::Deserialize;

use crate::settings::RenderSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct Lookbook {
    #[serde(default)]
    pub settings: RenderSettings,
    pub title: String,
    pub brand: Brand,
    pub cover: Cover,
    pub contents: Contents,
    pub story: Story,
    pub sections: Vec<Section>,
}

impl Lookbook {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Brand {
    /// Printed inside the fallback mark when no logo image is usable.
    pub logo_label: String,
    pub tagline: String,
    #[serde(default)]
    pub contact: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cover {
    pub subtitle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contents {
    pub heading: String,
    pub photo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Story {
    pub category: String,
    pub title: String,
    pub photo: String,
    pub paragraphs: Vec<String>,
    pub signature: Signature,
    pub logo_title: String,
    pub logo_meanings: Vec<Benefit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signature {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// A contents entry together with the pages that present it.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub category: String,
    pub title: String,
    /// Photo caption for the divider spread; sections without one go
    /// straight to their services.
    #[serde(default)]
    pub divider_photo: Option<String>,
    /// Caption for a full-bleed photo page after the divider.
    #[serde(default)]
    pub feature_photo: Option<String>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    pub pricing: Pricing,
    pub photo: String,
    #[serde(default)]
    pub extra_info: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Benefit {
    pub title: String,
    pub description: String,
}

/// Either one price line or a list of tiers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Pricing {
    Single(String),
    Tiers(Vec<String>),
}
