//! Core types: transcript messages, vehicle records, leads and crawl reports.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::carousel::Carousel;

/// Who produced a message. Drives alignment only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// Rendering variant of a message, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    PlainText,
    ModelList,
    VariantList,
    VariantDetail,
    Comparison,
    LeadForm,
}

/// Price as the backend sends it: a number or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) if v.fract() == 0.0 => write!(f, "{}", *v as i64),
            Price::Amount(v) => write!(f, "{:.2}", v),
            Price::Text(s) => f.write_str(s),
        }
    }
}

/// Scalar shown as text: strings as-is, numbers and booleans stringified, anything else absent.
fn display_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Model year sent as a number or a numeric string.
fn display_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A single vehicle configuration. Display-only; nothing is validated or derived, and a
/// descriptor of an unexpected type never rejects the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleVariant {
    #[serde(deserialize_with = "display_text")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "display_text")]
    pub model: Option<String>,
    #[serde(
        alias = "variant_name",
        alias = "variantName",
        deserialize_with = "display_text"
    )]
    pub variant: Option<String>,
    #[serde(deserialize_with = "display_text")]
    pub engine: Option<String>,
    #[serde(deserialize_with = "display_text")]
    pub transmission: Option<String>,
    #[serde(alias = "drivetrain", deserialize_with = "display_text")]
    pub drive: Option<String>,
    #[serde(alias = "fuel_type", alias = "fuelType", deserialize_with = "display_text")]
    pub fuel: Option<String>,
    pub price: Option<Price>,
    #[serde(alias = "image_url", alias = "imageUrl", deserialize_with = "display_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "display_year")]
    pub year: Option<u32>,
}

impl VehicleVariant {
    /// Label used on cards and as the lead's vehicle identifier: "brand model variant",
    /// skipping missing parts.
    pub fn title(&self) -> String {
        let parts: Vec<&str> = [&self.brand, &self.model, &self.variant]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "Unnamed vehicle".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Engine/transmission/drive/fuel joined with " · ", skipping missing parts.
    pub fn descriptors(&self) -> String {
        [&self.engine, &self.transmission, &self.drive, &self.fuel]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Detailed information about one variant: the record plus free-form specs and features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantDetail {
    #[serde(flatten)]
    pub variant: VehicleVariant,
    pub features: Vec<String>,
    pub specs: BTreeMap<String, Value>,
}

impl VariantDetail {
    /// Specs as display pairs; strings are shown bare, everything else as JSON.
    pub fn spec_lines(&self) -> Vec<(String, String)> {
        self.specs
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}

/// One record of the inventory service (`GET /models`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryCar {
    pub name: String,
    pub image: Option<String>,
    #[serde(deserialize_with = "display_year")]
    pub year: Option<u32>,
    pub price: Option<Price>,
}

impl From<InventoryCar> for VehicleVariant {
    fn from(car: InventoryCar) -> Self {
        VehicleVariant {
            model: Some(car.name),
            image: car.image,
            year: car.year,
            price: car.price,
            ..VehicleVariant::default()
        }
    }
}

/// A prospective customer's contact submission. Wire body of `POST /saveInterest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub car: String,
}

/// Success body of the crawl service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    #[serde(rename = "Total_pages")]
    pub total_pages: u64,
    #[serde(rename = "Execution_Time")]
    pub execution_time: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

impl CrawlReport {
    /// Processed URLs in the order the backend returned them.
    pub fn urls(&self) -> &[String] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// A list of cards together with the carousel that pages through it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardList<T> {
    pub items: Vec<T>,
    pub carousel: Carousel,
}

impl<T> CardList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let carousel = Carousel::new(items.len());
        Self { items, carousel }
    }

    /// Card under the carousel, if the list is not empty.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.carousel.index())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Variant-specific payload of a message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    PlainText {
        text: String,
        suggestions: Vec<String>,
        citations: Vec<String>,
    },
    ModelList {
        models: Vec<String>,
    },
    VariantList {
        variants: CardList<VehicleVariant>,
        recommendations: CardList<VehicleVariant>,
    },
    VariantDetail {
        details: Vec<VariantDetail>,
    },
    Comparison {
        variants: CardList<VariantDetail>,
    },
    LeadForm,
}

impl MessageBody {
    pub fn text(text: impl Into<String>) -> Self {
        MessageBody::PlainText {
            text: text.into(),
            suggestions: Vec::new(),
            citations: Vec::new(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            MessageBody::PlainText { .. } => MessageKind::PlainText,
            MessageBody::ModelList { .. } => MessageKind::ModelList,
            MessageBody::VariantList { .. } => MessageKind::VariantList,
            MessageBody::VariantDetail { .. } => MessageKind::VariantDetail,
            MessageBody::Comparison { .. } => MessageKind::Comparison,
            MessageBody::LeadForm => MessageKind::LeadForm,
        }
    }
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub origin: Origin,
    pub body: MessageBody,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(origin: Origin, body: MessageBody) -> Self {
        Self {
            origin,
            body,
            created_at: Utc::now(),
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Origin::User, MessageBody::text(text))
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, MessageBody::text(text))
    }

    pub fn kind(&self) -> MessageKind {
        self.body.kind()
    }

    /// Body of a plain-text message; None for every other kind.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::PlainText { text, .. } => Some(text),
            _ => None,
        }
    }
}
