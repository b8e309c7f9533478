//! Chat backend reply decoding.
//!
//! The backend signals the kind of reply by which fields are present. [`RawChatReply`] is the
//! wire shape, decoded leniently (a field with an unexpected shape counts as absent);
//! [`ChatReply`] is the tagged union the widget renders, produced once by an ordered match:
//!
//! 1. model names
//! 2. vehicle variants (array, or a JSON-encoded string of one) with bundled recommendations
//! 3. variant details
//! 4. variant comparison (two or more variants)
//! 5. plain text, with follow-up suggestions and citations
//!
//! The first non-empty one wins; later fields are ignored.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{CardList, MessageBody, MessageKind, VariantDetail, VehicleVariant};

/// Text used when a plain reply carries no response string.
pub const NO_INFORMATION_FOUND: &str = "No specific information found.";

/// `vehicleVariants` arrives either as an array or as a string holding a JSON array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariantsField {
    List(Vec<VehicleVariant>),
    Encoded(String),
}

impl VariantsField {
    /// Resolves the field to records. An encoded string that does not parse counts as absent.
    pub fn into_variants(self) -> Option<Vec<VehicleVariant>> {
        match self {
            VariantsField::List(list) => Some(list),
            VariantsField::Encoded(encoded) => match serde_json::from_str(&encoded) {
                Ok(list) => Some(list),
                Err(e) => {
                    warn!(error = %e, "vehicleVariants string is not a JSON list of variants");
                    None
                }
            },
        }
    }
}

/// Reply body of `POST /chat/` as sent on the wire.
///
/// Each field is looked up under its canonical camelCase key first and then under the names
/// other deployments of the backend use. The first key whose value has the expected shape wins;
/// later duplicates and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChatReply {
    pub response: Option<String>,
    pub model_names: Option<Vec<String>>,
    pub vehicle_variants: Option<VariantsField>,
    pub recommended_variants: Option<Vec<VehicleVariant>>,
    pub variant_details: Option<Vec<VariantDetail>>,
    pub compare_variants: Option<Vec<VariantDetail>>,
    pub suggestions: Option<Vec<String>>,
    pub citations: Option<Vec<String>>,
}

const RESPONSE_KEYS: &[&str] = &["response", "responses"];
const MODEL_NAME_KEYS: &[&str] = &["modelNames", "models", "model_names"];
const VEHICLE_VARIANT_KEYS: &[&str] = &["vehicleVariants", "vehiclevariants", "vehicle_variants"];
const RECOMMENDED_KEYS: &[&str] = &["recommendedVariants", "recommendations", "recommended_variants"];
const VARIANT_DETAIL_KEYS: &[&str] = &["variantDetails", "variantInfo", "variant_details"];
const COMPARE_KEYS: &[&str] = &["compareVariants", "compare_variants"];
const SUGGESTION_KEYS: &[&str] = &["suggestions", "followUps", "follow_ups"];
const CITATION_KEYS: &[&str] = &["citations", "links"];

/// First candidate key present with a value of the expected shape. Null counts as absent; a
/// shape mismatch is logged and the next key is tried.
fn pick<T: DeserializeOwned>(map: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    keys.iter().find_map(|key| {
        let value = map.get(*key).filter(|v| !v.is_null())?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(field = %key, error = %e, "reply field has an unexpected shape, ignoring it");
                None
            }
        }
    })
}

impl RawChatReply {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        RawChatReply {
            response: pick(map, RESPONSE_KEYS),
            model_names: pick(map, MODEL_NAME_KEYS),
            vehicle_variants: pick(map, VEHICLE_VARIANT_KEYS),
            recommended_variants: pick(map, RECOMMENDED_KEYS),
            variant_details: pick(map, VARIANT_DETAIL_KEYS),
            compare_variants: pick(map, COMPARE_KEYS),
            suggestions: pick(map, SUGGESTION_KEYS),
            citations: pick(map, CITATION_KEYS),
        }
    }

    /// Reads a reply from any JSON value. A bare string is taken as the response text; any other
    /// non-object yields an empty reply (rendered as the fallback text).
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => RawChatReply {
                response: Some(text),
                ..RawChatReply::default()
            },
            Value::Object(map) => RawChatReply::from_map(&map),
            _ => RawChatReply::default(),
        }
    }
}

impl<'de> Deserialize<'de> for RawChatReply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawChatReply::from_value)
    }
}

/// A decoded chat reply: exactly one rendering variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    ModelList(Vec<String>),
    VariantList {
        variants: Vec<VehicleVariant>,
        recommendations: Vec<VehicleVariant>,
    },
    VariantDetail(Vec<VariantDetail>),
    Comparison(Vec<VariantDetail>),
    Text {
        text: String,
        suggestions: Vec<String>,
        citations: Vec<String>,
    },
}

fn non_empty<T>(list: Option<Vec<T>>) -> Option<Vec<T>> {
    at_least(list, 1)
}

fn at_least<T>(list: Option<Vec<T>>, len: usize) -> Option<Vec<T>> {
    list.filter(|l| l.len() >= len)
}

/// A comparison needs two or more variants; a single one falls through to text.
const MIN_COMPARED: usize = 2;

impl From<RawChatReply> for ChatReply {
    fn from(raw: RawChatReply) -> Self {
        let variants = raw.vehicle_variants.and_then(VariantsField::into_variants);
        match (
            non_empty(raw.model_names),
            non_empty(variants),
            non_empty(raw.variant_details),
            at_least(raw.compare_variants, MIN_COMPARED),
        ) {
            (Some(models), _, _, _) => ChatReply::ModelList(models),
            (None, Some(variants), _, _) => ChatReply::VariantList {
                variants,
                recommendations: raw.recommended_variants.unwrap_or_default(),
            },
            (None, None, Some(details), _) => ChatReply::VariantDetail(details),
            (None, None, None, Some(compared)) => ChatReply::Comparison(compared),
            (None, None, None, None) => ChatReply::Text {
                text: raw
                    .response
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| NO_INFORMATION_FOUND.to_string()),
                suggestions: raw.suggestions.unwrap_or_default(),
                citations: raw.citations.unwrap_or_default(),
            },
        }
    }
}

impl ChatReply {
    pub fn from_value(value: Value) -> Self {
        RawChatReply::from_value(value).into()
    }

    /// Kind of the message this reply renders as.
    pub fn kind(&self) -> MessageKind {
        match self {
            ChatReply::ModelList(_) => MessageKind::ModelList,
            ChatReply::VariantList { .. } => MessageKind::VariantList,
            ChatReply::VariantDetail(_) => MessageKind::VariantDetail,
            ChatReply::Comparison(_) => MessageKind::Comparison,
            ChatReply::Text { .. } => MessageKind::PlainText,
        }
    }
}

impl From<ChatReply> for MessageBody {
    fn from(reply: ChatReply) -> Self {
        match reply {
            ChatReply::ModelList(models) => MessageBody::ModelList { models },
            ChatReply::VariantList {
                variants,
                recommendations,
            } => MessageBody::VariantList {
                variants: CardList::new(variants),
                recommendations: CardList::new(recommendations),
            },
            ChatReply::VariantDetail(details) => MessageBody::VariantDetail { details },
            ChatReply::Comparison(compared) => MessageBody::Comparison {
                variants: CardList::new(compared),
            },
            ChatReply::Text {
                text,
                suggestions,
                citations,
            } => MessageBody::PlainText {
                text,
                suggestions,
                citations,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> ChatReply {
        ChatReply::from_value(value)
    }

    #[test]
    fn test_model_list_wins_over_every_other_field() {
        let reply = decode(json!({
            "response": "Here are our models",
            "modelNames": ["Corolla", "Camry"],
            "vehicleVariants": [{"brand": "Toyota", "model": "Corolla"}],
            "variantDetails": [{"model": "Corolla", "specs": {"seats": 5}}],
            "compareVariants": [{"model": "Corolla"}, {"model": "Camry"}],
            "suggestions": ["Compare them"]
        }));
        assert_eq!(
            reply,
            ChatReply::ModelList(vec!["Corolla".to_string(), "Camry".to_string()])
        );
    }

    #[test]
    fn test_variants_win_over_details_and_carry_recommendations() {
        let reply = decode(json!({
            "vehicleVariants": [{"brand": "Toyota", "model": "Corolla", "variant": "LE"}],
            "recommendedVariants": [{"brand": "Toyota", "model": "Corolla Cross"}],
            "variantDetails": [{"model": "Corolla"}]
        }));
        match reply {
            ChatReply::VariantList {
                variants,
                recommendations,
            } => {
                assert_eq!(variants.len(), 1);
                assert_eq!(variants[0].variant.as_deref(), Some("LE"));
                assert_eq!(recommendations[0].title(), "Toyota Corolla Cross");
            }
            other => panic!("expected variant list, got {:?}", other),
        }
    }

    #[test]
    fn test_variants_encoded_as_json_string_are_parsed() {
        let encoded = r#"[{"brand":"Kia","model":"Seltos","price":21000}]"#;
        let reply = decode(json!({ "vehiclevariants": encoded }));
        match reply {
            ChatReply::VariantList { variants, .. } => {
                assert_eq!(variants[0].title(), "Kia Seltos");
            }
            other => panic!("expected variant list, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_variant_string_falls_through() {
        let reply = decode(json!({
            "vehicleVariants": "not json at all",
            "variantDetails": [{"brand": "Kia", "model": "Sonet"}]
        }));
        assert_eq!(reply.kind(), MessageKind::VariantDetail);
    }

    #[test]
    fn test_empty_lists_do_not_match() {
        let reply = decode(json!({
            "modelNames": [],
            "vehicleVariants": [],
            "variantDetails": [],
            "compareVariants": [{"model": "A"}, {"model": "B"}]
        }));
        match reply {
            ChatReply::Comparison(compared) => assert_eq!(compared.len(), 2),
            other => panic!("expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_keeps_suggestions_and_citations() {
        let reply = decode(json!({
            "response": "The Corolla seats five.",
            "suggestions": ["Show me the price"],
            "citations": ["https://example.com/corolla"]
        }));
        assert_eq!(
            reply,
            ChatReply::Text {
                text: "The Corolla seats five.".to_string(),
                suggestions: vec!["Show me the price".to_string()],
                citations: vec!["https://example.com/corolla".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_response_uses_fallback_text() {
        for value in [json!({}), json!({"response": null}), json!(42), json!({"response": "  "})] {
            match decode(value) {
                ChatReply::Text { text, .. } => assert_eq!(text, NO_INFORMATION_FOUND),
                other => panic!("expected text, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_legacy_responses_field_and_bare_string() {
        match decode(json!({"responses": "Hello there"})) {
            ChatReply::Text { text, .. } => assert_eq!(text, "Hello there"),
            other => panic!("expected text, got {:?}", other),
        }
        match decode(json!("Just text")) {
            ChatReply::Text { text, .. } => assert_eq!(text, "Just text"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_mis_shaped_field_is_ignored_not_fatal() {
        let reply = decode(json!({
            "modelNames": "Corolla",
            "response": "We have the Corolla."
        }));
        match reply {
            ChatReply::Text { text, .. } => assert_eq!(text, "We have the Corolla."),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_becomes_message_body_with_fresh_carousels() {
        let body: MessageBody = decode(json!({
            "vehicleVariants": [{"model": "A"}, {"model": "B"}, {"model": "C"}]
        }))
        .into();
        match body {
            MessageBody::VariantList {
                variants,
                recommendations,
            } => {
                assert_eq!(variants.carousel.len(), 3);
                assert_eq!(variants.carousel.index(), 0);
                assert!(recommendations.is_empty());
            }
            other => panic!("expected variant list, got {:?}", other),
        }
    }

    #[test]
    fn test_model_list_survives_duplicate_field_names() {
        let reply = decode(json!({
            "modelNames": ["Corolla"],
            "models": {"count": 1},
            "response": "a",
            "responses": "b"
        }));
        assert_eq!(reply, ChatReply::ModelList(vec!["Corolla".to_string()]));
    }

    #[test]
    fn test_canonical_key_wins_over_alternate_name() {
        match decode(json!({"response": "first", "responses": "second", "links": ["https://x.com"]})) {
            ChatReply::Text {
                text, citations, ..
            } => {
                assert_eq!(text, "first");
                assert_eq!(citations, vec!["https://x.com".to_string()]);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_alternate_name_used_when_canonical_is_mis_shaped() {
        let reply = decode(json!({"modelNames": 7, "models": ["Camry"]}));
        assert_eq!(reply, ChatReply::ModelList(vec!["Camry".to_string()]));
    }

    #[test]
    fn test_variants_with_numeric_descriptors_and_string_year() {
        let reply = decode(json!({
            "vehicleVariants": [{"brand": "Toyota", "model": "Corolla", "engine": 1.8, "year": "2024"}],
            "response": "fallback"
        }));
        match reply {
            ChatReply::VariantList { variants, .. } => {
                assert_eq!(variants[0].engine.as_deref(), Some("1.8"));
                assert_eq!(variants[0].year, Some(2024));
            }
            other => panic!("expected variant list, got {:?}", other),
        }
    }

    #[test]
    fn test_single_compared_variant_falls_through_to_text() {
        let reply = decode(json!({
            "compareVariants": [{"model": "A"}],
            "response": "Only one variant matched."
        }));
        match reply {
            ChatReply::Text { text, .. } => assert_eq!(text, "Only one variant matched."),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_reply_deserializes_through_serde() {
        let raw: RawChatReply =
            serde_json::from_str(r#"{"modelNames":["Sonet"],"models":"Sonet"}"#).unwrap();
        assert_eq!(raw.model_names, Some(vec!["Sonet".to_string()]));
    }
}
