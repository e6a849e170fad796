//! Upstream listing schema.
//!
//! The search API is an external contract that gains and drops fields without
//! notice. Every field here is optional. Fields that are only passed through
//! keep whatever JSON value arrives; fields the server computes with are typed,
//! and a value of the wrong type there is treated as missing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field, mapping null or mistyped values to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a list field, dropping elements that do not fit `T`.
/// Anything other than an array yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the listing search and smart-search endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub data: Vec<RawListing>,

    #[serde(default, deserialize_with = "lenient_default")]
    pub meta: SearchMeta,
}

impl SearchResponse {
    /// Upstream total match count; 0 when not reported
    pub fn total(&self) -> u64 {
        self.meta.total.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMeta {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// Envelope returned by the listing detail endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<RawListing>,
}

/// One listing as returned by the upstream API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Value>,

    #[serde(default, deserialize_with = "lenient_default")]
    pub attributes: RawAttributes,
}

impl RawListing {
    /// Listing identifier as a string, accepting string or numeric ids
    pub fn listing_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Full address as text, for matching; `None` when missing or not a string
    pub fn full_address(&self) -> Option<&str> {
        self.attributes.address.as_ref()?.full_address.as_ref()?.as_str()
    }

    pub fn display_address(&self) -> Option<&str> {
        self.attributes.address.as_ref()?.display_address.as_ref()?.as_str()
    }
}

/// The hyphenated `attributes` bag of a listing.
///
/// Fields that are only reshaped keep the upstream JSON value as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub bedroom_count: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub price_display: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<RawAddress>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub open_homes: Vec<RawOpenHome>,

    #[serde(default, deserialize_with = "lenient")]
    pub website_full_url: Option<Value>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub other_features: Vec<RawFeature>,

    #[serde(default, deserialize_with = "lenient")]
    pub parking_garage_count: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_new_construction: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub floor_area: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub land_area: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub bathroom_full_count: Option<Value>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub price_history: Vec<RawPriceChange>,

    #[serde(default, deserialize_with = "lenient")]
    pub deadline_date: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_mortgagee_sale: Option<Value>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub child_cares: Vec<RawOrganization>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub schools: Vec<RawOrganization>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawAddress {
    #[serde(default, deserialize_with = "lenient")]
    pub full_address: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub display_address: Option<Value>,
}

/// Scheduled viewing window, RFC 3339 timestamps
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOpenHome {
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub heading: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawPriceChange {
    #[serde(default, deserialize_with = "lenient")]
    pub from_value: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub to_value: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub created_date: Option<Value>,
}

/// School or childcare centre near a listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawOrganization {
    #[serde(default, deserialize_with = "lenient")]
    pub organization_name: Option<Value>,

    /// Distance, either a number or a string such as `"1.2"` or `"1.2 km"`
    #[serde(default, deserialize_with = "lenient")]
    pub geo_radius: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub in_zone: Option<Value>,
}

impl RawOrganization {
    /// Name used as the sort tiebreak; non-string names sort as `""`
    pub fn name_key(&self) -> &str {
        self.organization_name
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unexpected_types_pass_through() {
        let listing: RawListing = serde_json::from_value(json!({
            "id": "L123",
            "attributes": {
                "bedroom-count": "3",
                "price-display": 650000,
                "land-area": "405 m2",
                "is-new-construction": "yes",
                "is-mortgagee-sale": true,
                "deadline-date": null,
                "open-homes": "soon",
                "schools": [
                    { "organization-name": "Ponsonby Primary", "geo-radius": "0.4", "in-zone": "Y" },
                    42,
                    null
                ]
            }
        }))
        .unwrap();

        let attrs = &listing.attributes;
        assert_eq!(attrs.bedroom_count, Some(json!("3")));
        assert_eq!(attrs.price_display, Some(json!(650000)));
        assert_eq!(attrs.land_area, Some(json!("405 m2")));
        assert_eq!(attrs.is_new_construction, Some(json!("yes")));
        assert_eq!(attrs.is_mortgagee_sale, Some(json!(true)));
        assert!(attrs.deadline_date.is_none());
        assert!(attrs.open_homes.is_empty());
        assert_eq!(attrs.schools.len(), 1);
        assert_eq!(attrs.schools[0].in_zone, Some(json!("Y")));
        assert_eq!(attrs.schools[0].name_key(), "Ponsonby Primary");
        assert_eq!(listing.listing_id().as_deref(), Some("L123"));
    }

    #[test]
    fn test_non_string_address_is_not_matchable() {
        let listing: RawListing = serde_json::from_value(json!({
            "attributes": { "address": { "full-address": 12, "display-address": "12 Queen St" } }
        }))
        .unwrap();
        assert!(listing.full_address().is_none());
        assert_eq!(listing.display_address(), Some("12 Queen St"));
    }

    #[test]
    fn test_missing_attributes_default() {
        let listing: RawListing = serde_json::from_value(json!({ "id": 991 })).unwrap();
        assert_eq!(listing.listing_id().as_deref(), Some("991"));
        assert!(listing.full_address().is_none());
        assert!(listing.attributes.other_features.is_empty());

        let listing: RawListing = serde_json::from_value(json!({ "attributes": null })).unwrap();
        assert!(listing.listing_id().is_none());
    }

    #[test]
    fn test_search_envelope_defaults() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.total(), 0);

        let response: SearchResponse = serde_json::from_value(json!({
            "data": [{ "id": "a" }, { "id": "b" }],
            "meta": { "total": 57 }
        }))
        .unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.total(), 57);
    }

    #[test]
    fn test_blank_id_is_missing() {
        let listing: RawListing = serde_json::from_value(json!({ "id": "  " })).unwrap();
        assert!(listing.listing_id().is_none());
    }
}
