//! Reshape upstream listings into the compact schema returned to tool callers.
//!
//! Every scalar field is always present in the output and serializes as
//! `null` when the upstream value is missing. Present values are copied
//! through with whatever JSON type the upstream sent.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::model::{RawListing, RawOpenHome, RawOrganization};

/// Schools and childcares kept per listing
pub const NEARBY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedListing {
    pub id: Option<String>,
    pub bedrooms: Option<Value>,
    pub price: Option<Value>,
    pub address: Option<Value>,
    pub earliest_open_home: Option<String>,
    pub url: Option<Value>,
    pub other_features: Vec<Feature>,
    pub parking_garage_count: Option<Value>,
    pub is_new_construction: Option<Value>,
    pub floor_area: Option<Value>,
    pub land_area: Option<Value>,
    pub bathroom_full_count: Option<Value>,
    pub price_history: Vec<PriceChange>,
    pub deadline_date: Option<Value>,
    pub price_display: Option<Value>,
    pub is_mortgagee_sale: Option<Value>,
    pub child_cares: Vec<NearbyOrganization>,
    pub schools: Vec<NearbyOrganization>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub heading: Option<Value>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChange {
    pub from: Option<Value>,
    pub to: Option<Value>,
    pub date: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyOrganization {
    pub name: Option<Value>,
    pub distance: Option<Value>,
    pub in_zone: Option<Value>,
}

/// Format a single listing relative to `now`
pub fn format_listing(raw: &RawListing, now: DateTime<Utc>) -> FormattedListing {
    let attrs = &raw.attributes;

    FormattedListing {
        id: raw.listing_id(),
        bedrooms: attrs.bedroom_count.clone(),
        price: attrs.price_display.clone(),
        address: attrs
            .address
            .as_ref()
            .and_then(|address| address.full_address.clone()),
        earliest_open_home: earliest_open_home(&attrs.open_homes, now),
        url: attrs.website_full_url.clone(),
        other_features: attrs
            .other_features
            .iter()
            .map(|feature| Feature {
                heading: feature.heading.clone(),
                value: feature.value.clone(),
            })
            .collect(),
        parking_garage_count: attrs.parking_garage_count.clone(),
        is_new_construction: attrs.is_new_construction.clone(),
        floor_area: attrs.floor_area.clone(),
        land_area: attrs.land_area.clone(),
        bathroom_full_count: attrs.bathroom_full_count.clone(),
        price_history: attrs
            .price_history
            .iter()
            .map(|change| PriceChange {
                from: change.from_value.clone(),
                to: change.to_value.clone(),
                date: change.created_date.clone(),
            })
            .collect(),
        deadline_date: attrs.deadline_date.clone(),
        price_display: attrs.price_display.clone(),
        is_mortgagee_sale: attrs.is_mortgagee_sale.clone(),
        child_cares: nearest(&attrs.child_cares),
        schools: nearest(&attrs.schools),
    }
}

/// Format a page of listings, preserving order
pub fn format_listings(raw: &[RawListing], now: DateTime<Utc>) -> Vec<FormattedListing> {
    raw.iter().map(|listing| format_listing(listing, now)).collect()
}

/// Start time of the earliest open home that has not yet ended.
///
/// Open homes with an unparseable `end` are never upcoming. Among upcoming
/// ones, unparseable `start` values sort after parseable ones and the first
/// entry wins ties.
pub fn earliest_open_home(open_homes: &[RawOpenHome], now: DateTime<Utc>) -> Option<String> {
    open_homes
        .iter()
        .filter(|open_home| {
            open_home
                .end
                .as_deref()
                .and_then(parse_timestamp)
                .is_some_and(|end| end > now)
        })
        .min_by(|a, b| {
            let a = a.start.as_deref().and_then(parse_timestamp);
            let b = b.start.as_deref().and_then(parse_timestamp);
            match (a, b) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
        .and_then(|open_home| open_home.start.clone())
}

/// Parse an RFC 3339 timestamp, or a zone-less one taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Closest organizations first, name as tiebreak, truncated to [`NEARBY_LIMIT`]
fn nearest(organizations: &[RawOrganization]) -> Vec<NearbyOrganization> {
    let mut ranked: Vec<(f64, &RawOrganization)> = organizations
        .iter()
        .map(|org| (distance_key(org.geo_radius.as_ref()), org))
        .collect();

    ranked.sort_by(|(da, a), (db, b)| {
        da.total_cmp(db)
            .then_with(|| a.name_key().cmp(b.name_key()))
    });

    ranked
        .into_iter()
        .take(NEARBY_LIMIT)
        .map(|(_, org)| NearbyOrganization {
            name: org.organization_name.clone(),
            distance: org.geo_radius.clone(),
            in_zone: org.in_zone.clone(),
        })
        .collect()
}

/// Numeric sort key for a distance; missing or unparseable sorts last
fn distance_key(distance: Option<&Value>) -> f64 {
    let parsed = match distance {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_number(s),
        _ => None,
    };
    parsed.filter(|d| !d.is_nan()).unwrap_or(f64::INFINITY)
}

/// Parse the leading decimal number of a string, ignoring any unit suffix
fn leading_number(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            '-' | '+' if idx == 0 => {}
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    raw[..end].parse().ok()
}
