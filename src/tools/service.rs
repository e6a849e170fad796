//! Orchestration behind the listing tools.
//!
//! `get-listings` takes one of two paths:
//! - address: smart search, pick the best candidate, fetch its detail
//! - suburbs: resolve codes, one filtered search request
//!
//! Upstream failures and lookup misses come back as [`ToolReport`]s, not errors.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use super::args::{GetListingDetailArgs, GetListingsArgs, ListingTarget};
use super::report::ToolReport;
use crate::api::{ListingsApi, SALE_CATEGORY};
use crate::listing::{format_listing, format_listings};
use crate::matcher::match_best;
use crate::query::QueryParams;
use crate::suburbs::SuburbDirectory;

/// Property type filter applied to every suburb search (residential houses)
pub const PROPERTY_TYPES: &[u32] = &[1];

/// Aggregations requested alongside suburb searches
pub const META_AGGREGATIONS: &str = "popular.res_rent,popular.res_sale";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidArgs {
    #[error("Either `address` or `suburbs` must be provided")]
    MissingTarget,

    #[error("`listingId` must not be empty")]
    EmptyListingId,
}

#[derive(Debug, Clone)]
pub struct ListingService {
    suburbs: Arc<SuburbDirectory>,
    api: ListingsApi,
}

impl ListingService {
    pub fn new(suburbs: Arc<SuburbDirectory>, api: ListingsApi) -> Self {
        Self { suburbs, api }
    }

    pub fn suburbs(&self) -> &SuburbDirectory {
        &self.suburbs
    }

    /// Handle a `get-listings` call
    pub async fn get_listings(&self, args: &GetListingsArgs) -> Result<ToolReport, InvalidArgs> {
        match args.target().ok_or(InvalidArgs::MissingTarget)? {
            ListingTarget::Address(address) => Ok(self.listing_by_address(&address).await),
            ListingTarget::Suburbs(names) => Ok(self.listings_by_suburbs(&names, args).await),
        }
    }

    /// Handle a `get-listing-detail` call
    pub async fn get_listing_detail(
        &self,
        args: &GetListingDetailArgs,
    ) -> Result<ToolReport, InvalidArgs> {
        let listing_id = args.listing_id.trim();
        if listing_id.is_empty() {
            return Err(InvalidArgs::EmptyListingId);
        }

        Ok(match self.api.listing_detail(listing_id).await {
            Ok(raw) => ToolReport::Single {
                label: format!("listing {listing_id}"),
                listing: Box::new(format_listing(&raw, Utc::now())),
            },
            Err(err) => ToolReport::Failed(err),
        })
    }

    async fn listing_by_address(&self, address: &str) -> ToolReport {
        let candidates = match self.api.smart_search(address).await {
            Ok(response) => response.data,
            Err(err) => return ToolReport::Failed(err),
        };

        let Some(listing_id) = match_best(address, &candidates).and_then(|l| l.listing_id())
        else {
            log::debug!(
                "No usable match for address {address:?} among {} candidates",
                candidates.len()
            );
            return ToolReport::NoAddressMatch(address.to_string());
        };

        log::debug!("Address {address:?} matched listing {listing_id}");

        match self.api.listing_detail(&listing_id).await {
            Ok(raw) => ToolReport::Single {
                label: address.to_string(),
                listing: Box::new(format_listing(&raw, Utc::now())),
            },
            Err(err) => ToolReport::Failed(err),
        }
    }

    async fn listings_by_suburbs(&self, names: &[String], args: &GetListingsArgs) -> ToolReport {
        let mut resolved = Vec::new();
        let mut codes = Vec::new();
        let mut unknown = Vec::new();

        for name in names {
            match self.suburbs.resolve(name) {
                Some(code) => {
                    resolved.push(name.as_str());
                    codes.push(code);
                }
                None => unknown.push(name.clone()),
            }
        }

        if codes.is_empty() {
            return ToolReport::UnknownSuburbs(unknown);
        }
        if !unknown.is_empty() {
            log::debug!("Ignoring unknown suburbs: {}", unknown.join(", "));
        }

        let params = suburb_query(&codes, args);
        let label = resolved.join(", ");
        let operation = format!("Failed to fetch listings for {label}");

        match self.api.search_listings(&params, &operation).await {
            Ok(response) => ToolReport::Page {
                total: response.total(),
                listings: format_listings(&response.data, Utc::now()),
                label,
            },
            Err(err) => ToolReport::Failed(err),
        }
    }
}

/// Query for a suburb search: fixed category and property type, suburb codes,
/// the caller's numeric filters, pagination and aggregations
pub fn suburb_query(codes: &[u32], args: &GetListingsArgs) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .set_list("filter[category]", [SALE_CATEGORY])
        .set_list("filter[propertyType]", PROPERTY_TYPES)
        .set_list("filter[suburb]", codes);

    for (name, value) in args.filters() {
        params.set(format!("filter[{name}]"), value);
    }

    params
        .set("page[offset]", args.page_offset())
        .set("page[limit]", args.page_size())
        .set("meta[aggs]", META_AGGREGATIONS);
    params
}
