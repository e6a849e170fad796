//! Tool argument types. Their JSON schemas are advertised in `tools/list`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GET_LISTINGS: &str = "get-listings";
pub const GET_LISTING_DETAIL: &str = "get-listing-detail";

/// Default page size for suburb searches
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Numeric arguments are JSON numbers of any form; clients that send every
/// number as a float (`1500000.0`) are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetListingsArgs {
    /// Suburb names to search, e.g. ["Ponsonby", "Grey Lynn"]
    #[serde(default)]
    pub suburbs: Option<Vec<String>>,

    /// Single suburb name (merged ahead of `suburbs`)
    #[serde(default)]
    pub suburb: Option<String>,

    /// Free-text street address. When given, suburb filters are ignored and
    /// the best matching listing is returned with full detail.
    #[serde(default)]
    pub address: Option<String>,

    /// Minimum bedrooms
    #[serde(default)]
    pub bedrooms_min: Option<f64>,

    /// Maximum bedrooms
    #[serde(default)]
    pub bedrooms_max: Option<f64>,

    /// Minimum sale price
    #[serde(default)]
    pub sale_min: Option<f64>,

    /// Maximum sale price
    #[serde(default)]
    pub sale_max: Option<f64>,

    /// Minimum bathrooms
    #[serde(default)]
    pub bathrooms_min: Option<f64>,

    /// Minimum land area (m²)
    #[serde(default)]
    pub land_area_min: Option<f64>,

    /// Maximum land area (m²)
    #[serde(default)]
    pub land_area_max: Option<f64>,

    /// Minimum floor area (m²)
    #[serde(default)]
    pub floor_area_min: Option<f64>,

    /// Maximum floor area (m²)
    #[serde(default)]
    pub floor_area_max: Option<f64>,

    /// Minimum number of car parks
    #[serde(default)]
    pub carparks: Option<f64>,

    /// Page offset for pagination (default 0)
    #[serde(default)]
    pub page_offset: Option<f64>,

    /// Number of listings per page (default 20)
    #[serde(default)]
    pub page_size: Option<f64>,
}

/// Which lookup path a `get-listings` call takes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    Address(String),
    Suburbs(Vec<String>),
}

impl GetListingsArgs {
    /// Address takes priority; otherwise the non-blank suburb names, `suburb` first.
    /// `None` when neither was given.
    pub fn target(&self) -> Option<ListingTarget> {
        if let Some(address) = self.address.as_deref().map(str::trim)
            && !address.is_empty()
        {
            return Some(ListingTarget::Address(address.to_string()));
        }

        let names: Vec<String> = self
            .suburb
            .iter()
            .chain(self.suburbs.iter().flatten())
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        (!names.is_empty()).then_some(ListingTarget::Suburbs(names))
    }

    /// Numeric filters as `(upstream filter name, value)`, omitting absent ones
    pub fn filters(&self) -> Vec<(&'static str, String)> {
        // f64 Display drops a zero fraction: 1500000.0 -> "1500000"
        [
            ("bedroomsMin", self.bedrooms_min),
            ("bedroomsMax", self.bedrooms_max),
            ("bathroomsMin", self.bathrooms_min),
            ("carparks", self.carparks),
            ("saleMin", self.sale_min),
            ("saleMax", self.sale_max),
            ("landAreaMin", self.land_area_min),
            ("landAreaMax", self.land_area_max),
            ("floorAreaMin", self.floor_area_min),
            ("floorAreaMax", self.floor_area_max),
        ]
        .into_iter()
        .filter_map(|(name, value)| Some((name, value?.to_string())))
        .collect()
    }

    /// Page offset, truncated to a whole number; negative values become 0
    pub fn page_offset(&self) -> u32 {
        self.page_offset.map_or(0, |offset| offset as u32)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.map_or(DEFAULT_PAGE_SIZE, |size| size as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetListingDetailArgs {
    /// Upstream listing identifier, as returned in the `id` field of a listing
    pub listing_id: String,
}
