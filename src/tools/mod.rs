//! Listing tools exposed over MCP.

pub mod args;
pub mod report;
pub mod service;

pub use args::{GET_LISTING_DETAIL, GET_LISTINGS, GetListingDetailArgs, GetListingsArgs};
pub use report::ToolReport;
pub use service::{InvalidArgs, ListingService};
