//! Static tool metadata served from `tools/list`.

use rmcp::schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::tools::{GET_LISTING_DETAIL, GET_LISTINGS, GetListingDetailArgs, GetListingsArgs};

/// Metadata for a single tool.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// Helper to build schema from Args type.
fn build_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// All registered tools.
pub fn all_tool_metadata() -> Vec<ToolMetadata> {
    vec![
        ToolMetadata {
            name: GET_LISTINGS,
            description: "Get residential sale listings for one or more suburbs with optional bedroom, \
                price, bathroom, area and car park filters and pagination. Alternatively pass a \
                street address to get the best matching listing with full detail.",
            schema: build_schema::<GetListingsArgs>(),
        },
        ToolMetadata {
            name: GET_LISTING_DETAIL,
            description: "Get full detail for one listing by its id, including open homes, \
                price history and nearby schools and childcares.",
            schema: build_schema::<GetListingDetailArgs>(),
        },
    ]
}

/// Names of all registered tools
pub fn tool_names() -> Vec<&'static str> {
    all_tool_metadata().iter().map(|tool| tool.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_describe_parameters() {
        let tools = all_tool_metadata();
        assert_eq!(tool_names(), vec![GET_LISTINGS, GET_LISTING_DETAIL]);

        let listings = &tools[0].schema;
        assert_eq!(listings["type"], "object");
        for param in ["suburbs", "address", "bedroomsMin", "saleMax", "pageSize"] {
            assert!(
                listings["properties"].get(param).is_some(),
                "missing schema property {param}"
            );
        }

        let detail = &tools[1].schema;
        assert_eq!(detail["required"], serde_json::json!(["listingId"]));
    }
}
