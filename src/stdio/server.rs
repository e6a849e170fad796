// src/stdio/server.rs
use anyhow::Result;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
};
use serde::de::DeserializeOwned;

use super::metadata::all_tool_metadata;
use crate::tools::{
    GET_LISTING_DETAIL, GET_LISTINGS, GetListingDetailArgs, GetListingsArgs, ListingService,
    ToolReport,
};

/// MCP Server that provides the listing tools over stdio
pub struct RealEstateServer {
    service: ListingService,
}

impl RealEstateServer {
    pub fn new(service: ListingService) -> Self {
        Self { service }
    }

    /// Serve the stdio server until the client disconnects
    pub async fn serve_stdio(self) -> Result<()> {
        log::info!("Starting stdio server");

        let service = self.serve(stdio()).await.inspect_err(|e| {
            log::error!("serving error: {e:?}");
        })?;
        service.waiting().await?;

        log::info!("Stdio server stopped");
        Ok(())
    }

    /// Run one tool by name with raw JSON arguments
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolReport, McpError> {
        let report = match tool_name {
            GET_LISTINGS => {
                let args: GetListingsArgs = parse_args(tool_name, arguments)?;
                self.service.get_listings(&args).await
            }
            GET_LISTING_DETAIL => {
                let args: GetListingDetailArgs = parse_args(tool_name, arguments)?;
                self.service.get_listing_detail(&args).await
            }
            _ => {
                return Err(McpError::invalid_params(
                    format!("Unknown tool: {tool_name}"),
                    None,
                ));
            }
        };

        report.map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

fn parse_args<T: DeserializeOwned>(
    tool_name: &str,
    arguments: serde_json::Map<String, serde_json::Value>,
) -> Result<T, McpError> {
    serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
        McpError::invalid_params(
            format!("Invalid arguments for '{tool_name}': {e}"),
            None,
        )
    })
}

impl ServerHandler for RealEstateServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                title: None,
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Real estate listings for {} known suburbs. Use get-listings with suburb names \
                 or a street address; use get-listing-detail with a listing id.",
                self.service.suburbs().len()
            )),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_name = request.name.clone();
        log::debug!("Calling tool '{tool_name}'");

        let report = self
            .dispatch(&tool_name, request.arguments.unwrap_or_default())
            .await?;

        let content = vec![Content::text(report.render())];
        if report.is_error() {
            log::warn!("Tool '{tool_name}' failed: {}", report.render());
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools: Vec<Tool> = all_tool_metadata()
            .into_iter()
            .map(|tool_meta| {
                // Convert schema Value to Arc<JsonObject>
                let schema_obj = match tool_meta.schema {
                    serde_json::Value::Object(obj) => std::sync::Arc::new(obj),
                    _ => std::sync::Arc::new(serde_json::Map::new()),
                };

                Tool {
                    name: tool_meta.name.into(),
                    title: None,
                    description: Some(tool_meta.description.into()),
                    input_schema: schema_obj,
                    output_schema: None,
                    annotations: None,
                    icons: None,
                    meta: None,
                }
            })
            .collect();

        log::debug!("Serving {} tools", tools.len());

        Ok(ListToolsResult::with_all_items(tools))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ListingsApi;
    use crate::suburbs::SuburbDirectory;
    use std::sync::Arc;

    fn server() -> RealEstateServer {
        let suburbs = SuburbDirectory::from_entries([("Ponsonby", 84)]);
        let api = ListingsApi::new("http://127.0.0.1:9").unwrap();
        RealEstateServer::new(ListingService::new(Arc::new(suburbs), api))
    }

    #[test]
    fn test_server_info_names_this_crate() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "realestate-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_only_tools_capability_advertised() {
        let capabilities = server().get_info().capabilities;
        assert!(capabilities.tools.is_some());
        assert!(capabilities.prompts.is_none());
        assert!(capabilities.resources.is_none());
    }
}
