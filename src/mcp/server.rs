use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::domain::catalog::Catalog;
use crate::domain::filter::{CategoryFilter, FilterSpec, PriceRange, RawFilter};
use crate::domain::listing::Listing;
use crate::domain::map_view::MapView;
use crate::domain::session::{DashboardRoute, Session, post_login_path, resolve_dashboard};
use crate::domain::tour::TourViewer;

// ---------- Resource Store ----------

/// Rendered listing pages exposed as MCP resources.
/// Keys are URIs like `listing://3`, values are text content.
#[derive(Clone, Default)]
pub struct ResourceStore {
    entries: Arc<RwLock<HashMap<String, ResourceEntry>>>,
}

#[derive(Clone)]
struct ResourceEntry {
    name: String,
    text: String,
}

impl ResourceStore {
    async fn insert(&self, uri: impl Into<String>, name: impl Into<String>, text: String) {
        self.entries.write().await.insert(
            uri.into(),
            ResourceEntry {
                name: name.into(),
                text,
            },
        );
    }

    async fn get(&self, uri: &str) -> Option<ResourceEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .entries
            .read()
            .await
            .iter()
            .map(|(uri, entry)| (uri.clone(), entry.name.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore").finish()
    }
}

// ---------- Tool parameter types ----------

#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ExploreToolParams {
    /// Property type: "all", "apartment", "house", "villa" or "studio" (default: all)
    pub property_type: Option<String>,
    /// Minimum monthly price, inclusive (default: 0)
    pub min_price: Option<f64>,
    /// Maximum monthly price, inclusive (default: 10000)
    pub max_price: Option<f64>,
    /// Bedrooms: "all", "0" for studios only, or "N" for at least N bedrooms (default: all)
    pub bedrooms: Option<String>,
    /// Case-insensitive substring matched against city or street address
    pub location: Option<String>,
    /// Case-insensitive substring matched against title, description, address and city
    pub search: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DetailToolParams {
    /// Listing ID from explore results (e.g. "3")
    pub id: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CategoryToolParams {
    /// Property type: "all", "apartment", "house", "villa" or "studio"
    pub property_type: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PriceRangeToolParams {
    /// Minimum monthly price, inclusive
    pub min_price: f64,
    /// Maximum monthly price, inclusive
    pub max_price: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DashboardToolParams {
    /// Role segment of the requested dashboard URL (e.g. "tenant" in /dashboard/tenant)
    pub role: Option<String>,
}

impl From<ExploreToolParams> for RawFilter {
    fn from(p: ExploreToolParams) -> Self {
        Self {
            property_type: p.property_type,
            min_price: p.min_price,
            max_price: p.max_price,
            bedrooms: p.bedrooms,
            location: p.location,
            search: p.search,
        }
    }
}

// ---------- Rendering ----------

fn render_listings(listings: &[&Listing], empty_message: &str) -> String {
    if listings.is_empty() {
        return format!("{empty_message}\n");
    }
    let mut text = format!("{} properties found:\n\n", listings.len());
    for (i, listing) in listings.iter().enumerate() {
        let _ = writeln!(text, "{}. **{}** (ID: {})", i + 1, listing.title, listing.id);
        let _ = writeln!(
            text,
            "   {}, {}",
            listing.location.address, listing.location.city
        );
        let _ = writeln!(text, "   {listing}\n");
    }
    text
}

fn render_detail(listing: &Listing, related: &[&Listing]) -> String {
    let mut text = listing.summary_detail();

    let map = MapView::new(std::iter::once(listing));
    if let Some(center) = map.center() {
        let (lat, lon) = center.coordinates;
        let _ = writeln!(
            text,
            "\n## Map\n{}, {} ({lat:.4}, {lon:.4})",
            center.address, center.city
        );
    }

    let tour = TourViewer::for_listing(listing);
    let names: Vec<&str> = tour.scenes().iter().map(|s| s.name).collect();
    let _ = writeln!(
        text,
        "\n## Virtual Tour\n{} scenes: {}",
        names.len(),
        names.join(", ")
    );

    if listing.images.len() > 1 {
        let _ = writeln!(text, "\n## Photos");
        for image in &listing.images {
            let _ = writeln!(text, "- {image}");
        }
    }

    if !related.is_empty() {
        let _ = writeln!(text, "\n## Related Properties");
        for other in related {
            let _ = writeln!(text, "- **{}** (ID: {})", other.title, other.id);
        }
    }
    text
}

fn invalid_request(e: &crate::error::ExplorerError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "{e}. Valid property types: all, apartment, house, villa, studio. \
         Bedrooms: all, 0 (studio) or a minimum count. Prices must satisfy 0 <= min <= max."
    ))])
}

// ---------- MCP Server ----------

#[derive(Clone)]
pub struct ExplorerMcpServer {
    catalog: Catalog,
    session: Session,
    tool_router: ToolRouter<Self>,
    resources: ResourceStore,
}

#[tool_router]
impl ExplorerMcpServer {
    pub fn new(catalog: Catalog, session: Session) -> Self {
        Self {
            catalog,
            session,
            tool_router: Self::tool_router(),
            resources: ResourceStore::default(),
        }
    }

    /// Filter listings by type, price, bedrooms, location and free text.
    #[tool(
        name = "explore_listings",
        description = "Filter property listings by type, monthly price range, bedrooms, location (city or street) and free-text search. All filters combine with AND; omitted filters exclude nothing. Results keep catalog order and include listing IDs for listing_details.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn explore_listings(
        &self,
        Parameters(params): Parameters<ExploreToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let spec = match FilterSpec::from_raw(params.into()) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected explore filters");
                return Ok(invalid_request(&e));
            }
        };
        let results = self.catalog.filter(&spec);
        let mut text = render_listings(
            &results,
            "No properties match these filters. Try clearing some of them.",
        );
        if !spec.is_neutral() {
            let _ = writeln!(text, "Active filters: {spec}");
        }
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Full property page: description, amenities, contact, map, tour and related listings.
    #[tool(
        name = "listing_details",
        description = "Get the full property page for a listing: description, amenities, owner contact, map location, virtual tour scenes and related featured properties. Requires a listing ID from explore_listings.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn listing_details(
        &self,
        Parameters(params): Parameters<DetailToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.catalog.get(&params.id) {
            Ok(listing) => {
                let text = render_detail(listing, &self.catalog.related(&listing.id));
                let uri = format!("listing://{}", listing.id);
                let name = format!("Listing: {}", listing.title);
                self.resources.insert(uri, name, text.clone()).await;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "{e}. Use explore_listings to find valid IDs."
            ))])),
        }
    }

    #[tool(
        name = "featured_listings",
        description = "List the featured (promoted) properties shown on the home page.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn featured_listings(&self) -> Result<CallToolResult, McpError> {
        let text = render_listings(&self.catalog.featured(), "No featured properties right now.");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "listings_by_category",
        description = "List properties of one type (apartment, house, villa, studio), or every property for \"all\".",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn listings_by_category(
        &self,
        Parameters(params): Parameters<CategoryToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match params.property_type.parse::<CategoryFilter>() {
            Ok(category) => {
                let text = render_listings(
                    &self.catalog.by_category(category),
                    &format!("No {category} properties available."),
                );
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(invalid_request(&e)),
        }
    }

    #[tool(
        name = "listings_by_price_range",
        description = "List properties whose monthly price lies within an inclusive range.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn listings_by_price_range(
        &self,
        Parameters(params): Parameters<PriceRangeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match PriceRange::new(params.min_price, params.max_price) {
            Ok(range) => {
                let text = render_listings(
                    &self.catalog.by_price_range(range),
                    "No properties in this price range.",
                );
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(invalid_request(&e)),
        }
    }

    /// Resolve which dashboard the current user should see.
    #[tool(
        name = "dashboard_route",
        description = "Resolve a /dashboard/<role> request for the signed-in user: render it, redirect to the user's own role dashboard, or report that the session is not ready.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn dashboard_route(
        &self,
        Parameters(params): Parameters<DashboardToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = match resolve_dashboard(&self.session, params.role.as_deref()) {
            DashboardRoute::Pending => match self.session.profile() {
                Some(profile) => format!(
                    "Dashboard pending: no role in the URL. {} lands on {}",
                    profile.name,
                    post_login_path(profile)
                ),
                None => "Dashboard pending: no signed-in profile.".to_string(),
            },
            DashboardRoute::Redirect { to } => format!("Redirect to {to}"),
            DashboardRoute::Render(role) => {
                let name = self.session.profile().map_or("", |p| p.name.as_str());
                format!("Render {role} dashboard for {name}")
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ExplorerMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Real-estate listing explorer over a fixed catalog snapshot.\n\
                 \n\
                 ## Tools\n\
                 Start with explore_listings to filter properties. Each result includes a listing ID:\n\
                 - listing_details: full property page with map location, virtual tour scenes and related properties\n\
                 - featured_listings: promoted properties\n\
                 - listings_by_category: properties of one type\n\
                 - listings_by_price_range: properties within an inclusive monthly price range\n\
                 - dashboard_route: resolve a /dashboard/<role> request for the signed-in user\n\
                 \n\
                 ## Resources\n\
                 Listing pages fetched via listing_details are kept as listing://<id> resources."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let entries = self.resources.list().await;
        let resources: Vec<Resource> = entries
            .into_iter()
            .map(|(uri, name)| Resource {
                annotations: None,
                raw: RawResource {
                    uri,
                    name,
                    title: None,
                    description: None,
                    mime_type: Some("text/plain".into()),
                    size: None,
                    icons: None,
                    meta: None,
                },
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![ResourceTemplate {
            annotations: None,
            raw: RawResourceTemplate {
                uri_template: "listing://{id}".into(),
                name: "Listing".into(),
                title: Some("Property page".into()),
                description: Some("Full property page (fetched via listing_details)".into()),
                mime_type: Some("text/plain".into()),
                icons: None,
            },
        }];
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match self.resources.get(&request.uri).await {
            Some(entry) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(entry.text, request.uri)],
            }),
            None => Err(McpError::resource_not_found(
                format!("resource not found: {}", request.uri),
                None,
            )),
        }
    }
}
