//! MCP server handler: prompt and resource registration and dispatch.

use std::future::Future;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    Annotated, GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
    ListResourcesResult, PaginatedRequestParam, Prompt, PromptMessage, PromptMessageRole,
    RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use tracing::{info, info_span, warn};

use crate::catalog::identity::RESOURCE_ROOT;
use crate::catalog::resources::normalize_locator;
use crate::catalog::{PromptItem, ResourceItem};
use crate::{AppError, Result};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "embed-mcp";

/// MCP server exposing registered prompts and resources.
///
/// Registration order is preserved for `prompts/list` and `resources/list`.
/// Requests naming anything that was not registered fail with
/// `AppError::NotFound` before a handler runs, so entries excluded by the
/// startup filter stay unreachable.
#[derive(Debug, Default)]
pub struct EmbedServer {
    prompts: Vec<PromptItem>,
    resources: Vec<ResourceItem>,
}

impl EmbedServer {
    /// Create a server with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every prompt in `items`, returning the server for chaining.
    #[must_use]
    pub fn with_prompts(mut self, items: impl IntoIterator<Item = PromptItem>) -> Self {
        for item in items {
            self.register_prompt(item);
        }
        self
    }

    /// Register every resource in `items`, returning the server for chaining.
    #[must_use]
    pub fn with_resources(mut self, items: impl IntoIterator<Item = ResourceItem>) -> Self {
        for item in items {
            self.register_resource(item);
        }
        self
    }

    /// Register one prompt. A second prompt with an already registered name
    /// is ignored.
    pub fn register_prompt(&mut self, item: PromptItem) {
        let name = &item.descriptor.name;
        if self.prompts.iter().any(|p| &p.descriptor.name == name) {
            warn!(%name, "duplicate prompt name, keeping first registration");
            return;
        }
        info!(index = self.prompts.len() + 1, %name, "registering prompt");
        self.prompts.push(item);
    }

    /// Register one resource. A second resource with an already registered
    /// URI is ignored.
    pub fn register_resource(&mut self, item: ResourceItem) {
        let uri = &item.descriptor.uri;
        if self.resources.iter().any(|r| &r.descriptor.uri == uri) {
            warn!(%uri, "duplicate resource URI, keeping first registration");
            return;
        }
        info!(
            index = self.resources.len() + 1,
            name = %item.descriptor.name,
            "registering resource"
        );
        self.resources.push(item);
    }

    /// Number of registered prompts.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    /// Number of registered resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Registered prompts in protocol form.
    #[must_use]
    pub fn prompt_list(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|item| {
                Prompt::new(
                    item.descriptor.name.clone(),
                    Some(item.descriptor.description.clone()),
                    None,
                )
            })
            .collect()
    }

    /// Registered resources in protocol form.
    #[must_use]
    pub fn resource_list(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|item| {
                let descriptor = &item.descriptor;
                let mut raw = RawResource::new(descriptor.uri.clone(), descriptor.name.clone());
                raw.description = Some(descriptor.description.clone());
                raw.mime_type = Some(descriptor.mime_type.as_str().to_owned());
                Annotated::new(raw, None)
            })
            .collect()
    }

    /// Serve `prompts/get` for `name`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no prompt with that name is registered
    /// or its template cannot be read.
    pub fn fetch_prompt(&self, name: &str) -> Result<GetPromptResult> {
        let item = self
            .prompts
            .iter()
            .find(|item| item.descriptor.name == name)
            .ok_or_else(|| AppError::NotFound(format!("prompt not found: {name}")))?;

        let rendered = item.handler.handle(name)?;
        info!(name, bytes = rendered.text.len(), "prompt served");

        Ok(GetPromptResult {
            description: Some(item.descriptor.description.clone()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                rendered.text,
            )],
        })
    }

    /// Serve `resources/read` for `uri`.
    ///
    /// The URI is normalized before lookup, so equivalent spellings such as
    /// `embedded://data/./report.csv` reach the registered entry.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidRequest` or `AppError::UnsupportedScheme` for
    /// malformed or foreign URIs, and `AppError::NotFound` if the resolved
    /// path is not registered or cannot be read.
    pub fn fetch_resource(&self, uri: &str) -> Result<ReadResourceResult> {
        let relative = normalize_locator(uri)?;
        let item = self
            .resources
            .iter()
            .find(|item| item.descriptor.name == relative)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "embedded resource not found: {RESOURCE_ROOT}/{relative}"
                ))
            })?;

        let content = item.handler.handle(uri)?;
        info!(uri, mime = %content.mime_type, bytes = content.text.len(), "resource served");

        let mut contents = ResourceContents::text(content.text, content.uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(content.mime_type.as_str().to_owned());
        }

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

impl ServerHandler for EmbedServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.into();
        server_info.version = env!("CARGO_PKG_VERSION").into();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info,
            instructions: Some(
                "Serves bundled prompt templates (prompts/get) and text resources \
                 (resources/read) addressed by embedded:// URIs."
                    .into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListPromptsResult, rmcp::ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListPromptsResult::with_all_items(self.prompt_list())))
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<GetPromptResult, rmcp::ErrorData>> + Send + '_
    {
        let _span = info_span!("get_prompt", prompt = %request.name).entered();
        let result = self.fetch_prompt(&request.name).map_err(|err| {
            warn!(%err, "prompt request failed");
            rmcp::ErrorData::from(err)
        });
        std::future::ready(result)
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListResourcesResult, rmcp::ErrorData>> + Send + '_
    {
        std::future::ready(Ok(ListResourcesResult::with_all_items(
            self.resource_list(),
        )))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ReadResourceResult, rmcp::ErrorData>> + Send + '_
    {
        let _span = info_span!("read_resource", uri = %request.uri).entered();
        let result = self.fetch_resource(&request.uri).map_err(|err| {
            warn!(%err, "resource request failed");
            rmcp::ErrorData::from(err)
        });
        std::future::ready(result)
    }
}
