//! OpenAPI document.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::ServerBuilder;
use utoipa::{Modify, OpenApi};

use crate::completion::{ChatMessage, Role};
use crate::config::DocsConfig;
use crate::schemas::{CompletionRequest, ImageUpload, MessageResponse, NameRequest};

/// Adds the `Bearer` scheme referenced by `security(("Bearer" = []))`.
struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::hello::hello,
        crate::routes::hello::hello_name,
        crate::routes::hello::hello_post,
        crate::routes::image::image_post,
        crate::routes::secure::auth_hello,
        crate::routes::operation::long_running_operation,
        crate::routes::completion::create_completion,
    ),
    components(schemas(
        MessageResponse,
        NameRequest,
        ImageUpload,
        CompletionRequest,
        ChatMessage,
        Role
    )),
    modifiers(&BearerAddon),
    tags(
        (name = "hello", description = "Greeting examples"),
        (name = "auth", description = "Bearer token example"),
        (name = "operations", description = "Operations bounded by the global timeout"),
        (name = "completion", description = "Chat completion pass-through"),
    )
)]
pub struct ApiDoc;

/// The document with title, version and servers taken from configuration.
pub fn build_openapi(config: &DocsConfig) -> utoipa::openapi::OpenApi {
    let mut document = ApiDoc::openapi();
    document.info.title = config.title.clone();
    document.info.version = config.version.clone();
    document.servers = Some(
        config
            .servers
            .iter()
            .map(|s| {
                ServerBuilder::new()
                    .url(s.url.clone())
                    .description(s.description.clone())
                    .build()
            })
            .collect(),
    );
    document
}
