pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use poem::{
    Endpoint, EndpointExt,
    middleware::{Cors, Tracing as PoemTracing},
};
use poem_openapi::OpenApiService;

use crate::{config::Config, session::engine::BrowserEngine, web};

pub use routes::BrowserApi;

/// HTML pages at `/`, the JSON API at `/api`, RapiDoc at `/ui` and the OpenAPI document at `/spec`.
pub fn app(engine: Arc<BrowserEngine>, config: Arc<Config>) -> impl Endpoint {
    let version = env!("CARGO_PKG_VERSION");
    let api = BrowserApi {
        engine: engine.clone(),
        config,
    };
    let api_service = OpenApiService::new(api, "Book Browser API", version).server("/api");
    let ui = api_service.rapidoc();
    let spec = api_service.spec();
    web::routes()
        .nest("/api", api_service)
        .nest("/ui", ui)
        .nest("/spec", poem::endpoint::make_sync(move |_| spec.clone()))
        .data(engine)
        .with(Cors::new())
        .with(PoemTracing)
}
