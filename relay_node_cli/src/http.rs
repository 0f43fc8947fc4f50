// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use async_graphql::dynamic::Schema;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::Extension;
use axum::http::Method;
use axum::response::{self, IntoResponse};
use axum::routing::get;
use axum::Router;
use http::header::CONTENT_TYPE;
use log::{debug, info};
use tower_http::cors::{Any, CorsLayer};

/// Route to the GraphQL playground and API.
pub const GRAPHQL_ROUTE: &str = "/graphql";

/// Handle GraphQL playground requests at the given path.
async fn handle_graphql_playground(path: &str) -> impl IntoResponse {
    response::Html(playground_source(GraphQLPlaygroundConfig::new(path)))
}

/// Handle GraphQL requests.
async fn handle_graphql_query(
    Extension(schema): Extension<Schema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Build HTTP server with GraphQL API.
pub fn build_server(schema: Schema) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false)
        .allow_origin(Any);

    Router::new()
        // Add GraphQL routes
        .route(
            GRAPHQL_ROUTE,
            get(|| handle_graphql_playground(GRAPHQL_ROUTE)).post(handle_graphql_query),
        )
        // Add middlewares
        .layer(cors)
        // Add shared schema
        .layer(Extension(schema))
}

/// Start HTTP server and serve until [CTRL] + [C] got pressed.
pub async fn http_service(http_port: u16, schema: Schema) -> Result<()> {
    let http_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), http_port);

    info!("GraphQL API available at http://{http_address}{GRAPHQL_ROUTE}");

    axum::Server::try_bind(&http_address)?
        .serve(build_server(schema).into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            debug!("Shutting down HTTP service");
        })
        .await?;

    Ok(())
}
