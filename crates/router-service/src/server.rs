//! HTTP server for the deposit router API.

use axum::{
	extract::{Path, Query, State},
	response::Json,
	routing::{get, post},
	Router,
};
use router_config::{ApiConfig, Config};
use router_core::{DepositRouter, RoutesView};
use router_types::{ContractCallSpec, DepositQuote, StatusRequest, StatusResponse, ToolInfo};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::apis::deposit::{CompleteReceiverBody, ExecutionCallBody, QuoteRequestBody};
use crate::apis::routes::RoutesRequestBody;
use crate::error::APIError;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	pub router: DepositRouter,
	pub config: Arc<Config>,
}

/// Builds the `/api` router.
pub fn create_app(state: AppState) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/deposits/quote", post(handle_deposit_quote))
				.route("/deposits/execution-call", post(handle_execution_call))
				.route("/deposits/receiver/complete", post(handle_receiver_complete))
				.route("/routes", post(handle_routes))
				.route("/status", get(handle_status))
				.route("/yields", get(handle_yields))
				.route("/tools/{key}", get(handle_tool)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	router: DepositRouter,
	config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = create_app(AppState {
		router,
		config: Arc::new(config),
	});

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Deposit router API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /api/deposits/quote requests.
async fn handle_deposit_quote(
	State(state): State<AppState>,
	Json(body): Json<QuoteRequestBody>,
) -> Result<Json<DepositQuote>, APIError> {
	match crate::apis::deposit::process_quote_request(body, &state.router, &state.config).await {
		Ok(quote) => Ok(Json(quote)),
		Err(e) => {
			tracing::warn!("Deposit quote failed: {}", e);
			Err(APIError::from(e))
		},
	}
}

/// Handles POST /api/deposits/execution-call requests.
async fn handle_execution_call(
	State(state): State<AppState>,
	Json(body): Json<ExecutionCallBody>,
) -> Result<Json<ContractCallSpec>, APIError> {
	crate::apis::deposit::process_execution_call(body, &state.router, &state.config)
		.map(Json)
		.map_err(|e| {
			tracing::warn!("Execution call derivation failed: {}", e);
			APIError::from(e)
		})
}

/// Handles POST /api/deposits/receiver/complete requests.
async fn handle_receiver_complete(
	State(state): State<AppState>,
	Json(body): Json<CompleteReceiverBody>,
) -> Result<Json<ContractCallSpec>, APIError> {
	match crate::apis::deposit::process_receiver_completion(body, &state.router).await {
		Ok(call) => Ok(Json(call)),
		Err(e) => {
			tracing::warn!("Receiver completion failed: {}", e);
			Err(APIError::from(e))
		},
	}
}

/// Handles POST /api/routes requests.
async fn handle_routes(
	State(state): State<AppState>,
	Json(body): Json<RoutesRequestBody>,
) -> Result<Json<RoutesView>, APIError> {
	match crate::apis::routes::process_routes_request(body, &state.router, &state.config).await {
		Ok(view) => Ok(Json(view)),
		Err(e) => {
			tracing::warn!("Route request failed: {}", e);
			Err(APIError::from(e))
		},
	}
}

/// Handles GET /api/status requests.
async fn handle_status(
	State(state): State<AppState>,
	Query(request): Query<StatusRequest>,
) -> Result<Json<StatusResponse>, APIError> {
	Ok(Json(state.router.get_status(&request).await?))
}

/// Handles GET /api/yields requests.
async fn handle_yields(
	State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>, APIError> {
	Ok(Json(state.router.yields().await?))
}

/// Handles GET /api/tools/{key} requests.
async fn handle_tool(
	Path(key): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<ToolInfo>, APIError> {
	Ok(Json(crate::apis::routes::get_tool(&key, &state.router).await?))
}
