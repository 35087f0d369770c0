//! REST API for the space-fitting service.
//!
//! Provides one HTTP endpoint per calculation plus the static reference
//! tables. Uses Axum as the web framework and supports CORS.

use axum::extract::Json;
use axum::extract::rejection::JsonRejection;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use std::sync::OnceLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

use crate::carton::{CarrierComplianceResult, CartonFitResult, calculate_carton_fit, check_carrier_compliance};
use crate::config::AppConfig;
use crate::container::{ContainerCalculation, calculate_container_fit};
use crate::dimensions::ResolvedDimensions;
use crate::geometry::Orientation;
use crate::model::{DimensionSource, Product, ProductBatch, ValidationError};
use crate::pallet::{PalletCalculation, calculate_pallet_fit};
use crate::reference::{
    CARRIER_LIMITS, CONTAINER_SPECS, CarrierParcelLimit, ContainerSpec, ContainerType, EUR_PALLET,
    PalletSpec, SHIPPING_CARTONS, ShippingCartonSpec, find_carrier,
};
use crate::summary::{BatchSpaceSummary, calculate_batch_space};
use crate::types::{Dimensions, PackageDimensions, validation};
use crate::volume::{
    CapacityAnalysis, CapacityStatus, VolumeResult, analyze_capacity, calculate_volume,
    format_volume_m3,
};

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>dpp-logistics API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Product, optional batch and quantity as supplied by the data layer.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "product": {
            "name": "Storage crate",
            "height_cm": 20.0,
            "width_cm": 30.0,
            "depth_cm": 40.0,
            "gross_weight_g": 2000.0
        },
        "quantity": 500
    })
)]
pub struct ProductQuantityRequest {
    pub product: Product,
    #[serde(default)]
    #[schema(nullable = true)]
    pub batch: Option<ProductBatch>,
    pub quantity: i64,
}

/// Unit dimensions, quantity and optional unit weight.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "dims": {"height_cm": 20.0, "width_cm": 30.0, "depth_cm": 40.0},
        "quantity": 500,
        "unit_weight_g": 2000.0
    })
)]
pub struct UnitFitRequest {
    pub dims: Dimensions,
    pub quantity: i64,
    #[serde(default)]
    #[schema(nullable = true)]
    pub unit_weight_g: Option<f64>,
}

#[derive(Debug)]
struct ValidatedUnitFit {
    dims: Dimensions,
    quantity: u64,
    unit_weight_g: Option<f64>,
}

impl UnitFitRequest {
    fn into_validated(self) -> Result<ValidatedUnitFit, ValidationError> {
        let dims = self.dims.validated()?;
        let quantity = validation::validate_quantity(self.quantity)?;
        validation::validate_optional_weight(self.unit_weight_g, "Unit weight")?;
        Ok(ValidatedUnitFit {
            dims,
            quantity,
            unit_weight_g: self.unit_weight_g,
        })
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"incoming_m3": 2.5, "location_capacity_m3": 10.0, "current_used_m3": 6.0}))]
pub struct CapacityRequest {
    pub incoming_m3: f64,
    #[serde(default)]
    #[schema(nullable = true)]
    pub location_capacity_m3: Option<f64>,
    #[serde(default)]
    #[schema(nullable = true)]
    pub current_used_m3: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "total_volume_m3": 12.0,
        "pallets_needed": 7,
        "total_weight_kg": 1000.0,
        "container_type": "40ft_hc"
    })
)]
pub struct ContainerFitRequest {
    pub total_volume_m3: f64,
    pub pallets_needed: u64,
    #[serde(default)]
    #[schema(nullable = true)]
    pub total_weight_kg: Option<f64>,
    pub container_type: ContainerType,
}

impl ContainerFitRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_volume(self.total_volume_m3, "Total volume")?;
        validation::validate_optional_weight(self.total_weight_kg, "Total weight")
    }
}

/// Package to check against one carrier or, without `carrier_id`, all carriers.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "package": {"length_cm": 60.0, "width_cm": 40.0, "height_cm": 30.0},
        "weight_kg": 12.5,
        "carrier_id": "dhl_paket"
    })
)]
pub struct CarrierCheckRequest {
    pub package: PackageDimensions,
    #[serde(default)]
    #[schema(nullable = true)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    #[schema(nullable = true)]
    pub carrier_id: Option<String>,
}

impl CarrierCheckRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_dimension(self.package.length_cm, "Length")?;
        validation::validate_dimension(self.package.width_cm, "Width")?;
        validation::validate_dimension(self.package.height_cm, "Height")?;
        validation::validate_optional_weight(self.weight_kg, "Package weight")
    }
}

#[derive(Serialize, ToSchema)]
pub struct VolumeResponse {
    pub result: Option<VolumeResult>,
    pub formatted_unit_volume: Option<String>,
    pub formatted_total_volume: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CapacityResponse {
    pub analysis: Option<CapacityAnalysis>,
}

#[derive(Serialize, ToSchema)]
pub struct CartonFitResponse {
    pub results: Vec<CartonFitResult>,
}

#[derive(Serialize, ToSchema)]
pub struct CarrierCheckResponse {
    pub results: Vec<CarrierComplianceResult>,
}

#[derive(Serialize, ToSchema)]
pub struct BatchSpaceResponse {
    /// `null` when the quantity is not positive or the product is unmeasured.
    pub summary: Option<BatchSpaceSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct ReferenceResponse {
    pub pallet: PalletSpec,
    pub containers: Vec<ContainerSpec>,
    pub cartons: Vec<ShippingCartonSpec>,
    pub carriers: Vec<CarrierParcelLimit>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(err: ValidationError) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        err.to_string(),
    )
}

fn parse_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(err) => Err(json_deserialize_error(err)),
    }
}

fn ok_json<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_volume,
        handle_capacity,
        handle_pallet_fit,
        handle_container_fit,
        handle_carton_fit,
        handle_carrier_check,
        handle_batch_space,
        handle_reference
    ),
    components(
        schemas(
            ProductQuantityRequest,
            UnitFitRequest,
            CapacityRequest,
            ContainerFitRequest,
            CarrierCheckRequest,
            VolumeResponse,
            CapacityResponse,
            CartonFitResponse,
            CarrierCheckResponse,
            BatchSpaceResponse,
            ReferenceResponse,
            ErrorResponse,
            Product,
            ProductBatch,
            Dimensions,
            PackageDimensions,
            DimensionSource,
            ResolvedDimensions,
            Orientation,
            CapacityStatus,
            PalletCalculation,
            ContainerCalculation,
            ContainerType,
            CartonFitResult,
            CarrierComplianceResult,
            BatchSpaceSummary
        )
    ),
    tags(
        (name = "fitting", description = "Volume, pallet, container and carton estimates"),
        (name = "reference", description = "Static logistics reference data")
    )
)]
struct ApiDoc;

/// Builds the application router.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/volume", post(handle_volume))
        .route("/capacity", post(handle_capacity))
        .route("/pallet_fit", post(handle_pallet_fit))
        .route("/container_fit", post(handle_container_fit))
        .route("/carton_fit", post(handle_carton_fit))
        .route("/carrier_check", post(handle_carrier_check))
        .route("/batch_space", post(handle_batch_space))
        .route("/reference", get(handle_reference))
        // API documentation
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Starts the API server.
///
/// Blocks until the server is terminated.
pub async fn start_api_server(config: AppConfig) {
    let addr = config.api.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "could not bind API server");
            return;
        }
    };

    info!(
        host = config.api.display_host(),
        port = config.api.port(),
        json_logs = config.logging.json(),
        "server running on http://{}:{}",
        config.api.display_host(),
        config.api.port()
    );
    if config.api.binds_to_all_interfaces() {
        info!("local access: http://localhost:{}", config.api.port());
    }
    info!("documentation: GET /docs, GET /docs/openapi.json");

    if let Err(err) = axum::serve(listener, router()).await {
        error!(error = %err, "API server terminated with an error");
    }
}

/// Handler for POST /volume.
#[utoipa::path(
    post,
    path = "/volume",
    request_body = ProductQuantityRequest,
    responses(
        (status = 200, description = "Volume, or null result for an unmeasured product", body = VolumeResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_volume(payload: Result<Json<ProductQuantityRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let quantity = match validation::validate_quantity(request.quantity) {
        Ok(quantity) => quantity,
        Err(err) => return validation_error(err),
    };

    let result = calculate_volume(&request.product, quantity, request.batch.as_ref());
    info!(quantity, resolved = result.is_some(), "volume request");

    ok_json(VolumeResponse {
        formatted_unit_volume: result.map(|r| format_volume_m3(r.unit_volume_m3)),
        formatted_total_volume: result.map(|r| format_volume_m3(r.total_volume_m3)),
        result,
    })
}

/// Handler for POST /capacity.
#[utoipa::path(
    post,
    path = "/capacity",
    request_body = CapacityRequest,
    responses(
        (status = 200, description = "Capacity state after adding the incoming volume", body = CapacityResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_capacity(payload: Result<Json<CapacityRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let analysis = analyze_capacity(
        request.incoming_m3,
        request.location_capacity_m3,
        request.current_used_m3,
    );
    info!(
        incoming_m3 = request.incoming_m3,
        status = ?analysis.map(|a| a.status),
        "capacity request"
    );
    ok_json(CapacityResponse { analysis })
}

/// Handler for POST /pallet_fit.
#[utoipa::path(
    post,
    path = "/pallet_fit",
    request_body = UnitFitRequest,
    responses(
        (status = 200, description = "EUR pallet packing estimate", body = PalletCalculation),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_pallet_fit(payload: Result<Json<UnitFitRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload).map(UnitFitRequest::into_validated) {
        Ok(Ok(request)) => request,
        Ok(Err(err)) => return validation_error(err),
        Err(response) => return response,
    };

    let calculation = calculate_pallet_fit(&request.dims, request.quantity, request.unit_weight_g);
    info!(
        quantity = request.quantity,
        units_per_pallet = calculation.units_per_pallet,
        pallets = calculation.pallets_needed,
        weight_limited = calculation.weight_limited,
        "pallet fit request"
    );
    ok_json(calculation)
}

/// Handler for POST /container_fit.
#[utoipa::path(
    post,
    path = "/container_fit",
    request_body = ContainerFitRequest,
    responses(
        (status = 200, description = "Container packing estimate for one container type", body = ContainerCalculation),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_container_fit(payload: Result<Json<ContainerFitRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    if let Err(err) = request.validate() {
        return validation_error(err);
    }

    let calculation = calculate_container_fit(
        request.total_volume_m3,
        request.pallets_needed,
        request.total_weight_kg,
        request.container_type,
    );
    info!(
        container = %request.container_type,
        pallets = request.pallets_needed,
        containers = calculation.containers_needed,
        "container fit request"
    );
    ok_json(calculation)
}

/// Handler for POST /carton_fit.
#[utoipa::path(
    post,
    path = "/carton_fit",
    request_body = UnitFitRequest,
    responses(
        (status = 200, description = "Fitting cartons, fewest cartons first", body = CartonFitResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_carton_fit(payload: Result<Json<UnitFitRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload).map(UnitFitRequest::into_validated) {
        Ok(Ok(request)) => request,
        Ok(Err(err)) => return validation_error(err),
        Err(response) => return response,
    };

    let results = calculate_carton_fit(&request.dims, request.quantity, request.unit_weight_g);
    info!(
        quantity = request.quantity,
        fitting_cartons = results.len(),
        "carton fit request"
    );
    ok_json(CartonFitResponse { results })
}

/// Handler for POST /carrier_check.
#[utoipa::path(
    post,
    path = "/carrier_check",
    request_body = CarrierCheckRequest,
    responses(
        (status = 200, description = "Compliance per carrier", body = CarrierCheckResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request or unknown carrier", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_carrier_check(payload: Result<Json<CarrierCheckRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    if let Err(err) = request.validate() {
        return validation_error(err);
    }

    let carriers: Vec<&CarrierParcelLimit> = match request.carrier_id.as_deref() {
        Some(id) => match find_carrier(id) {
            Some(carrier) => vec![carrier],
            None => {
                return error_response(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unknown carrier",
                    format!("No carrier with id '{}'", id),
                );
            }
        },
        None => CARRIER_LIMITS.iter().collect(),
    };

    let results = carriers
        .into_iter()
        .map(|carrier| check_carrier_compliance(&request.package, request.weight_kg, carrier))
        .collect();
    ok_json(CarrierCheckResponse { results })
}

/// Handler for POST /batch_space.
///
/// A non-positive quantity is not rejected: like an unmeasured product it
/// yields a `null` summary.
#[utoipa::path(
    post,
    path = "/batch_space",
    request_body = ProductQuantityRequest,
    responses(
        (status = 200, description = "Consolidated space summary, or null when not computable", body = BatchSpaceResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid JSON", body = ErrorResponse)
    ),
    tag = "fitting"
)]
async fn handle_batch_space(payload: Result<Json<ProductQuantityRequest>, JsonRejection>) -> Response {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let summary = calculate_batch_space(&request.product, request.batch.as_ref(), request.quantity);
    match &summary {
        Some(summary) => info!(
            quantity = request.quantity,
            pallets = summary.pallet.pallets_needed,
            cartons = summary.cartons.len(),
            warnings = ?summary.warnings,
            "batch space request"
        ),
        None => info!(quantity = request.quantity, "batch space not computable"),
    }
    ok_json(BatchSpaceResponse { summary })
}

/// Handler for GET /reference.
#[utoipa::path(
    get,
    path = "/reference",
    responses(
        (status = 200, description = "Pallet, container, carton and carrier tables", body = ReferenceResponse)
    ),
    tag = "reference"
)]
async fn handle_reference() -> Response {
    ok_json(ReferenceResponse {
        pallet: EUR_PALLET,
        containers: CONTAINER_SPECS.to_vec(),
        cartons: SHIPPING_CARTONS.to_vec(),
        carriers: CARRIER_LIMITS.to_vec(),
    })
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
