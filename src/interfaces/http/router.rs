//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    CatalogService, CustomerService, DashboardService, OrderService, UserService,
};
use crate::domain::{OrderStatus, RepositoryProvider, ServiceCategory, TransitionPolicy};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PageQuery, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{http_metrics_middleware, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, customers, dashboard, health, metrics as metrics_api, orders, services,
};

/// Everything the router needs to build its handler states
pub struct ApiContext {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub transition_policy: TransitionPolicy,
    pub default_page_size: u32,
    pub prometheus: PrometheusHandle,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::list_customer_orders,
        // Services
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        // Orders
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order_status,
        // Dashboard
        dashboard::get_dashboard_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<orders::OrderDto>,
            PaginatedResponse<customers::CustomerDto>,
            PageQuery,
            OrderStatus,
            ServiceCategory,
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::AuthResponse,
            auth::UserInfo,
            // Customers
            customers::CustomerDto,
            customers::CustomerRequest,
            // Services
            services::ServiceItemDto,
            services::ServiceItemRequest,
            // Orders
            orders::OrderDto,
            orders::OrderItemDto,
            orders::CreateOrderRequest,
            orders::OrderLineDto,
            orders::UpdateStatusRequest,
            // Dashboard
            dashboard::DashboardStatsDto,
            // Health
            health::HealthResponse,
            health::DatabaseHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Staff login (JWT) and registration"),
        (name = "Customers", description = "Customer records and their order history"),
        (name = "Services", description = "Priced service catalog"),
        (name = "Orders", description = "Order creation, lookup and status lifecycle"),
        (name = "Dashboard", description = "Order counts and delivered revenue"),
    ),
    info(
        title = "FreshPress API",
        version = "1.0.0",
        description = "Order management for laundry and dry-cleaning shops",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        jwt_config: ctx.jwt_config.clone(),
    };
    let require_auth = || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    let user_service = Arc::new(UserService::new(ctx.repos.clone(), ctx.jwt_config.clone()));
    let auth_handler_state = auth::AuthHandlerState { user_service };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(require_auth())
        .with_state(auth_handler_state);

    let customer_routes = Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/{id}",
            get(customers::get_customer).put(customers::update_customer),
        )
        .route("/{id}/orders", get(customers::list_customer_orders))
        .layer(require_auth())
        .with_state(customers::CustomerState {
            customers: Arc::new(CustomerService::new(ctx.repos.clone())),
            default_page_size: ctx.default_page_size,
        });

    let service_routes = Router::new()
        .route(
            "/",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/{id}",
            get(services::get_service).put(services::update_service),
        )
        .layer(require_auth())
        .with_state(services::CatalogState {
            catalog: Arc::new(CatalogService::new(ctx.repos.clone())),
        });

    let order_routes = Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", patch(orders::update_order_status))
        .layer(require_auth())
        .with_state(orders::OrderState {
            orders: Arc::new(OrderService::new(ctx.repos.clone(), ctx.transition_policy)),
            default_page_size: ctx.default_page_size,
        });

    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::get_dashboard_stats))
        .layer(require_auth())
        .with_state(dashboard::DashboardState {
            dashboard: Arc::new(DashboardService::new(ctx.repos.clone())),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_api::prometheus_metrics))
        .with_state(MetricsState {
            handle: ctx.prometheus,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/services", service_routes)
        .nest("/api/v1/orders", order_routes)
        .nest("/api/v1/dashboard", dashboard_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
