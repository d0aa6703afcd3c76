pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::utils::AppError;

/// Registers every route. The store must already be in app data as
/// `web::Data<dyn UserStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
    )
    // Health check
    .route("/health", web::get().to(health::health_check))
    // Metrics
    .route("/metrics", web::get().to(metrics::get_metrics))
    .route("/", web::get().to(users::hello))
    .route("/users", web::post().to(users::create_user))
    .route("/users", web::get().to(users::list_users))
    .route("/users/active", web::get().to(users::list_active_users))
    .route("/users/{id}", web::put().to(users::update_user))
    // Padrão relativo: nunca casa com requisições absolutas
    .service(
        web::resource("users/{id}/deactivate")
            .guard(users::RelativePath)
            .route(web::put().to(users::deactivate_user)),
    )
    .route("/users/{id}", web::delete().to(users::delete_user));
}
