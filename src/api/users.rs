use actix_web::guard::{Guard, GuardContext};
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::database::UserStore;
use crate::models::{
    CreateUserRequest, DeleteOutcome, UpdateOutcome, User, UserFields, UserResponse,
};
use crate::utils::AppError;

/// Matches only request targets without a leading slash. Origin-form
/// targets always carry one, so a resource behind this guard never dispatches.
pub struct RelativePath;

impl Guard for RelativePath {
    fn check(&self, ctx: &GuardContext<'_>) -> bool {
        !ctx.head().uri.path().starts_with('/')
    }
}

/// GET / - Saudação fixa
#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    responses(
        (status = 200, description = "Fixed greeting", body = String, content_type = "text/html")
    )
)]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("Hello, World!")
}

/// POST /users - Cria usuário
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Inserted user with its assigned id", body = UserResponse),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: web::Json<UserFields>,
) -> Result<HttpResponse, AppError> {
    let request = CreateUserRequest::from_fields(body.into_inner())?;
    let user = store.insert(User::from(request)).await?;

    log::debug!("👤 User created: {:?}", user.id);

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, in store order", body = [UserResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users = store.find_all().await?;
    Ok(render_users(users))
}

/// GET /users/active - Lista usuários com isActive = true
#[utoipa::path(
    get,
    path = "/users/active",
    tag = "Users",
    responses(
        (status = 200, description = "Users whose isActive is true", body = [UserResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_active_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users = store.find_where("isActive", Value::Bool(true)).await?;
    Ok(render_users(users))
}

/// PUT /users/{id} - Aplica `$set` com o corpo recebido, sem validação
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body = Object,
    responses(
        (status = 200, description = "Raw update result; the body is an arbitrary field map merged into the user", body = UpdateOutcome),
        (status = 500, description = "Malformed id or store failure")
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: web::Json<UserFields>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let outcome = store.update_by_id(&user_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// PUT users/{id}/deactivate - Define isActive = false
///
/// Mounted behind [`RelativePath`], so absolute requests never reach it.
/// Left out of the OpenAPI document, whose path keys must be absolute.
pub async fn deactivate_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let mut fields = UserFields::new();
    fields.insert("isActive".to_string(), json!(false));

    let outcome: UpdateOutcome = store.update_by_id(&user_id, fields).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /users/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "Raw delete result", body = DeleteOutcome),
        (status = 500, description = "Malformed id or store failure")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let outcome = store.delete_by_id(&user_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

fn render_users(users: Vec<User>) -> HttpResponse {
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    HttpResponse::Ok().json(users)
}
