use crate::application::administrators::create::CreateAdministratorUseCase;
use crate::application::administrators::delete::SoftDeleteAdministratorUseCase;
use crate::application::administrators::get::GetAdministratorUseCase;
use crate::application::administrators::list::{
    ListAdministratorsRequest, ListAdministratorsUseCase,
};
use crate::application::administrators::update::UpdateAdministratorUseCase;
use crate::domain::administrators::{
    Administrator, AdministratorView, NewAdministrator, UpdateAdministrator,
};
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::pagination::PaginationLinkBuilder;
use crate::shared::query::Qs;
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use crate::shared::validation::JsonBody;
use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

pub const RESOURCE_TYPE: &str = "administrators";

fn resource(admin: Administrator) -> JsonApiResource<AdministratorView> {
    JsonApiResource::new(
        RESOURCE_TYPE,
        admin.id.to_string(),
        AdministratorView::from(admin),
    )
}

/// Register a new administrator
#[utoipa::path(
    post,
    path = "/api/v1/administrators",
    request_body = NewAdministrator,
    responses(
        (status = 201, description = "Administrator created successfully", body = JsonApiResponse<JsonApiResource<AdministratorView>>),
        (status = 409, description = "Email or user already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn create_admin(
    State(state): State<AppState>,
    JsonBody(candidate): JsonBody<NewAdministrator>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = CreateAdministratorUseCase::new(state.administrators);

    let admin = use_case.execute(candidate).await?;

    Ok((StatusCode::CREATED, Json(JsonApiResponse::new(resource(admin)))))
}

/// Get an administrator by ID
#[utoipa::path(
    get,
    path = "/api/v1/administrators/{id}",
    params(
        ("id" = Uuid, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "Administrator found", body = JsonApiResponse<JsonApiResource<AdministratorView>>),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetAdministratorUseCase::new(state.administrators);

    match use_case.execute(id).await? {
        Some(admin) => Ok((StatusCode::OK, Json(JsonApiResponse::new(resource(admin))))),
        None => Err(AppError::NotFound("Administrator not found".to_string())),
    }
}

/// List administrators with filters and pagination
#[utoipa::path(
    get,
    path = "/api/v1/administrators",
    params(ListAdministratorsRequest),
    responses(
        (status = 200, description = "List of administrators", body = JsonApiResponse<Vec<JsonApiResource<AdministratorView>>>),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn list_admins(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Qs(req): Qs<ListAdministratorsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = ListAdministratorsUseCase::new(state.administrators);

    let page = use_case.execute(req).await?;

    let meta = JsonApiMeta::new()
        .with_page(page.number)
        .with_per_page(page.size)
        .with_total(page.total);
    let links = PaginationLinkBuilder::from_uri(&uri, page.number, page.size, page.total).build();

    let resources: Vec<_> = page.administrators.into_iter().map(resource).collect();

    Ok((
        StatusCode::OK,
        Json(
            JsonApiResponse::new(resources)
                .with_meta(meta)
                .with_links(links),
        ),
    ))
}

/// Update an administrator
#[utoipa::path(
    patch,
    path = "/api/v1/administrators/{id}",
    params(
        ("id" = Uuid, Path, description = "Administrator ID")
    ),
    request_body = UpdateAdministrator,
    responses(
        (status = 200, description = "Administrator updated successfully", body = JsonApiResponse<JsonApiResource<AdministratorView>>),
        (status = 404, description = "Administrator not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(update): JsonBody<UpdateAdministrator>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = UpdateAdministratorUseCase::new(state.administrators);

    let admin = use_case.execute(id, update).await?;

    Ok((StatusCode::OK, Json(JsonApiResponse::new(resource(admin)))))
}

/// Soft-delete an administrator
#[utoipa::path(
    delete,
    path = "/api/v1/administrators/{id}",
    params(
        ("id" = Uuid, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "Administrator deleted successfully", body = JsonApiResponse<serde_json::Value>),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SoftDeleteAdministratorUseCase::new(state.administrators);

    use_case.execute(id, true).await?;

    let meta = JsonApiMeta::new().with_deleted(true);
    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(serde_json::Value::Null).with_meta(meta)),
    ))
}

/// Restore a soft-deleted administrator
#[utoipa::path(
    post,
    path = "/api/v1/administrators/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "Administrator restored", body = JsonApiResponse<JsonApiResource<AdministratorView>>),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "administrators"
)]
pub async fn restore_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SoftDeleteAdministratorUseCase::new(state.administrators);

    let admin = use_case.execute(id, false).await?;

    Ok((StatusCode::OK, Json(JsonApiResponse::new(resource(admin)))))
}
