use crate::application::administrators::list::{
    AdministratorFilter, ListAdministratorsRequest, PageParams,
};
use crate::domain::administrators::{
    AdministratorView, BloodGroup, Gender, NewAdministrator, NewUserName, UpdateAdministrator,
    UpdateUserName, UserName,
};
use crate::shared::error::{ErrorResponse, JsonApiError, JsonApiErrorSource};
use crate::shared::response::{JsonApiLinks, JsonApiMeta, JsonApiResource, JsonApiResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Steward Administrator API",
        version = "0.1.0",
        description = "Administrator records kept in a document store, with soft delete.\n\nThis API follows the JSON:API v1.1 specification for all responses."
    ),
    paths(
        crate::presentation::handlers::administrators::create_admin,
        crate::presentation::handlers::administrators::get_admin,
        crate::presentation::handlers::administrators::list_admins,
        crate::presentation::handlers::administrators::update_admin,
        crate::presentation::handlers::administrators::delete_admin,
        crate::presentation::handlers::administrators::restore_admin,
    ),
    components(
        schemas(
            // Request bodies and query parameters
            NewAdministrator,
            NewUserName,
            UpdateAdministrator,
            UpdateUserName,
            ListAdministratorsRequest,
            AdministratorFilter,
            PageParams,

            // Attributes
            AdministratorView,
            UserName,
            Gender,
            BloodGroup,

            // JSON:API envelopes
            JsonApiResource<AdministratorView>,
            JsonApiResponse<JsonApiResource<AdministratorView>>,
            JsonApiResponse<Vec<JsonApiResource<AdministratorView>>>,
            JsonApiResponse<serde_json::Value>,
            JsonApiMeta,
            JsonApiLinks,

            // JSON:API Error types
            ErrorResponse,
            JsonApiError,
            JsonApiErrorSource,
        )
    ),
    tags(
        (name = "administrators", description = "Administrator management endpoints")
    )
)]
pub struct ApiDoc;
