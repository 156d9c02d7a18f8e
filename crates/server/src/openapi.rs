use service::contacts::Contact;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Contact List", description = "List, fetch, create and delete contacts"),
    paths(
        crate::routes::health,
        crate::routes::contacts::list,
        crate::routes::contacts::get,
        crate::routes::contacts::create,
        crate::routes::contacts::delete,
    ),
    components(schemas(HealthResponse, Contact)),
    tags(
        (name = "health"),
        (name = "contacts")
    )
)]
pub struct ApiDoc;
