use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{DiaryEntry, DiaryRequest, WeatherSnapshot};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_diary,
        handlers::read_diary,
        handlers::read_diaries,
        handlers::update_diary,
        handlers::delete_diary,
    ),
    components(schemas(
        DiaryEntry,
        DiaryRequest,
        WeatherSnapshot,
    )),
    tags(
        (name = "diary", description = "Weather diary CRUD endpoints"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
