pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use errors::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use responses::*;
pub use routes::create_router;
