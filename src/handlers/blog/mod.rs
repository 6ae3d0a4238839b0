// handlers/blog - post endpoints mounted under /api/v1/blog
//
// Every route here sits behind jwt_auth_middleware, so handlers can rely on
// an AuthUser extension. Each handler makes exactly one store call.

pub mod post_bulk;
pub mod post_create;
pub mod post_get;
pub mod post_update;

pub use post_bulk::post_bulk;
pub use post_create::post_create;
pub use post_get::post_get;
pub use post_update::post_update;
