//! HTTP request handlers.

pub mod application_handler;
pub mod auth_handler;
pub mod category_handler;
pub mod company_handler;
pub mod job_handler;
pub mod skill_handler;
pub mod user_handler;

pub use application_handler::application_routes;
pub use auth_handler::auth_routes;
pub use category_handler::protected_category_routes;
pub use company_handler::{protected_company_routes, public_company_routes};
pub use job_handler::{protected_job_routes, public_job_routes};
pub use skill_handler::protected_skill_routes;
pub use user_handler::user_routes;
