pub mod auth;
pub mod health;
pub mod list;
pub mod upload;

pub use auth::{login_handler, logout_handler, SessionState};
pub use health::health_handler;
pub use list::list_files_handler;
pub use upload::upload_handler;
