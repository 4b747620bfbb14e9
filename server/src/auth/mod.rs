mod crypto;
mod db;
mod extractor;
mod middleware;

pub use crypto::{hash_password, verify_password};
pub use db::{create_session, create_user, delete_session, find_user_by_username};
pub use extractor::{bearer_token, AuthUser};
pub use middleware::require_auth;
