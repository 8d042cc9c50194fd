// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login; // POST /login - verify credentials, mint JWT
pub mod register; // POST /register - create credential record

pub use login::login_post;
pub use register::register_post;
