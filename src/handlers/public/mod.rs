// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: none (/, /health)

pub mod health;
pub mod root;

pub use health::health;
pub use root::root;
