// handlers/mod.rs - two security tiers
//
// Public (no auth) → Blog (JWT auth via jwt_auth_middleware)
pub mod blog;
pub mod public;
