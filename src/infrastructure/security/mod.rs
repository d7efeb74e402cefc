// src/infrastructure/security/mod.rs
pub mod static_token;
