// src/presentation/http/controllers/mod.rs
pub mod employees;
pub mod history;
pub mod proposals;
pub mod publication;
pub mod session;
