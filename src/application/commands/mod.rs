pub mod proposals;
pub mod publication;
