//! Askdesk app: console frontend and effect plumbing over the core.
pub mod platform;
