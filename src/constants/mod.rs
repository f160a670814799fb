pub mod embeds;
pub mod roles;
pub mod timeouts;
