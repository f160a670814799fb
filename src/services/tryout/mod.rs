pub mod cleanup;
pub mod tracker;
