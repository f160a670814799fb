pub mod confirm_delete;
