pub mod channel;
pub mod event_handler;
pub mod interaction;
pub mod message;
