pub mod banner;
pub mod coaching;
pub mod quotes;
pub mod roster;
pub mod spam;
pub mod status;
pub mod tryout;
