pub mod coaching;
pub mod general;
pub mod owner;
pub mod player;
pub mod team;
pub mod tryout;
pub mod warning;
