pub mod excluded_channel;
pub mod player;
pub mod team;
pub mod tryout_invite;
pub mod warning;
