mod player;
mod team;
mod tryout_invite;
mod warning;

pub use player::Player;
pub use team::{parse_hex_color, Team};
pub use tryout_invite::TryoutInvite;
pub use warning::Warning;
