use std::fmt;
use std::str::FromStr;

/// Discord roles allowed to manage teams, coaching threads and tryouts
pub const STAFF_ROLES: &[&str] = &[
    "Owner",
    "CTO",
    "Operation Manager",
    "AP",
    "Managers",
    "OW | Coach",
    "Server Staff",
    "Technician Team",
];

/// Role name prefix for team affiliation roles, e.g. `OW | Phoenix Manager`
pub const TEAM_ROLE_PREFIX: &str = "OW |";

/// Affiliation role suffixes that tie a member to a team
pub const TEAM_ROLE_SUFFIXES: &[&str] = &["Manager", "Coach", "Captain"];

/// Prefix every standardized team name carries
pub const TEAM_NAME_PREFIX: &str = "Alternate ";

/// Roster section a role is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSection {
    Staff,
    Players,
    Substitutes,
}

impl RosterSection {
    pub const ALL: [RosterSection; 3] = [
        RosterSection::Staff,
        RosterSection::Players,
        RosterSection::Substitutes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RosterSection::Staff => "Staff",
            RosterSection::Players => "Players",
            RosterSection::Substitutes => "Substitute",
        }
    }
}

/// A roster position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, poise::ChoiceParameter)]
pub enum PlayerRole {
    #[name = "Main Tank"]
    MainTank,
    #[name = "Off Tank"]
    OffTank,
    #[name = "Hitscan DPS"]
    HitscanDps,
    #[name = "Flex DPS"]
    FlexDps,
    #[name = "Main Support"]
    MainSupport,
    #[name = "Flex Support"]
    FlexSupport,
    #[name = "Substitute"]
    Substitute,
    #[name = "Head Coach"]
    HeadCoach,
    #[name = "Assistant Coach"]
    AssistantCoach,
    #[name = "Manager"]
    Manager,
}

impl PlayerRole {
    /// Roster order
    pub const ALL: [PlayerRole; 10] = [
        PlayerRole::HeadCoach,
        PlayerRole::AssistantCoach,
        PlayerRole::Manager,
        PlayerRole::MainTank,
        PlayerRole::OffTank,
        PlayerRole::HitscanDps,
        PlayerRole::FlexDps,
        PlayerRole::MainSupport,
        PlayerRole::FlexSupport,
        PlayerRole::Substitute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::MainTank => "Main Tank",
            PlayerRole::OffTank => "Off Tank",
            PlayerRole::HitscanDps => "Hitscan DPS",
            PlayerRole::FlexDps => "Flex DPS",
            PlayerRole::MainSupport => "Main Support",
            PlayerRole::FlexSupport => "Flex Support",
            PlayerRole::Substitute => "Substitute",
            PlayerRole::HeadCoach => "Head Coach",
            PlayerRole::AssistantCoach => "Assistant Coach",
            PlayerRole::Manager => "Manager",
        }
    }

    pub fn section(&self) -> RosterSection {
        match self {
            PlayerRole::HeadCoach | PlayerRole::AssistantCoach | PlayerRole::Manager => {
                RosterSection::Staff
            }
            PlayerRole::Substitute => RosterSection::Substitutes,
            _ => RosterSection::Players,
        }
    }

    /// Coaches and managers get added to every coaching thread of their team
    pub fn is_staff(&self) -> bool {
        self.section() == RosterSection::Staff
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown roster role: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_parse_back() {
        for role in PlayerRole::ALL {
            assert_eq!(role.as_str().parse::<PlayerRole>(), Ok(role));
        }
        assert_eq!("hitscan dps".parse::<PlayerRole>(), Ok(PlayerRole::HitscanDps));
        assert!("Goalkeeper".parse::<PlayerRole>().is_err());
    }

    #[test]
    fn test_sections() {
        assert!(PlayerRole::HeadCoach.is_staff());
        assert!(PlayerRole::Manager.is_staff());
        assert!(!PlayerRole::MainTank.is_staff());
        assert_eq!(PlayerRole::Substitute.section(), RosterSection::Substitutes);
        assert_eq!(PlayerRole::FlexSupport.section(), RosterSection::Players);
    }
}
