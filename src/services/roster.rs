use crate::constants::roles::{PlayerRole, RosterSection};
use crate::db::models::Player;

/// Placeholder shown for an open spot on a trialing team
pub const TRIALING_PLACEHOLDER: &str = "*Trialing*";

/// Roster grouped into sections, each line `**Role:** <@id>`.
///
/// Roles nobody holds are shown as trialing when the team is trialing and
/// left out otherwise. Sections without lines are dropped.
pub fn roster_sections(players: &[Player], trialing: bool) -> Vec<(RosterSection, Vec<String>)> {
    RosterSection::ALL
        .iter()
        .filter_map(|section| {
            let lines: Vec<String> = PlayerRole::ALL
                .iter()
                .filter(|role| role.section() == *section)
                .flat_map(|role| {
                    let holders: Vec<String> = players
                        .iter()
                        .filter(|p| p.role() == Some(*role))
                        .map(|p| format!("**{}:** <@{}>", role, p.player_id))
                        .collect();

                    if holders.is_empty() && trialing {
                        vec![format!("**{}:** {}", role, TRIALING_PLACEHOLDER)]
                    } else {
                        holders
                    }
                })
                .collect();

            if lines.is_empty() {
                None
            } else {
                Some((*section, lines))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i64, role: &str) -> Player {
        Player {
            player_id: id,
            team_name: "Alternate Phoenix".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_sections_in_roster_order() {
        let players = vec![player(1, "Main Tank"), player(2, "Head Coach"), player(3, "Main Tank")];
        let sections = roster_sections(&players, false);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, RosterSection::Staff);
        assert_eq!(sections[0].1, vec!["**Head Coach:** <@2>"]);
        assert_eq!(sections[1].0, RosterSection::Players);
        assert_eq!(sections[1].1, vec!["**Main Tank:** <@1>", "**Main Tank:** <@3>"]);
    }

    #[test]
    fn test_trialing_fills_open_spots() {
        let players = vec![player(1, "Main Tank")];
        let sections = roster_sections(&players, true);

        assert_eq!(sections.len(), 3);
        let players_section = &sections[1].1;
        assert_eq!(players_section.len(), 6);
        assert_eq!(players_section[0], "**Main Tank:** <@1>");
        assert_eq!(players_section[1], "**Off Tank:** *Trialing*");
    }

    #[test]
    fn test_unknown_roles_are_skipped() {
        let players = vec![player(1, "Goalkeeper")];
        assert!(roster_sections(&players, false).is_empty());
    }
}
