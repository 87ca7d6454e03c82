//! Static project/team tables used to build Jira queries and label cards.
//!
//! Two mapping schemes are in circulation: the portfolio layout used by the
//! live dashboard and the older core-delivery layout the sample cards were
//! first written against. Both are kept and selected through configuration.

pub const UNKNOWN_TEAM: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardScheme {
    Portfolio,
    Legacy,
}

const PORTFOLIO_PROJECTS: &[(&str, &str)] = &[
    ("ODCD", "odyssey"),
    ("ODWEB", "odyssey"),
    ("APPS", "apps"),
    ("PLAT", "platform"),
    ("MOB", "mobile"),
];

const LEGACY_PROJECTS: &[(&str, &str)] = &[
    ("ODCD", "core-delivery"),
    ("CDSTORE", "storefront"),
    ("CDPAY", "payments"),
    ("CDSRCH", "search"),
];

impl CardScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardScheme::Portfolio => "portfolio",
            CardScheme::Legacy => "legacy",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "portfolio" => Some(CardScheme::Portfolio),
            "legacy" => Some(CardScheme::Legacy),
            _ => None,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            CardScheme::Portfolio => PORTFOLIO_PROJECTS,
            CardScheme::Legacy => LEGACY_PROJECTS,
        }
    }

    /// Team owning `project_key`, or [`UNKNOWN_TEAM`] when the key is unmapped.
    pub fn team_for_project(&self, project_key: &str) -> &'static str {
        let key = project_key.trim();
        self.table()
            .iter()
            .find(|(project, _)| project.eq_ignore_ascii_case(key))
            .map(|(_, team)| *team)
            .unwrap_or(UNKNOWN_TEAM)
    }

    /// Project keys for a team, in table order. `None` selects every project.
    pub fn projects_for_team(&self, team: Option<&str>) -> Vec<&'static str> {
        self.table()
            .iter()
            .filter(|(_, owner)| team.is_none_or(|wanted| owner.eq_ignore_ascii_case(wanted.trim())))
            .map(|(project, _)| *project)
            .collect()
    }

    pub fn teams(&self) -> Vec<&'static str> {
        let mut teams: Vec<&'static str> = Vec::new();
        for (_, team) in self.table() {
            if !teams.contains(team) {
                teams.push(team);
            }
        }
        teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_team_from_project_key() {
        assert_eq!(CardScheme::Portfolio.team_for_project("APPS"), "apps");
        assert_eq!(CardScheme::Legacy.team_for_project("odcd"), "core-delivery");
    }

    #[test]
    fn unmapped_project_is_unknown() {
        assert_eq!(CardScheme::Portfolio.team_for_project("ZZZ"), UNKNOWN_TEAM);
        assert_eq!(CardScheme::Legacy.team_for_project(""), UNKNOWN_TEAM);
    }

    #[test]
    fn lists_projects_for_team_and_all() {
        assert_eq!(
            CardScheme::Portfolio.projects_for_team(Some("odyssey")),
            vec!["ODCD", "ODWEB"]
        );
        assert_eq!(CardScheme::Legacy.projects_for_team(None).len(), 4);
        assert!(CardScheme::Portfolio.projects_for_team(Some("nobody")).is_empty());
    }

    #[test]
    fn teams_are_deduplicated() {
        assert_eq!(
            CardScheme::Portfolio.teams(),
            vec!["odyssey", "apps", "platform", "mobile"]
        );
    }
}
