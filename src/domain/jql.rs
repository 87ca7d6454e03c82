use crate::domain::filter::{CardQuery, StatusFilter};
use crate::domain::teams::CardScheme;

const READY_TO_GROOM_STATUSES: &[&str] = &["Ready to Groom", "To Groom", "Backlog"];
const READY_FOR_DEV_STATUSES: &[&str] = &["Ready for Dev", "Ready for Development", "To Do"];

/// Literal Jira status names behind a logical status filter.
pub fn status_names(filter: StatusFilter) -> Vec<&'static str> {
    match filter {
        StatusFilter::ReadyToGroom => READY_TO_GROOM_STATUSES.to_vec(),
        StatusFilter::ReadyForDev => READY_FOR_DEV_STATUSES.to_vec(),
        StatusFilter::All => {
            let mut names = READY_TO_GROOM_STATUSES.to_vec();
            for name in READY_FOR_DEV_STATUSES {
                if !names.contains(name) {
                    names.push(name);
                }
            }
            names
        }
    }
}

pub fn build_jql(scheme: CardScheme, query: &CardQuery) -> String {
    let projects = scheme.projects_for_team(query.team.as_team());
    let statuses = status_names(query.status);

    let mut clauses = Vec::new();
    if !projects.is_empty() {
        clauses.push(format!("project in ({})", quoted_list(&projects)));
    }
    clauses.push(format!("status in ({})", quoted_list(&statuses)));

    format!("{} ORDER BY created DESC", clauses.join(" AND "))
}

fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|value| format!("\"{}\"", value.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::TeamFilter;

    #[test]
    fn builds_query_for_single_team() {
        let query = CardQuery {
            team: TeamFilter::Team("odyssey".into()),
            status: StatusFilter::ReadyToGroom,
        };
        assert_eq!(
            build_jql(CardScheme::Portfolio, &query),
            "project in (\"ODCD\", \"ODWEB\") AND status in (\"Ready to Groom\", \"To Groom\", \"Backlog\") ORDER BY created DESC"
        );
    }

    #[test]
    fn all_teams_uses_every_project_key() {
        let query = CardQuery {
            team: TeamFilter::All,
            status: StatusFilter::ReadyForDev,
        };
        let jql = build_jql(CardScheme::Legacy, &query);
        assert!(jql.starts_with(
            "project in (\"ODCD\", \"CDSTORE\", \"CDPAY\", \"CDSRCH\") AND status in (\"Ready for Dev\""
        ));
    }

    #[test]
    fn unknown_team_drops_project_clause() {
        let query = CardQuery {
            team: TeamFilter::Team("ghosts".into()),
            status: StatusFilter::ReadyForDev,
        };
        assert!(build_jql(CardScheme::Portfolio, &query).starts_with("status in ("));
    }

    #[test]
    fn all_statuses_are_a_union() {
        let names = status_names(StatusFilter::All);
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"Backlog"));
        assert!(names.contains(&"To Do"));
    }
}
