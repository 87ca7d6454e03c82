use crate::domain::card::JiraCard;
use crate::domain::teams::CardScheme;

struct SampleCard {
    key: &'static str,
    summary: &'static str,
    status: &'static str,
    priority: &'static str,
    assignee: Option<&'static str>,
    issue_type: &'static str,
    created: &'static str,
    description: Option<&'static str>,
}

const PORTFOLIO_SAMPLES: [SampleCard; 5] = [
    SampleCard {
        key: "ODCD-33741",
        summary: "Guest checkout drops promo code after address change",
        status: "Ready to Groom",
        priority: "High",
        assignee: Some("Priya Natarajan"),
        issue_type: "Bug",
        created: "2024-05-14T09:12:00.000+0000",
        description: Some("Promo codes disappear when a guest edits the shipping address."),
    },
    SampleCard {
        key: "ODWEB-1187",
        summary: "Add skeleton loaders to the order history page",
        status: "Ready for Dev",
        priority: "Medium",
        assignee: Some("Marcus Lee"),
        issue_type: "Story",
        created: "2024-05-13T15:40:00.000+0000",
        description: None,
    },
    SampleCard {
        key: "APPS-412",
        summary: "Offline mode for saved drafts",
        status: "Backlog",
        priority: "Medium",
        assignee: None,
        issue_type: "Epic",
        created: "2024-05-10T11:05:00.000+0000",
        description: Some("Drafts should be readable and editable without a connection."),
    },
    SampleCard {
        key: "PLAT-2290",
        summary: "Rotate service credentials for the payments gateway",
        status: "To Do",
        priority: "Highest",
        assignee: Some("Dana Kowalski"),
        issue_type: "Task",
        created: "2024-05-09T08:30:00.000+0000",
        description: None,
    },
    SampleCard {
        key: "MOB-778",
        summary: "Push notification deep links open the wrong tab",
        status: "Ready for Dev",
        priority: "Low",
        assignee: Some("Sam Ortiz"),
        issue_type: "Bug",
        created: "2024-05-07T17:22:00.000+0000",
        description: Some("Tapping an order update opens Home instead of Orders."),
    },
];

const LEGACY_SAMPLES: [SampleCard; 5] = [
    SampleCard {
        key: "ODCD-33741",
        summary: "Guest checkout drops promo code after address change",
        status: "To Groom",
        priority: "High",
        assignee: Some("Priya Natarajan"),
        issue_type: "Bug",
        created: "2024-05-14T09:12:00.000+0000",
        description: Some("Promo codes disappear when a guest edits the shipping address."),
    },
    SampleCard {
        key: "CDSTORE-902",
        summary: "Store locator ignores opening hours filter",
        status: "Ready for Development",
        priority: "Medium",
        assignee: Some("Marcus Lee"),
        issue_type: "Bug",
        created: "2024-05-12T10:00:00.000+0000",
        description: None,
    },
    SampleCard {
        key: "CDPAY-1550",
        summary: "Support split tender on gift cards",
        status: "Backlog",
        priority: "Medium",
        assignee: None,
        issue_type: "Story",
        created: "2024-05-11T13:45:00.000+0000",
        description: Some("Allow a gift card to cover part of an order with a card for the rest."),
    },
    SampleCard {
        key: "CDSRCH-318",
        summary: "Typo tolerance for product search",
        status: "To Groom",
        priority: "Low",
        assignee: Some("Alex Romero"),
        issue_type: "Story",
        created: "2024-05-08T09:15:00.000+0000",
        description: None,
    },
    SampleCard {
        key: "ODCD-33802",
        summary: "Order confirmation email shows wrong delivery window",
        status: "Ready for Dev",
        priority: "High",
        assignee: Some("Dana Kowalski"),
        issue_type: "Bug",
        created: "2024-05-06T16:50:00.000+0000",
        description: None,
    },
];

/// The fixed five-card set shown when Jira is unconfigured or unreachable.
pub fn sample_cards(scheme: CardScheme) -> Vec<JiraCard> {
    let samples = match scheme {
        CardScheme::Portfolio => &PORTFOLIO_SAMPLES,
        CardScheme::Legacy => &LEGACY_SAMPLES,
    };

    samples
        .iter()
        .map(|sample| {
            let project = sample
                .key
                .split_once('-')
                .map(|(prefix, _)| prefix)
                .unwrap_or(sample.key);
            JiraCard {
                key: sample.key.to_string(),
                summary: sample.summary.to_string(),
                status: sample.status.to_string(),
                priority: sample.priority.to_string(),
                assignee: sample.assignee.map(str::to_string),
                project: project.to_string(),
                issue_type: sample.issue_type.to_string(),
                created: sample.created.to_string(),
                team: scheme.team_for_project(project).to_string(),
                description: sample.description.map(str::to_string),
            }
        })
        .collect()
}
