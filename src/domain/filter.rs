#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    ReadyToGroom,
    ReadyForDev,
    All,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::ReadyToGroom => "ready-to-groom",
            StatusFilter::ReadyForDev => "ready-for-dev",
            StatusFilter::All => "all",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ready-to-groom" => Some(StatusFilter::ReadyToGroom),
            "ready-for-dev" => Some(StatusFilter::ReadyForDev),
            "all" => Some(StatusFilter::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            TeamFilter::All
        } else {
            TeamFilter::Team(trimmed.to_lowercase())
        }
    }

    pub fn as_team(&self) -> Option<&str> {
        match self {
            TeamFilter::All => None,
            TeamFilter::Team(team) => Some(team.as_str()),
        }
    }
}

/// What the card source is asked for on each refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardQuery {
    pub team: TeamFilter,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub team: TeamFilter,
    pub status: StatusFilter,
}

impl FilterState {
    pub fn query(&self) -> CardQuery {
        CardQuery {
            team: self.team.clone(),
            status: self.status,
        }
    }
}
