use serde::Serialize;

use crate::domain::ticket::TicketReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    TestScenario,
    Roast,
    Groom,
}

impl GenerationKind {
    pub const ALL: [GenerationKind; 3] = [
        GenerationKind::TestScenario,
        GenerationKind::Roast,
        GenerationKind::Groom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::TestScenario => "test-scenarios",
            GenerationKind::Roast => "roast",
            GenerationKind::Groom => "groom",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "test-scenarios" | "test-scenario" | "testgenie" => Some(GenerationKind::TestScenario),
            "roast" | "epicroast" => Some(GenerationKind::Roast),
            "groom" | "groomroom" => Some(GenerationKind::Groom),
            _ => None,
        }
    }

    /// POST path relative to the API base.
    pub fn endpoint(&self) -> &'static str {
        match self {
            GenerationKind::TestScenario => "/testgenie/generate",
            GenerationKind::Roast => "/epicroast/generate",
            GenerationKind::Groom => "/groomroom",
        }
    }

    /// Name of the payload field carrying the generated text.
    pub fn data_field(&self) -> &'static str {
        match self {
            GenerationKind::TestScenario => "scenarios",
            GenerationKind::Roast => "roast",
            GenerationKind::Groom => "groom",
        }
    }

    pub fn service_name(&self) -> &'static str {
        match self {
            GenerationKind::TestScenario => "test scenario service",
            GenerationKind::Roast => "roast service",
            GenerationKind::Groom => "groom room service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoastTheme {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "pirate")]
    Pirate,
    #[serde(rename = "shakespeare")]
    Shakespeare,
    #[serde(rename = "genz")]
    GenZ,
}

impl RoastTheme {
    pub const ALL: &'static [RoastTheme] = &[
        RoastTheme::Default,
        RoastTheme::Pirate,
        RoastTheme::Shakespeare,
        RoastTheme::GenZ,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastTheme::Default => "default",
            RoastTheme::Pirate => "pirate",
            RoastTheme::Shakespeare => "shakespeare",
            RoastTheme::GenZ => "genz",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let wanted = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str() == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoastLevel {
    #[serde(rename = "light")]
    Light,
    #[default]
    #[serde(rename = "savage")]
    Savage,
    #[serde(rename = "extra_crispy")]
    ExtraCrispy,
}

impl RoastLevel {
    pub const ALL: &'static [RoastLevel] = &[
        RoastLevel::Light,
        RoastLevel::Savage,
        RoastLevel::ExtraCrispy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::Savage => "savage",
            RoastLevel::ExtraCrispy => "extra_crispy",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let wanted = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str() == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GroomLevel {
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "strict")]
    Strict,
    #[serde(rename = "light")]
    Light,
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "insight")]
    Insight,
    #[serde(rename = "deep_dive")]
    DeepDive,
    #[serde(rename = "actionable")]
    Actionable,
    #[serde(rename = "summary")]
    Summary,
}

impl GroomLevel {
    pub const ALL: &'static [GroomLevel] = &[
        GroomLevel::Updated,
        GroomLevel::Strict,
        GroomLevel::Light,
        GroomLevel::Default,
        GroomLevel::Insight,
        GroomLevel::DeepDive,
        GroomLevel::Actionable,
        GroomLevel::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroomLevel::Updated => "updated",
            GroomLevel::Strict => "strict",
            GroomLevel::Light => "light",
            GroomLevel::Default => "default",
            GroomLevel::Insight => "insight",
            GroomLevel::DeepDive => "deep_dive",
            GroomLevel::Actionable => "actionable",
            GroomLevel::Summary => "summary",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let wanted = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str() == wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    TestScenario {
        ticket: TicketReference,
    },
    Roast {
        ticket: TicketReference,
        theme: RoastTheme,
        level: RoastLevel,
    },
    Groom {
        ticket: TicketReference,
        level: GroomLevel,
    },
}

impl GenerationRequest {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationRequest::TestScenario { .. } => GenerationKind::TestScenario,
            GenerationRequest::Roast { .. } => GenerationKind::Roast,
            GenerationRequest::Groom { .. } => GenerationKind::Groom,
        }
    }

    pub fn ticket(&self) -> &TicketReference {
        match self {
            GenerationRequest::TestScenario { ticket }
            | GenerationRequest::Roast { ticket, .. }
            | GenerationRequest::Groom { ticket, .. } => ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed_per_kind() {
        assert_eq!(GenerationKind::TestScenario.endpoint(), "/testgenie/generate");
        assert_eq!(GenerationKind::Roast.endpoint(), "/epicroast/generate");
        assert_eq!(GenerationKind::Groom.endpoint(), "/groomroom");
    }

    #[test]
    fn parses_option_wire_names() {
        assert_eq!(RoastTheme::from_str("GenZ"), Some(RoastTheme::GenZ));
        assert_eq!(RoastLevel::from_str("extra-crispy"), Some(RoastLevel::ExtraCrispy));
        assert_eq!(GroomLevel::from_str("deep_dive"), Some(GroomLevel::DeepDive));
        assert_eq!(GroomLevel::from_str("thorough"), None);
    }

    #[test]
    fn option_defaults() {
        assert_eq!(RoastTheme::default(), RoastTheme::Default);
        assert_eq!(RoastLevel::default(), RoastLevel::Savage);
        assert_eq!(GroomLevel::default(), GroomLevel::Default);
    }

    #[test]
    fn parses_generation_kind_aliases() {
        assert_eq!(GenerationKind::from_str("roast"), Some(GenerationKind::Roast));
        assert_eq!(
            GenerationKind::from_str("testgenie"),
            Some(GenerationKind::TestScenario)
        );
        assert_eq!(GenerationKind::from_str("poem"), None);
    }
}
