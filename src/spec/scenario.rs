//! Canonical link scenarios and `link_scenario` value resolution.

use crate::spec::error::ValueError;
use crate::spec::link::parse_link_segments;
use crate::spec::types::LinkScenario;
use serde::Serialize;
use std::fmt;

/// Pre-defined link behaviours understood by the simulation engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    /// Static link, no special behaviour
    #[default]
    None,
    /// Link drops every packet for a while
    BlackHole,
    /// Rate drops sharply, then comes back
    DropAndBack,
    /// Starts at a low rate, then goes up
    LowAndUp,
    /// Wi-Fi rate fading
    WifiFade,
    /// Wi-Fi suspension periods
    WifiSuspension,
}

impl ScenarioId {
    /// All scenarios, in table order
    pub const ALL: [ScenarioId; 6] = [
        Self::None,
        Self::BlackHole,
        Self::DropAndBack,
        Self::LowAndUp,
        Self::WifiFade,
        Self::WifiSuspension,
    ];

    /// Name used in spec files
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BlackHole => "black_hole",
            Self::DropAndBack => "drop_and_back",
            Self::LowAndUp => "low_and_up",
            Self::WifiFade => "wifi_fade",
            Self::WifiSuspension => "wifi_suspension",
        }
    }

    /// Exact, case-sensitive lookup of a scenario name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the value of a `link_scenario` line.
///
/// A canonical name wins; anything else must be a valid segment list.
///
/// # Examples
/// ```
/// use simspec::spec::{resolve_link_scenario, LinkScenario, ScenarioId};
///
/// let named = resolve_link_scenario("wifi_fade").unwrap();
/// assert_eq!(named, LinkScenario::Named(ScenarioId::WifiFade));
///
/// let custom = resolve_link_scenario("1000:U1.5;500").unwrap();
/// assert_eq!(custom.segments().map(|s| s.len()), Some(2));
///
/// assert!(resolve_link_scenario("Wifi_Fade").is_err());
/// ```
pub fn resolve_link_scenario(value: &str) -> Result<LinkScenario, ValueError> {
    if let Some(id) = ScenarioId::from_name(value) {
        return Ok(LinkScenario::Named(id));
    }

    match parse_link_segments(value) {
        Ok(segments) => Ok(LinkScenario::Custom(segments)),
        Err(source) => Err(ValueError::UnknownLinkScenario {
            value: value.to_string(),
            source: Box::new(source),
        }),
    }
}
