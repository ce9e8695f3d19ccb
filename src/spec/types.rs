//! Specification record types.
//!
//! [`SimulationSpec`] is the aggregate produced by parsing one spec file.
//! Every scalar starts at zero and every owned field starts absent, so a
//! freshly created record is exactly what an empty file produces.

use crate::registry::CcAlgorithm;
use crate::spec::scenario::ScenarioId;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

const CONNECTION_ID_LEN: usize = 8;

/// Fixed-length (8 byte) connection identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    bytes: [u8; CONNECTION_ID_LEN],
}

impl ConnectionId {
    /// Length of every identifier, regardless of the hex text it came from
    pub const LEN: usize = CONNECTION_ID_LEN;

    pub fn new(bytes: [u8; Self::LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.bytes
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for ConnectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One interval of a custom time-varying link
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkSegment {
    pub duration: u64,
    pub up_rate_gbps: f64,
    pub down_rate_gbps: f64,
    pub latency: u64,
    pub jitter: u64,
    pub queue_delay_max: u64,
    pub l4s_max: u64,
    pub nb_loss_in_burst: u64,
    pub packets_between_losses: u64,
}

/// Link behaviour: a canonical named scenario or a custom segment list.
///
/// `Custom` always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScenario {
    Named(ScenarioId),
    Custom(Vec<LinkSegment>),
}

impl Default for LinkScenario {
    fn default() -> Self {
        Self::Named(ScenarioId::None)
    }
}

impl LinkScenario {
    /// Returns true if this is a custom segment list
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns the canonical scenario if this is a named scenario
    pub fn named(&self) -> Option<ScenarioId> {
        match self {
            Self::Named(id) => Some(*id),
            Self::Custom(_) => None,
        }
    }

    /// Returns the segments if this is a custom scenario
    pub fn segments(&self) -> Option<&[LinkSegment]> {
        match self {
            Self::Custom(segments) => Some(segments),
            Self::Named(_) => None,
        }
    }
}

/// Fully parsed description of one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSpec {
    // Timing
    pub main_start_time: u64,
    pub main_target_time: u64,
    pub background_start_time: u64,

    // Workload
    pub main_scenario_text: Option<String>,
    pub background_scenario_text: Option<String>,
    pub nb_connections: i32,
    pub seed_cwin: u64,
    pub seed_rtt: u64,

    // Congestion control
    pub main_cc_algo: Option<CcAlgorithm>,
    pub main_cc_options: Option<String>,
    pub background_cc_algo: Option<CcAlgorithm>,
    pub background_cc_options: Option<String>,

    // Static path characteristics
    pub data_rate_in_gbps: f64,
    pub latency: u64,
    pub jitter: u64,
    pub queue_delay_max: u64,
    pub l4s_max: u64,

    pub icid: ConnectionId,

    // Outputs
    pub qlog_dir: Option<PathBuf>,
    pub qperf_log: Option<PathBuf>,

    // Media statistics
    pub media_stats_start: u64,
    pub media_excluded: Option<String>,
    pub media_latency_average: u64,
    pub media_latency_max: u64,

    pub link_scenario: LinkScenario,
}

impl SimulationSpec {
    /// Drop every owned allocation, leaving the fields absent.
    ///
    /// Scalars are untouched. Calling this more than once is a no-op.
    pub fn release(&mut self) {
        self.main_scenario_text = None;
        self.background_scenario_text = None;
        self.main_cc_algo = None;
        self.main_cc_options = None;
        self.background_cc_algo = None;
        self.background_cc_options = None;
        self.qlog_dir = None;
        self.qperf_log = None;
        self.media_excluded = None;
        self.link_scenario = LinkScenario::default();
    }

    /// Number of custom link segments (0 for a named scenario)
    pub fn nb_link_segments(&self) -> usize {
        self.link_scenario.segments().map_or(0, <[LinkSegment]>::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_is_zeroed() {
        let spec = SimulationSpec::default();
        assert_eq!(spec.main_start_time, 0);
        assert_eq!(spec.nb_connections, 0);
        assert_eq!(spec.data_rate_in_gbps, 0.0);
        assert!(spec.main_cc_algo.is_none());
        assert!(spec.qlog_dir.is_none());
        assert_eq!(spec.icid, ConnectionId::default());
        assert_eq!(spec.link_scenario, LinkScenario::Named(ScenarioId::None));
        assert_eq!(spec.nb_link_segments(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut spec = SimulationSpec {
            latency: 10_000,
            main_scenario_text: Some("=a1:d0:p0:v0:*1:0;".to_string()),
            qlog_dir: Some(PathBuf::from("qlogs")),
            media_excluded: Some("1,2".to_string()),
            link_scenario: LinkScenario::Custom(vec![LinkSegment {
                duration: 1000,
                ..Default::default()
            }]),
            ..Default::default()
        };

        spec.release();
        let once = spec.clone();
        spec.release();

        assert_eq!(spec, once);
        assert!(spec.main_scenario_text.is_none());
        assert!(spec.qlog_dir.is_none());
        assert!(spec.media_excluded.is_none());
        assert!(!spec.link_scenario.is_custom());
        assert_eq!(spec.latency, 10_000);
    }

    #[test]
    fn test_connection_id_display() {
        let cid = ConnectionId::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
        assert_eq!(cid.to_string(), "0123456789abcdef");
        assert_eq!(cid.as_bytes().len(), 8);
    }

    #[test]
    fn test_link_scenario_accessors() {
        let named = LinkScenario::Named(ScenarioId::WifiFade);
        assert_eq!(named.named(), Some(ScenarioId::WifiFade));
        assert!(named.segments().is_none());

        let custom = LinkScenario::Custom(vec![LinkSegment::default()]);
        assert!(custom.is_custom());
        assert_eq!(custom.named(), None);
        assert_eq!(custom.segments().map(|s| s.len()), Some(1));
    }
}
