//! Parameter table and line dispatch.
//!
//! Every spec line starts with a keyword naming one field of
//! [`SimulationSpec`]. The keyword is matched as a whole token (letters,
//! digits and `_`), so a keyword that happens to be a prefix of another,
//! such as `latency` and `l4s_max`, can never be confused.

use crate::registry::CcAlgorithmLookup;
use crate::spec::error::ValueError;
use crate::spec::scenario::resolve_link_scenario;
use crate::spec::types::SimulationSpec;
use crate::utils::value::{
    parse_bounded_int, parse_cc_algo, parse_connection_id, parse_decimal, parse_path,
    parse_text, parse_u64,
};
use std::fmt;

/// Separator between a keyword and its value
pub const PARAM_SEPARATOR: char = ':';

/// Recognized spec-file parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecParam {
    MainStartTime,
    MainTargetTime,
    BackgroundStartTime,
    MainScenarioText,
    BackgroundScenarioText,
    MainCcAlgo,
    MainCcOptions,
    BackgroundCcAlgo,
    BackgroundCcOptions,
    SeedCwin,
    SeedRtt,
    NbConnections,
    DataRateInGbps,
    Latency,
    Jitter,
    LinkScenario,
    QueueDelayMax,
    L4sMax,
    Icid,
    QlogDir,
    QperfLog,
    MediaStatsStart,
    MediaExcluded,
    MediaLatencyAverage,
    MediaLatencyMax,
}

impl SpecParam {
    /// Every parameter, in the order they are listed in documentation
    pub const ALL: [SpecParam; 25] = [
        Self::MainStartTime,
        Self::MainTargetTime,
        Self::BackgroundStartTime,
        Self::MainScenarioText,
        Self::BackgroundScenarioText,
        Self::MainCcAlgo,
        Self::MainCcOptions,
        Self::BackgroundCcAlgo,
        Self::BackgroundCcOptions,
        Self::SeedCwin,
        Self::SeedRtt,
        Self::NbConnections,
        Self::DataRateInGbps,
        Self::Latency,
        Self::Jitter,
        Self::LinkScenario,
        Self::QueueDelayMax,
        Self::L4sMax,
        Self::Icid,
        Self::QlogDir,
        Self::QperfLog,
        Self::MediaStatsStart,
        Self::MediaExcluded,
        Self::MediaLatencyAverage,
        Self::MediaLatencyMax,
    ];

    /// Keyword used in spec files
    pub fn keyword(self) -> &'static str {
        match self {
            Self::MainStartTime => "main_start_time",
            Self::MainTargetTime => "main_target_time",
            Self::BackgroundStartTime => "background_start_time",
            Self::MainScenarioText => "main_scenario_text",
            Self::BackgroundScenarioText => "background_scenario_text",
            Self::MainCcAlgo => "main_cc_algo",
            Self::MainCcOptions => "main_cc_options",
            Self::BackgroundCcAlgo => "background_cc_algo",
            Self::BackgroundCcOptions => "background_cc_options",
            Self::SeedCwin => "seed_cwin",
            Self::SeedRtt => "seed_rtt",
            Self::NbConnections => "nb_connections",
            Self::DataRateInGbps => "data_rate_in_gbps",
            Self::Latency => "latency",
            Self::Jitter => "jitter",
            Self::LinkScenario => "link_scenario",
            Self::QueueDelayMax => "queue_delay_max",
            Self::L4sMax => "l4s_max",
            Self::Icid => "icid",
            Self::QlogDir => "qlog_dir",
            Self::QperfLog => "qperf_log",
            Self::MediaStatsStart => "media_stats_start",
            Self::MediaExcluded => "media_excluded",
            Self::MediaLatencyAverage => "media_latency_average",
            Self::MediaLatencyMax => "media_latency_max",
        }
    }

    /// Exact keyword lookup
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Parse `value` and store it in the matching field of `spec`
    pub fn apply<L>(self, spec: &mut SimulationSpec, value: &str, lookup: &L) -> Result<(), ValueError>
    where
        L: CcAlgorithmLookup + ?Sized,
    {
        match self {
            Self::MainStartTime => spec.main_start_time = parse_u64(value)?,
            Self::MainTargetTime => spec.main_target_time = parse_u64(value)?,
            Self::BackgroundStartTime => spec.background_start_time = parse_u64(value)?,
            Self::MainScenarioText => spec.main_scenario_text = Some(parse_text(value)?),
            Self::BackgroundScenarioText => {
                spec.background_scenario_text = Some(parse_text(value)?)
            }
            Self::MainCcAlgo => spec.main_cc_algo = Some(parse_cc_algo(value, lookup)?),
            Self::MainCcOptions => spec.main_cc_options = Some(parse_text(value)?),
            Self::BackgroundCcAlgo => {
                spec.background_cc_algo = Some(parse_cc_algo(value, lookup)?)
            }
            Self::BackgroundCcOptions => spec.background_cc_options = Some(parse_text(value)?),
            Self::SeedCwin => spec.seed_cwin = parse_u64(value)?,
            Self::SeedRtt => spec.seed_rtt = parse_u64(value)?,
            Self::NbConnections => spec.nb_connections = parse_bounded_int(value)?,
            Self::DataRateInGbps => spec.data_rate_in_gbps = parse_decimal(value)?,
            Self::Latency => spec.latency = parse_u64(value)?,
            Self::Jitter => spec.jitter = parse_u64(value)?,
            Self::LinkScenario => spec.link_scenario = resolve_link_scenario(value)?,
            Self::QueueDelayMax => spec.queue_delay_max = parse_u64(value)?,
            Self::L4sMax => spec.l4s_max = parse_u64(value)?,
            Self::Icid => spec.icid = parse_connection_id(value)?,
            Self::QlogDir => spec.qlog_dir = Some(parse_path(value)?),
            Self::QperfLog => spec.qperf_log = Some(parse_path(value)?),
            Self::MediaStatsStart => spec.media_stats_start = parse_u64(value)?,
            Self::MediaExcluded => spec.media_excluded = Some(parse_text(value)?),
            Self::MediaLatencyAverage => spec.media_latency_average = parse_u64(value)?,
            Self::MediaLatencyMax => spec.media_latency_max = parse_u64(value)?,
        }
        Ok(())
    }
}

impl fmt::Display for SpecParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Outcome of classifying one non-blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Known keyword followed by `:`; `value` has leading whitespace removed
    Param { param: SpecParam, value: &'a str },
    /// Leading token is not a known keyword
    Unknown,
    /// Known keyword not followed by `:`
    MissingSeparator(SpecParam),
}

/// Split a line into its parameter and value text
pub fn classify_line(line: &str) -> LineClass<'_> {
    let keyword_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());

    let Some(param) = SpecParam::from_keyword(&line[..keyword_end]) else {
        return LineClass::Unknown;
    };

    let rest = line[keyword_end..].trim_start_matches(|c: char| c.is_ascii_whitespace());
    match rest.strip_prefix(PARAM_SEPARATOR) {
        Some(value) => LineClass::Param {
            param,
            value: value.trim_start_matches(|c: char| c.is_ascii_whitespace()),
        },
        None => LineClass::MissingSeparator(param),
    }
}
