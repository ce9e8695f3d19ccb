//! # Simulation spec files
//!
//! A spec file describes one simulation run, one parameter per line:
//!
//! ```text
//! main_start_time : 1000
//! nb_connections: 4
//! main_cc_algo: bbr
//! data_rate_in_gbps: 0.1
//! latency: 10000
//! icid: 0102030405060708
//! link_scenario: 1000000:U0.1:D0.1:L10000;2000000:U0.01:D0.01
//! qlog_dir: ./qlogs
//! ```
//!
//! ## Components
//!
//! - `types`: the [`SimulationSpec`] record and its parts
//! - `params`: keyword table and line classification
//! - `scenario`: canonical link scenario names
//! - `link`: custom link segment mini-language
//! - `loader`: the line driver
//! - `error`: [`ValueError`] and [`SpecError`]

pub mod error;
pub mod link;
pub mod loader;
pub mod params;
pub mod scenario;
pub mod types;

pub use error::{SpecError, ValueError};
pub use link::{parse_link_segment, parse_link_segments};
pub use loader::{load_spec_file, parse_spec, parse_spec_line, parse_spec_str};
pub use params::{classify_line, LineClass, SpecParam};
pub use scenario::{resolve_link_scenario, ScenarioId};
pub use types::{ConnectionId, LinkScenario, LinkSegment, SimulationSpec};
