//! # Simspec - parser for network simulation specification files
//!
//! This library turns a human-authored, line-oriented simulation
//! specification into a strongly typed [`spec::SimulationSpec`] that a
//! network simulation engine can consume.
//!
//! ## Overview
//!
//! A spec file holds one `name: value` parameter per line. Values are
//! integers, bounded integers, decimals, hexadecimal connection
//! identifiers, congestion control algorithm names, free text or paths.
//! The `link_scenario` parameter is either a canonical scenario name or a
//! small language describing a time-varying link.
//!
//! ## Architecture
//!
//! - `utils`: typed value parsers
//! - `spec`: record types, parameter table, link segment language, line driver
//! - `registry`: congestion control algorithm lookup, injected into the parser
//! - `engine`: boundary to the simulation engine, plus a dry-run engine
//! - `config`, `config_loader`: optional YAML runner configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use simspec::registry::CcRegistry;
//! use simspec::spec::{parse_spec_str, LinkSegment};
//!
//! let registry = CcRegistry::with_defaults();
//! let spec = parse_spec_str(
//!     "main_start_time : 1000\n\
//!      main_cc_algo: cubic\n\
//!      link_scenario:1000:U1.5:D2.0:L20;500:U0.5\n",
//!     &registry,
//! )?;
//!
//! assert_eq!(spec.main_start_time, 1000);
//! let segments = spec.link_scenario.segments().unwrap();
//! assert_eq!(segments[1], LinkSegment { duration: 500, up_rate_gbps: 0.5, ..Default::default() });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return `thiserror` based errors ([`spec::SpecError`],
//! [`spec::ValueError`]); the binary and the configuration loader report
//! through `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod engine;
pub mod registry;
pub mod spec;
pub mod utils;
