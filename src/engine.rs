//! Boundary to the simulation engine.
//!
//! The engine receives a fully parsed [`SimulationSpec`] by reference plus
//! a stream for diagnostics, and returns an integer status that callers
//! report without interpreting.

use crate::spec::SimulationSpec;
use log::{info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default source directory, relative to the working directory
pub const DEFAULT_SOURCE_DIR: &str = "../picoquic";

/// Entry point of a simulation engine
pub trait SimulationEngine {
    fn run(&mut self, spec: &SimulationSpec, diagnostics: &mut dyn Write) -> i32;
}

#[derive(Serialize)]
struct DryRunReport<'a> {
    source_dir: &'a Path,
    custom_link: bool,
    nb_link_segments: usize,
    spec: &'a SimulationSpec,
}

/// Engine stand-in that only reports what it was asked to run.
///
/// Writes one JSON document describing the spec to the diagnostics stream
/// and returns 0, or -1 if the report could not be written.
#[derive(Debug, Clone)]
pub struct DryRunEngine {
    source_dir: PathBuf,
}

impl DryRunEngine {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

impl Default for DryRunEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_DIR)
    }
}

impl SimulationEngine for DryRunEngine {
    fn run(&mut self, spec: &SimulationSpec, diagnostics: &mut dyn Write) -> i32 {
        info!("Dry run with source directory {:?}", self.source_dir());

        let report = DryRunReport {
            source_dir: self.source_dir(),
            custom_link: spec.link_scenario.is_custom(),
            nb_link_segments: spec.nb_link_segments(),
            spec,
        };

        let written = serde_json::to_writer_pretty(&mut *diagnostics, &report)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(diagnostics));
        match written {
            Ok(()) => 0,
            Err(e) => {
                warn!("Failed to write dry-run report: {}", e);
                -1
            }
        }
    }
}
