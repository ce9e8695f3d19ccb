//! Spec-file driver.
//!
//! Reads a spec file line by line, strips trailing whitespace, skips blank
//! lines and dispatches every other line through [`classify_line`]. The
//! first failing line aborts the load; the partially filled record is
//! simply dropped.

use crate::registry::CcAlgorithmLookup;
use crate::spec::error::SpecError;
use crate::spec::params::{classify_line, LineClass};
use crate::spec::types::SimulationSpec;
use log::{debug, error, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse one line into `spec`. Blank lines are accepted and ignored.
pub fn parse_spec_line<L>(
    spec: &mut SimulationSpec,
    line_number: usize,
    line: &str,
    lookup: &L,
) -> Result<(), SpecError>
where
    L: CcAlgorithmLookup + ?Sized,
{
    let line = line.trim_end_matches(char::is_whitespace);
    if line.is_empty() {
        return Ok(());
    }

    match classify_line(line) {
        LineClass::Param { param, value } => {
            debug!("line {}: {} = {:?}", line_number, param, value);
            param
                .apply(spec, value, lookup)
                .map_err(|source| SpecError::InvalidValue {
                    line: line_number,
                    param: param.keyword(),
                    value: value.to_string(),
                    source,
                })
        }
        LineClass::Unknown => Err(SpecError::UnknownParameter {
            line: line_number,
            text: line.to_string(),
        }),
        LineClass::MissingSeparator(param) => Err(SpecError::MissingSeparator {
            line: line_number,
            param: param.keyword(),
        }),
    }
}

/// Parse a complete spec from a buffered reader
pub fn parse_spec<R, L>(reader: R, lookup: &L) -> Result<SimulationSpec, SpecError>
where
    R: BufRead,
    L: CcAlgorithmLookup + ?Sized,
{
    let mut spec = SimulationSpec::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| SpecError::Read {
            line: line_number,
            source,
        })?;

        if let Err(e) = parse_spec_line(&mut spec, line_number, &line, lookup) {
            error!("{}", e);
            return Err(e);
        }
    }

    Ok(spec)
}

/// Parse a spec held in memory.
///
/// # Examples
/// ```
/// use simspec::registry::CcRegistry;
/// use simspec::spec::parse_spec_str;
///
/// let registry = CcRegistry::with_defaults();
/// let spec = parse_spec_str("main_start_time : 1000\nmain_cc_algo: bbr\n", &registry).unwrap();
/// assert_eq!(spec.main_start_time, 1000);
/// assert!(parse_spec_str("bogus_param:1", &registry).is_err());
/// ```
pub fn parse_spec_str<L>(text: &str, lookup: &L) -> Result<SimulationSpec, SpecError>
where
    L: CcAlgorithmLookup + ?Sized,
{
    parse_spec(text.as_bytes(), lookup)
}

/// Open and parse a spec file
pub fn load_spec_file<L>(path: &Path, lookup: &L) -> Result<SimulationSpec, SpecError>
where
    L: CcAlgorithmLookup + ?Sized,
{
    info!("Loading simulation spec from: {:?}", path);

    let file = File::open(path).map_err(|source| SpecError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = parse_spec(BufReader::new(file), lookup)?;

    info!(
        "Loaded {:?}: {} connections, link scenario {}",
        path,
        spec.nb_connections,
        match spec.link_scenario.named() {
            Some(id) => id.to_string(),
            None => format!("with {} custom segments", spec.nb_link_segments()),
        }
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CcRegistry;
    use crate::spec::error::ValueError;
    use crate::spec::scenario::ScenarioId;
    use crate::spec::types::LinkScenario;

    #[test]
    fn test_parse_spec_str() {
        let registry = CcRegistry::with_defaults();
        let text = "main_start_time : 1000\r\n\
                    \n\
                    nb_connections: 2   \n\
                    main_cc_algo:cubic\n\
                    link_scenario:wifi_fade\n";
        let spec = parse_spec_str(text, &registry).unwrap();

        assert_eq!(spec.main_start_time, 1000);
        assert_eq!(spec.nb_connections, 2);
        assert_eq!(spec.main_cc_algo.map(|a| a.name().to_string()), Some("cubic".to_string()));
        assert_eq!(spec.link_scenario, LinkScenario::Named(ScenarioId::WifiFade));
    }

    #[test]
    fn test_empty_input() {
        let registry = CcRegistry::new();
        assert_eq!(parse_spec_str("", &registry).unwrap(), SimulationSpec::default());
        assert_eq!(parse_spec_str("\n  \n\t\n", &registry).unwrap(), SimulationSpec::default());
    }

    #[test]
    fn test_trailing_control_whitespace() {
        let registry = CcRegistry::new();
        let spec = parse_spec_str("latency: 5\x0b\njitter: 3\x0c\t\r\n", &registry).unwrap();
        assert_eq!(spec.latency, 5);
        assert_eq!(spec.jitter, 3);

        let mut spec = SimulationSpec::default();
        parse_spec_line(&mut spec, 1, "l4s_max: 9 \x0b\x0c", &registry).unwrap();
        assert_eq!(spec.l4s_max, 9);
    }

    #[test]
    fn test_last_value_wins() {
        let registry = CcRegistry::new();
        let spec = parse_spec_str("latency:10\nlatency:20\n", &registry).unwrap();
        assert_eq!(spec.latency, 20);
    }

    #[test]
    fn test_error_reports_line() {
        let registry = CcRegistry::new();
        let err = parse_spec_str("latency:10\n\nbogus_param:1\njitter:5\n", &registry).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err, SpecError::UnknownParameter { ref text, .. } if text == "bogus_param:1"));

        let err = parse_spec_str("jitter 5", &registry).unwrap_err();
        assert!(matches!(err, SpecError::MissingSeparator { line: 1, param: "jitter" }));

        let err = parse_spec_str("nb_connections:4000000000", &registry).unwrap_err();
        match err {
            SpecError::InvalidValue { line, param, value, source } => {
                assert_eq!(line, 1);
                assert_eq!(param, "nb_connections");
                assert_eq!(value, "4000000000");
                assert!(matches!(source, ValueError::OutOfRange { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_algorithm_is_fatal() {
        let registry = CcRegistry::with_defaults();
        let err = parse_spec_str("main_cc_algo: vegas", &registry).unwrap_err();
        assert!(matches!(
            err,
            SpecError::InvalidValue { source: ValueError::UnknownAlgorithm(_), .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let registry = CcRegistry::new();
        let bytes: &[u8] = b"latency:1\nqlog_dir:\xff\xfe\n";
        let err = parse_spec(bytes, &registry).unwrap_err();
        assert!(matches!(err, SpecError::Read { line: 2, .. }));
    }
}
