//! Config file loading and merging with command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use room_wavefronts_core::SimulationConfig;

/// Reads and parses a TOML config file.
pub(crate) fn load(path: &Path) -> Result<SimulationConfig> {
    info!("loading simulation config from {}", path.display());
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(contents: &str) -> Result<SimulationConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Field-wise merge where every value present in `overrides` wins.
pub(crate) fn merge(base: SimulationConfig, overrides: SimulationConfig) -> SimulationConfig {
    SimulationConfig {
        room: overrides.room.or(base.room),
        frequency: overrides.frequency.or(base.frequency),
        sources: overrides.sources.or(base.sources),
        spl: overrides.spl.or(base.spl),
        tmax: overrides.tmax.or(base.tmax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_wavefronts_core::RoomDimensions;

    const SAMPLE: &str = r#"
room = { length = 5.0, width = 5.0, height = 3.0 }
frequency = 1000.0
tmax = 0.05
sources = [[2.5, 2.5, 1.5]]
spl = [110.0]
"#;

    #[test]
    fn parses_complete_file() {
        let config = parse(SAMPLE).expect("sample parses");

        assert_eq!(
            config,
            SimulationConfig {
                room: Some(RoomDimensions {
                    length: 5.0,
                    width: 5.0,
                    height: 3.0,
                }),
                frequency: Some(1000.0),
                sources: Some(vec![[2.5, 2.5, 1.5]]),
                spl: Some(vec![110.0]),
                tmax: Some(0.05),
            }
        );
    }

    #[test]
    fn omitted_keys_stay_unset() {
        let config = parse("room = { length = 4.0, width = 3.0, height = 2.5 }\n")
            .expect("room-only file parses");

        assert!(config.room.is_some());
        assert_eq!(config.sources, None);
        assert_eq!(config.spl, None);
        assert_eq!(config.tmax, None);
        assert_eq!(config.frequency, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("rooom = { length = 4.0, width = 3.0, height = 2.5 }\n").is_err());
    }

    #[test]
    fn command_line_values_win_and_gaps_fall_through() {
        let base = parse(SAMPLE).expect("sample parses");
        let overrides = SimulationConfig {
            spl: Some(vec![90.0]),
            tmax: Some(0.01),
            ..SimulationConfig::default()
        };

        let merged = merge(base.clone(), overrides);

        assert_eq!(merged.room, base.room);
        assert_eq!(merged.sources, base.sources);
        assert_eq!(merged.frequency, Some(1000.0));
        assert_eq!(merged.spl, Some(vec![90.0]));
        assert_eq!(merged.tmax, Some(0.01));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = load(Path::new("/nonexistent/room-wavefronts.toml"))
            .expect_err("missing file must fail");

        assert!(error.to_string().contains("room-wavefronts.toml"));
    }
}
