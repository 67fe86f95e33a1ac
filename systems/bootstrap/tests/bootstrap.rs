use glam::DVec3;
use room_wavefronts_core::{
    Axis, ConfigError, RoomDimensions, SimulationConfig, DEFAULT_REFERENCE_SPL,
};
use room_wavefronts_system_bootstrap::Bootstrap;
use room_wavefronts_world::query;

fn config_with_room(length: f64, width: f64, height: f64) -> SimulationConfig {
    SimulationConfig {
        room: Some(RoomDimensions {
            length,
            width,
            height,
        }),
        ..SimulationConfig::default()
    }
}

#[test]
fn omitted_sources_default_to_single_centered_source() {
    let world = Bootstrap
        .world(&config_with_room(5.0, 4.0, 3.0))
        .expect("defaults resolve");

    let sources = query::sources(&world);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].position(), DVec3::new(2.5, 2.0, 1.5));
    assert_eq!(sources[0].reference_spl(), DEFAULT_REFERENCE_SPL);
}

#[test]
fn omitted_levels_default_for_every_source() {
    let config = SimulationConfig {
        sources: Some(vec![[1.0, 1.0, 1.0], [2.0, 2.0, 1.0]]),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    let world = Bootstrap.world(&config).expect("defaults resolve");

    assert!(query::sources(&world)
        .iter()
        .all(|source| source.reference_spl() == 110.0));
}

#[test]
fn explicit_sources_keep_input_order() {
    let config = SimulationConfig {
        sources: Some(vec![[4.0, 1.0, 1.0], [1.0, 4.0, 2.0]]),
        spl: Some(vec![95.0, 105.0]),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    let world = Bootstrap.world(&config).expect("valid config");
    let sources = query::sources(&world);

    assert_eq!(sources[0].position(), DVec3::new(4.0, 1.0, 1.0));
    assert_eq!(sources[0].reference_spl(), 95.0);
    assert_eq!(sources[1].reference_spl(), 105.0);
}

#[test]
fn single_level_without_sources_applies_to_default_source() {
    let config = SimulationConfig {
        spl: Some(vec![98.0]),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    let world = Bootstrap.world(&config).expect("valid config");

    assert_eq!(query::sources(&world)[0].reference_spl(), 98.0);
}

#[test]
fn mismatched_level_count_is_rejected() {
    let config = SimulationConfig {
        sources: Some(vec![[1.0, 1.0, 1.0], [2.0, 2.0, 1.0]]),
        spl: Some(vec![100.0, 105.0, 110.0]),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    assert_eq!(
        Bootstrap.world(&config),
        Err(ConfigError::SourceCountMismatch {
            sources: 2,
            levels: 3,
        })
    );
}

#[test]
fn empty_source_list_is_rejected() {
    let config = SimulationConfig {
        sources: Some(Vec::new()),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    assert_eq!(Bootstrap.world(&config), Err(ConfigError::EmptySourceList));
}

#[test]
fn invalid_room_is_rejected_before_sources_are_checked() {
    let config = SimulationConfig {
        sources: Some(vec![[1.0, 1.0, 1.0]]),
        spl: Some(vec![100.0, 100.0]),
        ..config_with_room(5.0, -2.0, 3.0)
    };

    assert_eq!(
        Bootstrap.world(&config),
        Err(ConfigError::InvalidRoomDimension {
            axis: Axis::Y,
            value: -2.0,
        })
    );
}

#[test]
fn missing_room_is_rejected() {
    assert_eq!(
        Bootstrap.world(&SimulationConfig::default()),
        Err(ConfigError::MissingRoom)
    );
}

#[test]
fn negative_duration_is_rejected() {
    let config = SimulationConfig {
        tmax: Some(-0.5),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    assert_eq!(
        Bootstrap.world(&config),
        Err(ConfigError::InvalidDuration { duration: -0.5 })
    );
}

#[test]
fn duration_with_too_many_steps_is_rejected() {
    let config = SimulationConfig {
        tmax: Some(1e16),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    assert!(matches!(
        Bootstrap.world(&config),
        Err(ConfigError::StepCountOverflow { duration, .. }) if duration == 1e16
    ));
}

#[test]
fn frequency_is_stored_without_changing_the_clock() {
    let plain = Bootstrap
        .world(&config_with_room(5.0, 5.0, 3.0))
        .expect("valid config");
    let driven = Bootstrap
        .world(&SimulationConfig {
            frequency: Some(1000.0),
            ..config_with_room(5.0, 5.0, 3.0)
        })
        .expect("valid config");

    assert_eq!(query::driving_frequency(&driven), Some(1000.0));
    assert_eq!(query::clock(&plain), query::clock(&driven));
    assert_eq!(query::sources(&plain), query::sources(&driven));
}

#[test]
fn sources_outside_the_room_are_accepted() {
    let config = SimulationConfig {
        sources: Some(vec![[7.0, 1.0, 1.0]]),
        ..config_with_room(5.0, 5.0, 3.0)
    };

    assert!(Bootstrap.world(&config).is_ok());
}
