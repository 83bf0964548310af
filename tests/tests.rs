use std::f64::consts::TAU;

use gwsim::configuration::config::SceneConfig;
use gwsim::simulation::field::{polarization, Displacement, WaveField};
use gwsim::simulation::grid::{linspace, SpatialGrid};
use gwsim::simulation::params::WaveParameters;
use gwsim::simulation::scenario::Scenario;
use gwsim::simulation::states::TimeSample;
use gwsim::simulation::trajectory::OrbitModel;
use gwsim::GwError;

/// Wave constants of the default scene
pub fn test_wave() -> WaveParameters {
    WaveParameters {
        amplitude: 0.6,
        wave_number: 2.0,
        angular_frequency: TAU / 4.0,
        speed: 1.0,
        falloff: 18.0,
        extent: 6.0,
        epsilon: 1e-6,
    }
}

/// Orbit of the default scene
pub fn test_orbit() -> OrbitModel {
    OrbitModel::new(1.4, 4.0)
}

/// Sample times spread over a few periods, including negative time
pub fn sample_times() -> Vec<f64> {
    (-40..=40).map(|k| k as f64 * 0.37).collect()
}

// ==================================================================================
// Grid tests
// ==================================================================================

#[test]
fn linspace_hits_both_ends() {
    let axis = linspace(-6.0, 6.0, 60);
    assert_eq!(axis.len(), 60);
    assert_eq!(axis[0], -6.0);
    assert_eq!(axis[59], 6.0);

    let step = 12.0 / 59.0;
    for w in axis.windows(2) {
        assert!((w[1] - w[0] - step).abs() < 1e-12, "uneven spacing {:?}", w);
    }
}

#[test]
fn grid_follows_meshgrid_layout() {
    let grid = SpatialGrid::build(6.0, 60);
    assert_eq!(grid.x.shape(), (60, 60));
    assert_eq!(grid.y.shape(), (60, 60));

    // columns walk x, rows walk y
    assert_eq!(grid.point(0, 0), (-6.0, -6.0));
    assert_eq!(grid.point(0, 59), (6.0, -6.0));
    assert_eq!(grid.point(59, 0), (-6.0, 6.0));
    for i in 0..60 {
        assert_eq!(grid.x[(i, 7)], grid.axis[7]);
        assert_eq!(grid.y[(7, i)], grid.axis[7]);
    }
}

#[test]
fn nearest_index_finds_closest_point() {
    let grid = SpatialGrid::build(6.0, 60);
    let (i, j) = grid.nearest_index(2.0, 0.0);
    let (x, y) = grid.point(i, j);
    let spacing = 12.0 / 59.0;
    assert!((x - 2.0).abs() <= 0.5 * spacing + 1e-12);
    assert!(y.abs() <= 0.5 * spacing + 1e-12);
}

// ==================================================================================
// Trajectory tests
// ==================================================================================

#[test]
fn masses_are_antipodal_on_the_orbit() {
    let orbit = test_orbit();
    for t in sample_times() {
        let pair = orbit.positions(t);
        assert!((pair.first + pair.second).norm() < 1e-12, "not antipodal at t={t}");
        assert!((pair.first.norm() - 1.4).abs() < 1e-12);
        assert!((pair.second.norm() - 1.4).abs() < 1e-12);
    }
}

#[test]
fn orbit_is_periodic() {
    let orbit = test_orbit();
    for t in sample_times() {
        let a = orbit.positions(t);
        let b = orbit.positions(t + orbit.period);
        assert!((a.first - b.first).norm() < 1e-9, "drift at t={t}");
        assert!((a.second - b.second).norm() < 1e-9);
    }
}

#[test]
fn orbit_starts_on_positive_x_and_turns_counterclockwise() {
    let orbit = test_orbit();
    let start = orbit.positions(0.0);
    assert_eq!(start.first.x, 1.4);
    assert_eq!(start.first.y, 0.0);

    // a quarter period later the first mass sits on +y
    let quarter = orbit.positions(1.0);
    assert!(quarter.first.x.abs() < 1e-12);
    assert!((quarter.first.y - 1.4).abs() < 1e-12);
    assert!((orbit.angular_velocity() - TAU / 4.0).abs() < 1e-15);
}

// ==================================================================================
// Wave field tests
// ==================================================================================

#[test]
fn field_is_deterministic() {
    let wave = test_wave();
    let grid = SpatialGrid::build(6.0, 60);
    for t in sample_times() {
        for &(x, y) in &[(0.3, -1.7), (2.0, 0.0), (-5.9, 4.4)] {
            let a = wave.displacement_at(x, y, t);
            let b = wave.displacement_at(x, y, t);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
    let f1 = WaveField::compute(&grid, &wave, 1.25);
    let f2 = WaveField::compute(&grid, &wave, 1.25);
    assert!(f1.z.iter().zip(f2.z.iter()).all(|(a, b)| a.to_bits() == b.to_bits()));
}

#[test]
fn field_at_origin_is_finite_and_bounded() {
    let wave = test_wave();
    for t in sample_times() {
        let z = wave.displacement_at(0.0, 0.0, t);
        assert!(z.is_finite());
        assert!(z.abs() <= wave.amplitude);
    }
}

#[test]
fn polarization_vanishes_on_diagonals() {
    let wave = test_wave();
    for a in [-5.5, -2.0, -0.1, 0.0, 0.7, 3.3, 6.0] {
        assert_eq!(polarization(a, a, 6.0), 0.0);
        assert_eq!(polarization(a, -a, 6.0), 0.0);
        for t in sample_times() {
            assert_eq!(wave.displacement_at(a, a, t), 0.0);
            assert_eq!(wave.displacement_at(-a, a, t), 0.0);
        }
    }
}

#[test]
fn field_matches_reference_value() {
    let wave = test_wave();
    let (x, y) = (2.0_f64, 0.0_f64);
    let r = 4.0_f64.sqrt() + 1e-6;
    let reference = 0.6 * (2.0 * r).sin() * (x * x - y * y) / 36.0 * (-(r * r) / 18.0).exp();

    let value = wave.displacement_at(x, y, 0.0);
    assert!((value - reference).abs() < 1e-6, "got {value}, expected {reference}");
}

#[test]
fn grid_sample_matches_point_formula() {
    let wave = test_wave();
    let grid = SpatialGrid::build(6.0, 60);
    let field = WaveField::compute(&grid, &wave, 0.0);

    let (i, j) = grid.nearest_index(2.0, 0.0);
    let (x, y) = grid.point(i, j);
    assert_eq!(field.value(i, j).to_bits(), wave.displacement_at(x, y, 0.0).to_bits());
}

#[test]
fn field_stays_within_amplitude_on_grid() {
    let wave = test_wave();
    let grid = SpatialGrid::build(6.0, 60);
    for t in [0.0, 0.5, 1.9, 3.3] {
        let field = WaveField::compute(&grid, &wave, t);
        let (lo, hi) = field.range().expect("non-empty field");
        assert!(lo >= -wave.amplitude && hi <= wave.amplitude);
        assert_eq!(field.t, t);
    }
}

#[test]
fn field_repeats_every_orbital_period() {
    let wave = test_wave();
    for &(x, y) in &[(1.0, 0.2), (-3.0, 0.5), (0.4, 4.0)] {
        let a = wave.displacement_at(x, y, 0.8);
        let b = wave.displacement_at(x, y, 0.8 + 4.0);
        assert!((a - b).abs() < 1e-12);
    }
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn default_scene_matches_built_in_constants() {
    let cfg = SceneConfig::default();
    assert_eq!(cfg.animation.fps, 30);
    assert_eq!(cfg.animation.duration, 12.0);
    assert_eq!(cfg.animation.output.to_str(), Some("outputs/gravitational_wave.mp4"));
    assert_eq!(cfg.grid.extent, 6.0);
    assert_eq!(cfg.grid.points, 60);
    assert_eq!(cfg.wave.amplitude, 0.6);
    assert_eq!(cfg.wave.wave_number, 2.0);
    assert_eq!(cfg.wave.falloff, 18.0);
    assert_eq!(cfg.orbit.radius, 1.4);
    assert_eq!(cfg.orbit.period, 4.0);
    assert_eq!(cfg.render.mass_colors, ["#ff1744".to_string(), "#f5f5f5".to_string()]);
    assert_eq!(cfg.render.mass_height_offset, 0.9);
    assert_eq!(cfg.render.pixel_size(), (1280, 960));
    assert_eq!(cfg.encoder.bitrate, 1800);
    assert_eq!(cfg.total_frames(), 360);
    cfg.validate().expect("defaults are valid");
}

#[test]
fn yaml_overrides_only_named_fields() {
    let yaml = "
animation:
  fps: 10
grid:
  points: 20
render:
  mass_colors: ['#000000', '#ffffff']
";
    let cfg = SceneConfig::from_yaml_str(yaml).expect("valid scene");
    assert_eq!(cfg.animation.fps, 10);
    assert_eq!(cfg.animation.duration, 12.0);
    assert_eq!(cfg.grid.points, 20);
    assert_eq!(cfg.grid.extent, 6.0);
    assert_eq!(cfg.render.mass_colors[0], "#000000");
    assert_eq!(cfg.total_frames(), 120);
}

#[test]
fn empty_yaml_is_the_default_scene() {
    let cfg = SceneConfig::from_yaml_str("   \n").expect("empty scene");
    assert_eq!(cfg.total_frames(), 360);
}

#[test]
fn invalid_scenes_are_rejected() {
    let cases: Vec<(&str, Box<dyn Fn(&mut SceneConfig)>)> = vec![
        ("zero fps", Box::new(|c: &mut SceneConfig| c.animation.fps = 0)),
        ("fractional frames", Box::new(|c: &mut SceneConfig| c.animation.duration = 12.01)),
        ("single grid point", Box::new(|c: &mut SceneConfig| c.grid.points = 1)),
        ("negative extent", Box::new(|c: &mut SceneConfig| c.grid.extent = -1.0)),
        ("zero period", Box::new(|c: &mut SceneConfig| c.orbit.period = 0.0)),
        ("zero falloff", Box::new(|c: &mut SceneConfig| c.wave.falloff = 0.0)),
        ("odd width", Box::new(|c: &mut SceneConfig| c.render.figure_size = [8.0, 6.0 + 1.0 / 160.0])),
        ("flipped z limits", Box::new(|c: &mut SceneConfig| c.render.z_limits = [1.5, -1.5])),
        ("bad color", Box::new(|c: &mut SceneConfig| c.render.mass_colors[1] = "#12345".to_string())),
        ("alpha above one", Box::new(|c: &mut SceneConfig| c.render.surface_alpha = 1.5)),
        ("no contour levels", Box::new(|c: &mut SceneConfig| c.render.contour_levels = 0)),
        ("zero bitrate", Box::new(|c: &mut SceneConfig| c.encoder.bitrate = 0)),
        ("empty encoder", Box::new(|c: &mut SceneConfig| c.encoder.binary = " ".to_string())),
    ];
    for (name, mutate) in cases {
        let mut cfg = SceneConfig::default();
        mutate(&mut cfg);
        match cfg.validate() {
            Err(GwError::Config(_)) => {}
            other => panic!("{name}: expected a config error, got {other:?}"),
        }
    }
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = SceneConfig::from_yaml_str("grid: [1, 2").unwrap_err();
    assert!(matches!(err, GwError::Yaml(_)), "got {err:?}");
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_ties_wave_frequency_to_orbit() {
    let sc = Scenario::build_scenario(SceneConfig::default()).expect("default scenario");
    assert!((sc.wave.angular_frequency - TAU / 4.0).abs() < 1e-15);
    assert_eq!(sc.wave.extent, 6.0);
    assert_eq!(sc.wave.speed, 1.0);
    assert_eq!(sc.wave.epsilon, 1e-6);
    assert_eq!(sc.grid.points(), 60);
    assert_eq!(sc.total_frames, 360);
}

#[test]
fn time_samples_are_frame_over_fps() {
    let sc = Scenario::build_scenario(SceneConfig::default()).expect("default scenario");
    let samples: Vec<TimeSample> = sc.time_samples().collect();
    assert_eq!(samples.len(), 360);
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(s.frame, i);
        assert_eq!(s.t, i as f64 / 30.0);
    }
    assert!(samples.windows(2).all(|w| w[1].t > w[0].t));
}

#[test]
fn invalid_config_fails_scenario_build() {
    let mut cfg = SceneConfig::default();
    cfg.grid.points = 0;
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn shipped_scenes_parse() {
    let full = SceneConfig::from_yaml_str(include_str!("../scenarios/default.yaml")).expect("default.yaml");
    assert_eq!(full.total_frames(), 360);
    assert_eq!(full.render.pixel_size(), (1280, 960));
    assert_eq!(full.render.axis_labels[2], "z (strain)");

    let preview = SceneConfig::from_yaml_str(include_str!("../scenarios/preview.yaml")).expect("preview.yaml");
    assert_eq!(preview.total_frames(), 45);
    assert_eq!(preview.render.pixel_size(), (480, 360));
}
