use attitude::{
    AttitudeGauge, Color, DrawCommand, GaugeConfig, GaugeError, Paint, PixelCanvas, Scene,
    SurfaceError,
};
use rand::Rng;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn drawn(gauge: &AttitudeGauge, width: f64, height: f64) -> Scene {
    let mut scene = Scene::new(width, height);
    gauge.draw(&mut scene).unwrap();
    scene
}

/// Commands between the first `Save` and its matching `Restore`.
fn horizon_block(commands: &[DrawCommand]) -> &[DrawCommand] {
    let start = commands.iter().position(|c| *c == DrawCommand::Save).unwrap();
    let end = commands.iter().position(|c| *c == DrawCommand::Restore).unwrap();
    &commands[start..=end]
}

fn marker_moves(commands: &[DrawCommand]) -> Vec<(f64, f64)> {
    // the marker block is the last save/restore pair
    let start = commands.iter().rposition(|c| *c == DrawCommand::Save).unwrap();
    commands[start..]
        .iter()
        .filter_map(|c| match c {
            DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn random_angles_clamp_into_bounds() {
    let mut rng = rand::rng();
    let config = GaugeConfig::builder()
        .min_angle(-180.0)
        .max_angle(270.0)
        .min_pitch(-30.0)
        .max_pitch(60.0)
        .build();
    let mut gauge = AttitudeGauge::new(config).unwrap();

    for _ in 0..500 {
        let yaw = rng.random_range(-2000.0..2000.0);
        let pitch = rng.random_range(-500.0..500.0);
        gauge.set_yaw(yaw);
        gauge.set_pitch(pitch);
        assert_eq!(gauge.yaw(), f64::clamp(yaw, -180.0, 270.0));
        assert_eq!(gauge.pitch(), f64::clamp(pitch, -30.0, 60.0));

        // writing the stored value back changes nothing
        let state = gauge.state();
        gauge.set_yaw(gauge.yaw());
        gauge.set_pitch(gauge.pitch());
        assert_eq!(gauge.state(), state);
    }
}

#[test]
fn yaw_beyond_bounds_clamps_instead_of_wrapping() {
    let mut gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    gauge.set_yaw(720.0);
    assert_eq!(gauge.yaw(), 360.0);
}

#[test]
fn repeated_draws_are_identical() {
    let mut gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    gauge.set_yaw(-77.0);
    gauge.set_pitch(12.5);

    let first = drawn(&gauge, 320.0, 240.0);
    let second = drawn(&gauge, 320.0, 240.0);
    assert_eq!(first.commands(), second.commands());
}

#[test]
fn default_gauge_on_200_square() {
    let mut gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    gauge.set_yaw(45.0);
    gauge.set_pitch(30.0);
    let scene = drawn(&gauge, 200.0, 200.0);
    let commands = scene.commands();

    // outer circle
    assert_eq!(commands[1], DrawCommand::BeginPath);
    assert_eq!(
        commands[2],
        DrawCommand::Arc {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
            start: 0.0,
            end: std::f64::consts::TAU
        }
    );

    let horizon = horizon_block(commands);
    assert_eq!(horizon[1], DrawCommand::Translate { dx: 100.0, dy: 100.0 });
    match horizon[2] {
        DrawCommand::Rotate(radians) => assert!(close(radians, -45f64.to_radians())),
        ref other => panic!("expected rotation, got {other:?}"),
    }

    let offset = attitude::pitch_offset(30.0, 80.0);
    assert!((offset - 26.67).abs() < 0.01);
    let gradient = horizon
        .iter()
        .find_map(|c| match c {
            DrawCommand::FillStyle(Paint::Linear(gradient)) => Some(gradient.clone()),
            _ => None,
        })
        .unwrap();
    assert!(close(gradient.y0, -80.0 + offset));
    assert!(close(gradient.y1, 80.0 + offset));
    let stops: Vec<(f64, Color)> = gradient.stops.iter().map(|s| (s.offset, s.color)).collect();
    assert_eq!(
        stops,
        vec![
            (0.0, Color::SKY_BLUE),
            (0.5, Color::SKY_BLUE),
            (0.5, Color::SADDLE_BROWN),
            (1.0, Color::SADDLE_BROWN),
        ]
    );
    assert!(horizon.contains(&DrawCommand::MoveTo { x: -80.0, y: offset }));
    assert!(horizon.contains(&DrawCommand::LineTo { x: 80.0, y: offset }));

    // cardinal ticks run from radius - 15 to radius along 0/90/180/270
    for (x, y) in [(100.0, 20.0), (180.0, 100.0), (100.0, 180.0), (20.0, 100.0)] {
        assert!(
            commands.iter().any(|c| match c {
                DrawCommand::LineTo { x: lx, y: ly } => close(*lx, x) && close(*ly, y),
                _ => false,
            }),
            "missing cardinal tick ending at ({x}, {y})"
        );
    }

    let cardinals: Vec<(&str, f64, f64)> = scene
        .texts()
        .filter(|(label, _, _)| ["N", "E", "S", "W"].contains(label))
        .collect();
    assert_eq!(cardinals.len(), 4);
    let (label, x, y) = cardinals[0];
    assert_eq!(label, "N");
    assert!(close(x, 100.0) && close(y, 100.0 - 92.5 + 5.0));
    let (label, x, y) = cardinals[1];
    assert_eq!(label, "E");
    assert!(close(x, 192.5) && close(y, 105.0));
}

#[test]
fn minor_heading_labels_are_tens_of_degrees() {
    let gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    let scene = drawn(&gauge, 200.0, 200.0);
    let minor: Vec<&str> = scene
        .texts()
        .map(|(label, _, _)| label)
        .skip(4)
        .take(8)
        .collect();
    assert_eq!(minor, vec!["3", "6", "12", "15", "21", "24", "30", "33"]);
}

#[test]
fn three_pitch_lines_label_only_the_even_rung() {
    let gauge = AttitudeGauge::new(GaugeConfig::builder().pitch_lines(3).build()).unwrap();
    let scene = drawn(&gauge, 200.0, 200.0);

    let ladder: Vec<(&str, f64, f64)> = scene
        .texts()
        .filter(|(label, _, _)| label.ends_with('0') && label.len() == 2 && *label != "30")
        .collect();
    assert_eq!(
        ladder,
        vec![
            ("20", 135.0, 84.0),
            ("20", 65.0, 84.0),
            ("20", 135.0, 124.0),
            ("20", 65.0, 124.0),
        ]
    );

    // each rung is one horizontal segment: three above, three below
    let rungs: Vec<f64> = scene
        .commands()
        .windows(2)
        .filter_map(|w| match (&w[0], &w[1]) {
            (DrawCommand::MoveTo { x: x0, y: y0 }, DrawCommand::LineTo { x: x1, y: y1 })
                if y0 == y1 && close(x0 + x1, 200.0) && *x0 >= 80.0 =>
            {
                Some(*y0)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rungs, vec![90.0, 110.0, 80.0, 120.0, 70.0, 130.0]);
}

#[test]
fn odd_rungs_are_short_and_even_rungs_long() {
    let gauge = AttitudeGauge::new(GaugeConfig::builder().pitch_lines(2).build()).unwrap();
    let scene = drawn(&gauge, 200.0, 200.0);
    let commands = scene.commands();
    assert!(commands.contains(&DrawCommand::MoveTo { x: 95.0, y: 90.0 }));
    assert!(commands.contains(&DrawCommand::LineTo { x: 105.0, y: 90.0 }));
    assert!(commands.contains(&DrawCommand::MoveTo { x: 80.0, y: 120.0 }));
    assert!(commands.contains(&DrawCommand::LineTo { x: 120.0, y: 120.0 }));
}

#[test]
fn fixed_marker_ignores_attitude() {
    let mut gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    let level = marker_moves(drawn(&gauge, 200.0, 200.0).commands());

    gauge.set_yaw(200.0);
    gauge.set_pitch(-70.0);
    let banked = marker_moves(drawn(&gauge, 200.0, 200.0).commands());

    assert_eq!(level, banked);
    let y = 100.0 + 80.0 / 90.0;
    assert_eq!(
        level,
        vec![(50.0, y), (90.0, y), (110.0, y), (150.0, y), (100.0, y + 2.0), (100.0, y - 2.0)]
    );

    // yellow center is the last thing stroked
    let commands = drawn(&gauge, 200.0, 200.0).take_commands();
    let tail = &commands[commands.len() - 3..];
    assert_eq!(
        tail,
        &[
            DrawCommand::StrokeStyle(Paint::Solid(Color::YELLOW)),
            DrawCommand::Stroke,
            DrawCommand::Restore
        ]
    );
}

#[test]
fn yaw_is_normalized_before_rotation() {
    let config = GaugeConfig::builder().max_angle(720.0).build();
    let mut wrapped = AttitudeGauge::new(config.clone()).unwrap();
    let mut plain = AttitudeGauge::new(config).unwrap();
    wrapped.set_yaw(370.0);
    plain.set_yaw(10.0);
    assert_eq!(
        drawn(&wrapped, 200.0, 200.0).commands(),
        drawn(&plain, 200.0, 200.0).commands()
    );

    wrapped.set_yaw(-10.0);
    plain.set_yaw(350.0);
    assert_eq!(
        drawn(&wrapped, 200.0, 200.0).commands(),
        drawn(&plain, 200.0, 200.0).commands()
    );
}

#[test]
fn detached_surface_fails_the_draw() {
    let gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    let mut scene = Scene::new(200.0, 200.0);
    scene.detach();
    assert_eq!(
        gauge.draw(&mut scene),
        Err(GaugeError::Surface(SurfaceError::Detached))
    );
}

fn rgb(canvas: &PixelCanvas, x: usize, y: usize) -> (u8, u8, u8) {
    let [r, g, b, _] = canvas.pixel(x, y).unwrap();
    (r, g, b)
}

#[test]
fn rasterized_level_gauge_has_sky_above_ground() {
    let gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();
    let mut frame = vec![0u8; 200 * 200 * 4];
    let mut canvas = PixelCanvas::new(&mut frame, 200, 200).unwrap();
    gauge.draw(&mut canvas).unwrap();

    assert_eq!(rgb(&canvas, 70, 60), Color::SKY_BLUE.as_tuple());
    assert_eq!(rgb(&canvas, 70, 140), Color::SADDLE_BROWN.as_tuple());
    assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0, 0]));
    // wing of the aircraft marker
    assert_eq!(rgb(&canvas, 60, 101), Color::RED.as_tuple());
}

#[test]
fn rasterized_gauge_follows_yaw_and_pitch() {
    let mut gauge = AttitudeGauge::new(GaugeConfig::default()).unwrap();

    gauge.set_yaw(180.0);
    let mut frame = vec![0u8; 200 * 200 * 4];
    let mut canvas = PixelCanvas::new(&mut frame, 200, 200).unwrap();
    gauge.draw(&mut canvas).unwrap();
    assert_eq!(rgb(&canvas, 70, 140), Color::SKY_BLUE.as_tuple());
    assert_eq!(rgb(&canvas, 70, 60), Color::SADDLE_BROWN.as_tuple());

    gauge.set_yaw(0.0);
    gauge.set_pitch(45.0);
    let mut frame = vec![0u8; 200 * 200 * 4];
    let mut canvas = PixelCanvas::new(&mut frame, 200, 200).unwrap();
    gauge.draw(&mut canvas).unwrap();
    // horizon pushed 40px down
    assert_eq!(rgb(&canvas, 70, 125), Color::SKY_BLUE.as_tuple());
    assert_eq!(rgb(&canvas, 70, 155), Color::SADDLE_BROWN.as_tuple());
}
