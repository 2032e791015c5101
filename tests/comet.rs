use std::f64::consts::PI;

use starfield_wasm::comet::{
    opacity_at, spawn_probability, Comet, CometState, COMET_COLOR, COMET_GLOW_LENGTH,
    COMET_MIN_OPACITY, COMET_SPEED,
};
use starfield_wasm::context::DrawContext;
use starfield_wasm::drawable::Drawable;
use starfield_wasm::recording::{Command, RecordingSurface};

fn fg(fps: u32) -> DrawContext<RecordingSurface> {
    DrawContext::new(RecordingSurface::new(1800, 1200), fps)
}

fn spawn(comet: &mut Comet, draw: &DrawContext<RecordingSurface>) {
    for _ in 0..100_000 {
        comet.step(draw);
        if comet.is_active() {
            return;
        }
    }
    panic!("comet never spawned");
}

#[test]
fn spawn_probability_edges() {
    assert_eq!(spawn_probability(0.0, 40), 0.0);
    assert!((spawn_probability(100.0, 40) - 1.0 / 40.0).abs() < 1e-15);
    assert!((spawn_probability(100.0, 25) - 1.0 / 25.0).abs() < 1e-15);
    assert_eq!(spawn_probability(100.0, 0), 0.0);
    assert_eq!(spawn_probability(1e9, 40), 1.0);
}

#[test]
fn zero_frequency_never_spawns() {
    let draw = fg(40);
    let mut comet = Comet::new(0.0, 1);
    for _ in 0..20_000 {
        comet.draw(&draw).unwrap();
        assert_eq!(comet.state(), &CometState::Idle);
    }
    assert!(draw.surface().commands().is_empty());
}

#[test]
fn static_layer_never_spawns() {
    let draw = fg(0);
    let mut comet = Comet::new(100.0, 1);
    for _ in 0..5_000 {
        comet.step(&draw);
    }
    assert!(!comet.is_active());
}

#[test]
fn empirical_spawn_rate_matches_frequency() {
    // 400 / 100 / 40 = 0.1 per idle frame
    let draw = fg(40);
    let mut comet = Comet::new(400.0, 0xC0FFEE);
    let (mut idle_frames, mut spawns) = (0u32, 0u32);
    for _ in 0..40_000 {
        let was_idle = !comet.is_active();
        comet.step(&draw);
        if was_idle {
            idle_frames += 1;
            if comet.is_active() {
                spawns += 1;
            }
        }
    }
    let rate = f64::from(spawns) / f64::from(idle_frames);
    let counts = format!("spawns={spawns} idle={idle_frames}");
    assert!((rate - 0.1).abs() < 0.02, "rate={rate} {counts}");
}

#[test]
fn new_show_is_within_configured_jitter() {
    let draw = fg(40);
    let max_side = 1800.0;
    for seed in 0..50 {
        let mut comet = Comet::new(100.0, seed);
        spawn(&mut comet, &draw);
        let CometState::Active(show) = comet.state() else {
            unreachable!()
        };
        assert_eq!(show.position, show.start);
        assert_eq!(show.opacity, 0.0);
        assert_eq!(show.rgb, COMET_COLOR);
        assert!((0.2..0.8).contains(&show.width), "width={}", show.width);
        let speeds = COMET_SPEED * 0.85..COMET_SPEED * 1.15;
        assert!(speeds.contains(&show.speed));
        let reach = max_side * 0.6;
        let distances = reach * 0.7..reach * 1.3;
        assert!(distances.contains(&show.distance_to_target));

        // start is at most 1.5 * max_side / 3 from center on each axis
        let (dx, dy) = (show.start.0 - 900.0, show.start.1 - 600.0);
        assert!(dx.abs() <= max_side / 2.0 && dy.abs() <= max_side / 2.0);

        // heads back across the canvas, never straight out past its start
        let outward = dy.atan2(dx);
        let diff = (show.direction - outward).rem_euclid(2.0 * PI);
        let cone = PI / 6.0;
        let back = 2.0 * PI - cone;
        assert!(diff > cone && diff < back, "seed={seed} diff={diff}");
    }
}

#[test]
fn active_show_stays_visible_then_reverts_exactly_at_target() {
    let draw = fg(40);
    let mut comet = Comet::new(100.0, 42);
    spawn(&mut comet, &draw);

    let mut frames = 0;
    while let CometState::Active(show) = comet.state().clone() {
        let next = (
            show.position.0 + show.speed * show.direction.cos(),
            show.position.1 + show.speed * show.direction.sin(),
        );
        let traveled = (next.0 - show.start.0).hypot(next.1 - show.start.1);

        comet.step(&draw);
        frames += 1;
        match comet.state() {
            CometState::Active(now) => {
                assert!(traveled <= show.distance_to_target);
                let opacity = now.opacity;
                let visible = (COMET_MIN_OPACITY..=1.0).contains(&opacity);
                assert!(visible, "opacity={opacity}");
            }
            CometState::Idle => assert!(traveled > show.distance_to_target),
        }
        assert!(frames < 1_000, "show never ended");
    }
    assert!(frames > 1);
}

#[test]
fn opacity_is_floored_and_capped() {
    for i in 0..=200 {
        let progress = f64::from(i) / 100.0;
        let o = opacity_at(progress);
        let visible = (COMET_MIN_OPACITY..=1.0).contains(&o);
        assert!(visible, "progress={progress} opacity={o}");
    }
    assert_eq!(opacity_at(0.0), COMET_MIN_OPACITY);
    assert_eq!(opacity_at(0.95), COMET_MIN_OPACITY);
    assert_eq!(opacity_at(-0.5), COMET_MIN_OPACITY);
    assert_eq!(opacity_at(f64::NAN), 1.0);
}

#[test]
fn active_comet_paints_glow_with_fresh_state() {
    let draw = fg(40);
    let mut comet = Comet::new(100.0, 3);
    spawn(&mut comet, &draw);
    draw.surface().clear_commands();

    comet.draw(&draw).unwrap();
    let CometState::Active(show) = comet.state().clone() else {
        panic!("show ended after one frame");
    };
    let commands = draw.surface().commands();
    assert_eq!(commands.first(), Some(&Command::Save));
    assert_eq!(commands.last(), Some(&Command::Restore));
    assert!(commands.contains(&Command::BeginPath));
    assert!(commands.contains(&Command::ShadowBlur(0.0)));
    assert!(commands.contains(&Command::GlobalAlpha(show.opacity)));

    let ellipse = commands.iter().find_map(|c| match c {
        Command::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
        } => Some((*x, *y, *radius_x, *radius_y, *rotation)),
        _ => None,
    });
    let (x, y, rx, ry, rotation) = ellipse.expect("no ellipse");
    assert_eq!((x, y), show.position);
    assert_eq!(rx, show.width);
    assert_eq!(ry, COMET_GLOW_LENGTH);
    assert!((rotation - (show.direction + PI / 2.0)).abs() < 1e-12);

    let gradient = commands.iter().find_map(|c| match c {
        Command::FillGradient(g) => Some(g.clone()),
        _ => None,
    });
    let gradient = gradient.expect("no gradient");
    let center = (gradient.x1, gradient.y1, gradient.r1);
    assert_eq!(center, (x, y, COMET_GLOW_LENGTH));
    assert_eq!(gradient.stops.len(), 2);
    assert_eq!(gradient.stops[0].1, "rgba(255, 207, 207, 1)");
    assert_eq!(gradient.stops[1].1, "rgba(255, 207, 207, 0)");
    assert_eq!(draw.surface().count(|c| *c == Command::Fill), 1);
}

#[test]
fn spawn_frame_paints_nothing() {
    let draw = fg(40);
    let mut comet = Comet::new(100.0, 9);
    let mut frames = 0;
    while !comet.is_active() {
        comet.draw(&draw).unwrap();
        frames += 1;
        assert!(frames < 100_000, "comet never spawned");
    }
    assert!(draw.surface().commands().is_empty());

    comet.draw(&draw).unwrap();
    let alphas: Vec<f64> = draw
        .surface()
        .commands()
        .into_iter()
        .filter_map(|c| match c {
            Command::GlobalAlpha(a) => Some(a),
            _ => None,
        })
        .collect();
    assert_eq!(alphas.len(), 1);
    assert!(alphas[0] >= COMET_MIN_OPACITY, "alpha={}", alphas[0]);
}

#[test]
fn painted_alpha_is_never_transparent() {
    let draw = fg(40);
    let mut comet = Comet::new(400.0, 11);
    for _ in 0..5_000 {
        comet.draw(&draw).unwrap();
    }
    let alphas: Vec<f64> = draw
        .surface()
        .commands()
        .into_iter()
        .filter_map(|c| match c {
            Command::GlobalAlpha(a) => Some(a),
            _ => None,
        })
        .collect();
    assert!(!alphas.is_empty());
    let visible = COMET_MIN_OPACITY..=1.0;
    assert!(alphas.iter().all(|a| visible.contains(a)), "{alphas:?}");
}
