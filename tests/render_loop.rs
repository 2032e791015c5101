use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_wasm::astre::AstreArgs;
use starfield_wasm::body::Body;
use starfield_wasm::context::DrawContext;
use starfield_wasm::draw::{FrameDriver, FramePacer, ManualDriver, RenderLoop, Teardown};
use starfield_wasm::nebula::Nebula;
use starfield_wasm::recording::{Command, RecordingSurface};
use starfield_wasm::star::Star;

fn context(fps: u32) -> Rc<DrawContext<RecordingSurface>> {
    Rc::new(DrawContext::new(RecordingSurface::new(400, 300), fps))
}

fn star(draw: &DrawContext<RecordingSurface>, width: f64, color: &str) -> Body {
    let args = AstreArgs {
        width,
        distance: 10.0,
        speed: 1.0,
        ..AstreArgs::default()
    };
    Star::new(draw, args, color, &mut StdRng::seed_from_u64(11)).into()
}

fn arcs(surface: &RecordingSurface) -> usize {
    surface.count(|c| matches!(c, Command::Arc { .. }))
}

fn fill(color: &str) -> Command {
    Command::FillColor(color.to_owned())
}

fn whole_canvas() -> (f64, f64, f64, f64) {
    (0.0, 0.0, 400.0, 300.0)
}

#[test]
fn pacer_skips_until_step_elapsed() {
    let mut pacer = FramePacer::new(40);
    assert_eq!(pacer.step_ms(), 25.0);
    assert!(pacer.ready(0.0));
    assert!(!pacer.ready(10.0));
    assert!(pacer.ready(25.0));
    assert!(!pacer.ready(49.0));
    assert!(pacer.ready(50.0));
}

#[test]
fn pacer_runs_first_frame_at_any_time() {
    let mut pacer = FramePacer::new(40);
    assert!(pacer.ready(1.0));
}

#[test]
fn static_layer_paints_exactly_once() {
    let draw = context(0);
    let mut driver = ManualDriver::new();
    let nebula = Nebula::new(1.0, &mut StdRng::seed_from_u64(1));
    let bodies = vec![Rc::new(RefCell::new(nebula)).into()];
    let render_loop = RenderLoop::new(draw.clone(), bodies, Some("#000".to_owned()));
    let _teardown = driver.drive(render_loop).unwrap();

    for _ in 0..50 {
        assert_eq!(driver.advance(100.0), 0);
    }
    let live = driver.loops();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].borrow().frames(), 1);
    assert!(!live[0].borrow().wants_frames());
    let clears = draw
        .surface()
        .count(|c| matches!(c, Command::ClearRect { .. }));
    assert_eq!(clears, 1);
}

#[test]
fn animated_layer_follows_frame_rate() {
    let draw = context(40);
    let mut driver = ManualDriver::new();
    let bodies = vec![star(&draw, 1.0, "#fff")];
    let _teardown = driver
        .drive(RenderLoop::new(draw.clone(), bodies, None))
        .unwrap();

    let painted: usize = (0..100).map(|_| driver.advance(10.0)).sum();
    assert_eq!(painted, 33);
    assert_eq!(driver.loops()[0].borrow().frames(), 34);
    assert_eq!(arcs(draw.surface()), 34);
}

#[test]
fn frame_clears_fills_then_draws_in_order() {
    let draw = context(40);
    let bodies = vec![star(&draw, 1.0, "#111"), star(&draw, 1.0, "#222")];
    let bg_color = Some("#030014".to_owned());
    let mut render_loop = RenderLoop::new(draw.clone(), bodies, bg_color);
    render_loop.start(0.0);

    let commands = draw.surface().commands();
    let position = |color: &str| commands.iter().position(|c| *c == fill(color));
    let (x, y, w, h) = whole_canvas();
    assert_eq!(commands[0], Command::Save);
    assert_eq!(commands[1], Command::ClearRect { x, y, w, h });
    let bg = position("#030014").unwrap();
    assert_eq!(commands[bg + 1], Command::FillRect { x, y, w, h });

    let first = position("#111").unwrap();
    let second = position("#222").unwrap();
    assert!(bg < first && first < second);
}

#[test]
fn no_background_fill_without_color() {
    let draw = context(40);
    let mut render_loop = RenderLoop::new(draw.clone(), Vec::new(), None);
    render_loop.start(0.0);
    let fills = draw
        .surface()
        .count(|c| matches!(c, Command::FillRect { .. }));
    assert_eq!(fills, 0);
    assert_eq!(render_loop.frames(), 1);
}

#[test]
fn failing_drawable_does_not_blank_the_frame() {
    let draw = context(40);
    // A negative radius is rejected by the surface.
    let bodies = vec![
        star(&draw, 1.0, "#111"),
        star(&draw, -5.0, "#bad"),
        star(&draw, 1.0, "#222"),
    ];
    let mut render_loop = RenderLoop::new(draw.clone(), bodies, None);
    render_loop.start(0.0);
    assert!(render_loop.tick(25.0));

    assert_eq!(arcs(draw.surface()), 4);
    assert_eq!(render_loop.frames(), 2);
    assert_eq!(draw.surface().count(|c| *c == fill("#222")), 2);
}

#[test]
fn teardown_is_idempotent_and_stops_frames() {
    let draw = context(40);
    let mut driver = ManualDriver::new();
    let bodies = vec![star(&draw, 1.0, "#fff")];
    let mut teardown = driver
        .drive(RenderLoop::new(draw.clone(), bodies, None))
        .unwrap();

    driver.advance(25.0);
    teardown.run();
    teardown.run();
    assert!(teardown.is_done());

    assert_eq!(draw.surface().count(|c| *c == Command::Restore), 1);
    assert_eq!(driver.advance(1_000.0), 0);
    assert!(driver.loops().is_empty());
    assert_eq!(arcs(draw.surface()), 2);
}

#[test]
fn teardown_before_start_does_not_restore() {
    let draw = context(40);
    let mut render_loop = RenderLoop::new(draw.clone(), Vec::new(), None);
    render_loop.teardown();
    render_loop.start(0.0);
    assert!(!render_loop.tick(100.0));
    assert!(draw.surface().commands().is_empty());
}

#[test]
fn empty_teardown_is_done() {
    let mut teardown = Teardown::default();
    assert!(teardown.is_done());
    teardown.run();
}
