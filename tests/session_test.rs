//! End-to-end session tests: key events and frame ticks against the real board

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall::core::{ClockConfig, Controller, Overlay};
use blockfall::engine::{Board, Simulation};
use blockfall::input::BindingTable;
use blockfall::term::{FrameBuffer, Viewport, HALF_BLOCK};
use blockfall::types::FRAME_MS;
use blockfall::{Flow, Session};

fn session(seed: u32) -> Session<Board> {
    let ctl = Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap();
    Session::new(Board::new(seed), ctl, 1)
}

fn press(s: &mut Session<Board>, c: char) -> Flow {
    s.on_key(&KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn run_frames(s: &mut Session<Board>, from_ms: u64, frames: u64) -> u64 {
    let mut now = from_ms;
    for _ in 0..frames {
        now += FRAME_MS;
        s.tick(now);
    }
    now
}

fn screen(fb: &FrameBuffer) -> String {
    fb.cells().iter().map(|c| c.ch).collect()
}

#[test]
fn test_piece_falls_over_time() {
    let mut s = session(9);
    let y0 = s.simulation().active().y;

    // ~1s at 300ms per fall step
    run_frames(&mut s, 0, 62);
    assert_eq!(s.simulation().active().y, y0 + 3);
}

#[test]
fn test_shift_lands_on_the_next_stride() {
    let mut s = session(9);
    let x0 = s.simulation().active().x;

    press(&mut s, 'a');
    // Nothing moves until the stride threshold is crossed.
    assert_eq!(s.simulation().active().x, x0);
    run_frames(&mut s, 0, 10);
    assert_eq!(s.simulation().active().x, x0 - 1);
}

#[test]
fn test_paused_session_does_not_advance() {
    let mut s = session(9);
    let now = run_frames(&mut s, 0, 5);
    let before = s.simulation().tile_buffer().to_vec();

    s.on_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(s.controller().overlay(), Overlay::Paused);
    press(&mut s, 'a');
    run_frames(&mut s, now, 500);
    assert_eq!(s.simulation().tile_buffer(), before.as_slice());
}

#[test]
fn test_frames_show_canvas_or_panel() {
    let mut s = session(9);
    let mut fb = FrameBuffer::new(0, 0);
    let vp = Viewport::new(40, 30);

    s.tick(16);
    let stats = s.render_into(vp, &mut fb).unwrap();
    assert_eq!(stats.filled, 200);
    assert_eq!(stats.fallbacks, 0);
    assert!(fb.cells().iter().any(|c| c.ch == HALF_BLOCK));
    assert!(screen(&fb).contains("Score: 0"));

    s.on_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(s.render_into(vp, &mut fb), None);
    assert!(!fb.cells().iter().any(|c| c.ch == HALF_BLOCK));
    assert!(screen(&fb).contains("PAUSED"));
}

#[test]
fn test_quit_only_when_q_is_unbound() {
    let mut s = session(9);
    assert_eq!(press(&mut s, 'w'), Flow::Continue);
    assert_eq!(press(&mut s, 'q'), Flow::Quit);
}
