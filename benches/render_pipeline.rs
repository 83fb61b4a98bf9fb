use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{ClockConfig, Controller, Event, TileView};
use blockfall::engine::{Board, Simulation};
use blockfall::input::BindingTable;
use blockfall::term::{BoardView, Canvas, FrameBuffer, GameView, Viewport};

fn bench_board_render(c: &mut Criterion) {
    let board = Board::new(12345);
    let view = BoardView::new(board.width(), board.height(), 1);
    let (w, h) = view.surface_size();
    let mut canvas = Canvas::new(w, h);

    c.bench_function("board_render_10x20", |b| {
        b.iter(|| {
            let tiles = TileView::bind(black_box(&board));
            view.render(&mut canvas, &tiles)
        })
    });
}

fn bench_board_render_large_cells(c: &mut Criterion) {
    let board = Board::new(12345);
    let view = BoardView::new(board.width(), board.height(), 8);
    let (w, h) = view.surface_size();
    let mut canvas = Canvas::new(w, h);

    c.bench_function("board_render_cell_8", |b| {
        b.iter(|| {
            let tiles = TileView::bind(black_box(&board));
            view.render(&mut canvas, &tiles)
        })
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let board = Board::new(12345);
    let ctl = Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap();
    let mut game_view = GameView::for_simulation(&board, 1);
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("compose_frame_80x24", |b| {
        b.iter(|| game_view.render_into(&board, &ctl, Viewport::new(80, 24), &mut fb))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut board = Board::new(12345);
    let mut ctl = Controller::new(ClockConfig::default(), BindingTable::in_memory()).unwrap();
    let mut now = 0u64;

    c.bench_function("controller_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            ctl.handle(Event::Tick {
                now_ms: black_box(now),
            })
            .apply_to(&mut board);
        })
    });
}

criterion_group!(
    benches,
    bench_board_render,
    bench_board_render_large_cells,
    bench_full_frame,
    bench_tick
);
criterion_main!(benches);
