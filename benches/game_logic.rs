use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinyboy::core::arena::{clear_full_rows, probe};
use tinyboy::core::{Piece, Session};
use tinyboy::display::{BitRecorder, Framebuffer};
use tinyboy::engine::render_frame;
use tinyboy::types::{Buttons, PieceKind, ARENA_BOTTOM, ARENA_MAX_X, ARENA_MIN_X};

fn bench_tick(c: &mut Criterion) {
    let mut fb = Framebuffer::new();
    let mut session = Session::new();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            session.advance(&mut fb);
            session.tick(&mut fb, black_box(Buttons::NONE));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut fb = Framebuffer::new();
            for y in (ARENA_BOTTOM - 3)..=ARENA_BOTTOM {
                for x in ARENA_MIN_X..=ARENA_MAX_X {
                    fb.set(x, y, 2);
                }
            }
            clear_full_rows(&mut fb)
        })
    });
}

fn bench_probe(c: &mut Criterion) {
    let fb = Framebuffer::new();
    let piece = Piece::initialise(PieceKind::S);

    c.bench_function("probe", |b| {
        b.iter(|| probe(&fb, black_box(&piece), black_box(5), black_box(8)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut piece = Piece::initialise(PieceKind::L);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            piece.rotate();
        })
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let mut fb = Framebuffer::new();
    let mut session = Session::new();
    session.advance(&mut fb);
    let mut bus = BitRecorder::new();

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            bus.clear();
            render_frame(black_box(&fb), &mut bus);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_probe,
    bench_rotate,
    bench_render_frame
);
criterion_main!(benches);
