//! Framebuffer tests - packing, bounds and neighbour isolation

use tinyboy::display::Framebuffer;
use tinyboy::types::{SCREEN_COLS, SCREEN_ROWS};

#[test]
fn test_framebuffer_new_empty() {
    let fb = Framebuffer::new();
    for y in 0..SCREEN_ROWS as i8 {
        for x in 0..SCREEN_COLS as i8 {
            assert_eq!(fb.get(x, y), Some(0), "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_round_trip_every_code_both_parities() {
    let mut fb = Framebuffer::new();
    for code in 0..16u8 {
        for y in [6, 7] {
            fb.set(3, y, code);
            assert_eq!(fb.get(3, y), Some(code), "code {code} y {y}");
        }
    }
}

#[test]
fn test_write_leaves_packed_neighbour_alone() {
    let mut fb = Framebuffer::new();
    fb.set(9, 4, 0xA);
    fb.set(9, 5, 0x5);
    fb.set(9, 4, 0x3);
    assert_eq!(fb.get(9, 5), Some(0x5));
    assert_eq!(fb.packed_column(9).map(|col| col[2]), Some(0x53));
}

#[test]
fn test_out_of_bounds() {
    let mut fb = Framebuffer::new();
    assert_eq!(fb.get(-1, 0), None);
    assert_eq!(fb.get(0, SCREEN_ROWS as i8), None);
    fb.set(SCREEN_COLS as i8, 0, 7);
    fb.set(0, -1, 7);
    assert_eq!(fb, Framebuffer::new());
}

#[test]
fn test_fill_rect_clips() {
    let mut fb = Framebuffer::new();
    fb.fill_rect(14, 14, 4, 4, 2);
    assert_eq!(fb.get(15, 15), Some(2));
    assert_eq!(fb.get(13, 15), Some(0));
}
