//! Rendering tests against the raster and recording surfaces.

use tictac_canvas::{
    Board, BoardRenderer, DisplayList, DrawCommand, PixelCanvas, Player, Rgb, SurfaceHandle,
};

fn busy_board() -> Board {
    Board::new()
        .place(0, 0, Player::X)
        .unwrap()
        .place(1, 1, Player::O)
        .unwrap()
        .place(2, 1, Player::X)
        .unwrap()
}

#[test]
fn test_repaint_is_pixel_identical() {
    let renderer = BoardRenderer::default();
    let board = busy_board();

    let mut canvas = PixelCanvas::new(480, 480);
    renderer.paint(&mut canvas, &board);
    let first = canvas.pixels().to_vec();
    renderer.paint(&mut canvas, &board);
    assert_eq!(canvas.pixels(), first.as_slice());
}

#[test]
fn test_repaint_ignores_prior_content() {
    let renderer = BoardRenderer::default();

    let mut dirty = PixelCanvas::new(480, 480);
    renderer.paint(&mut dirty, &busy_board());
    renderer.paint(&mut dirty, &Board::new());

    let mut fresh = PixelCanvas::new(480, 480);
    renderer.paint(&mut fresh, &Board::new());
    assert_eq!(dirty.pixels(), fresh.pixels());
}

#[test]
fn test_grid_bars_on_empty_board() {
    let mut canvas = PixelCanvas::new(480, 480);
    BoardRenderer::default().paint(&mut canvas, &Board::new());

    for x in 157..161 {
        assert_eq!(canvas.pixel(x, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(x + 160, 479), Some(Rgb::BLACK));
    }
    for y in 157..161 {
        assert_eq!(canvas.pixel(0, y), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(479, y + 160), Some(Rgb::BLACK));
    }
    assert_eq!(canvas.pixel(156, 10), Some(Rgb::WHITE));
    assert_eq!(canvas.pixel(161, 10), Some(Rgb::WHITE));

    // Two vertical and two horizontal bars, minus the four overlaps
    let bars = 2 * 4 * 480 + 2 * 4 * 480 - 4 * 16;
    assert_eq!(canvas.count(Rgb::BLACK), bars);
    assert_eq!(canvas.count(Rgb::WHITE), 480 * 480 - bars);
}

#[test]
fn test_marks_stay_inside_their_cell() {
    let board = Board::new().place(1, 1, Player::X).unwrap();
    let mut canvas = PixelCanvas::new(480, 480);
    BoardRenderer::default().paint(&mut canvas, &board);

    let mut empty = PixelCanvas::new(480, 480);
    BoardRenderer::default().paint(&mut empty, &Board::new());

    let mut ink = 0;
    for y in 0..480 {
        for x in 0..480 {
            if canvas.pixel(x, y) != empty.pixel(x, y) {
                ink += 1;
                assert!((160..320).contains(&x) && (160..320).contains(&y), "({x}, {y})");
            }
        }
    }
    assert!(ink > 0);
}

#[test]
fn test_display_list_replays_to_same_pixels() {
    let renderer = BoardRenderer::default();
    let board = busy_board();

    let mut list = DisplayList::new();
    renderer.paint(&mut list, &board);
    let mut replayed = PixelCanvas::new(480, 480);
    list.replay(&mut replayed);

    let mut direct = PixelCanvas::new(480, 480);
    renderer.paint(&mut direct, &board);
    assert_eq!(replayed.pixels(), direct.pixels());
}

#[test]
fn test_handle_detached_leaves_surface_untouched() {
    let renderer = BoardRenderer::default();
    let mut handle = SurfaceHandle::attached(PixelCanvas::new(480, 480));
    let canvas = handle.detach().unwrap();

    assert!(!renderer.draw(&mut handle, &busy_board()));
    assert_eq!(canvas.count(Rgb::BLACK), 480 * 480);
}

#[test]
fn test_draw_through_handle() {
    let renderer = BoardRenderer::default();
    let mut handle = SurfaceHandle::attached(DisplayList::new());
    assert!(renderer.draw(&mut handle, &busy_board()));

    let list = handle.get().unwrap();
    assert!(matches!(list.commands()[0], DrawCommand::SetFillColor(Rgb::WHITE)));
    assert_eq!(list.texts(), vec![("X", 20, -10), ("O", 180, 150), ("X", 180, 310)]);
}
