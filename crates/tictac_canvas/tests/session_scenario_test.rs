//! End-to-end session scenarios: events in, board and paint out.

use tictac_canvas::{
    BoardRenderer, Cell, DisplayList, DrawCommand, Effect, InputEvent, Player, PointerPosition,
    Session, SurfaceGeometry, SurfaceHandle,
};

const LEFT: f64 = 64.0;
const TOP: f64 = 96.0;

/// Host-side glue: apply an event and repaint when asked.
fn step(
    session: Session,
    event: InputEvent,
    handle: &mut SurfaceHandle<DisplayList>,
    renderer: &BoardRenderer,
) -> (Session, Effect) {
    let transition = session.apply(event);
    if transition.effect == Effect::Redraw {
        if let Ok(list) = handle.get_mut() {
            list.clear();
        }
        renderer.draw(handle, transition.session.board());
    }
    (transition.session, transition.effect)
}

fn pointer_at_local(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMoved(PointerPosition::new(LEFT + x, TOP + y))
}

#[test]
fn test_click_center_cell_with_x() {
    let renderer = BoardRenderer::default();
    let mut handle = SurfaceHandle::attached(DisplayList::new());
    let session = Session::new(Player::X);

    let (session, effect) = step(
        session,
        InputEvent::SurfaceMounted(SurfaceGeometry::at(LEFT, TOP)),
        &mut handle,
        &renderer,
    );
    assert_eq!(effect, Effect::Redraw);
    assert!(handle.get().unwrap().texts().is_empty());

    let (session, _) = step(session, pointer_at_local(240.0, 240.0), &mut handle, &renderer);
    let (session, effect) = step(session, InputEvent::Clicked, &mut handle, &renderer);
    assert_eq!(effect, Effect::Redraw);

    let marked: Vec<_> = session
        .board()
        .cells()
        .filter(|(_, cell)| !cell.is_empty())
        .collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(session.board().get(1, 1), Some(Cell::Marked(Player::X)));

    let list = handle.get().unwrap();
    assert_eq!(list.texts(), vec![("X", 180, 150)]);
    let bars: Vec<_> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect {
                x, y, width, height, ..
            } if (*width, *height) != (480, 480) => Some((*x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(bars, vec![(157, 0), (317, 0), (0, 157), (0, 317)]);
}

#[test]
fn test_selected_player_is_not_retroactive() {
    let session = Session::new(Player::X)
        .apply(InputEvent::SurfaceMounted(SurfaceGeometry::at(LEFT, TOP)))
        .session
        .apply(InputEvent::PlayerSelected(Player::O))
        .session
        .apply(pointer_at_local(400.0, 20.0))
        .session
        .apply(InputEvent::Clicked)
        .session;
    assert_eq!(session.board().get(0, 2), Some(Cell::Marked(Player::O)));

    let session = session.apply(InputEvent::PlayerSelected(Player::X)).session;
    assert_eq!(*session.active_player(), Player::X);
    assert_eq!(session.board().get(0, 2), Some(Cell::Marked(Player::O)));
}

#[test]
fn test_overwrite_through_clicks() {
    let session = Session::new(Player::X)
        .apply(InputEvent::SurfaceMounted(SurfaceGeometry::at(LEFT, TOP)))
        .session
        .apply(pointer_at_local(10.0, 10.0))
        .session
        .apply(InputEvent::Clicked)
        .session
        .apply(InputEvent::PlayerSelected(Player::O))
        .session
        .apply(InputEvent::Clicked)
        .session;
    assert_eq!(session.board().get(0, 0), Some(Cell::Marked(Player::O)));
}

#[test]
fn test_out_of_range_clicks_do_not_paint() {
    let renderer = BoardRenderer::default();
    let mut handle = SurfaceHandle::attached(DisplayList::new());
    let (mut session, _) = step(
        Session::new(Player::X),
        InputEvent::SurfaceMounted(SurfaceGeometry::at(LEFT, TOP)),
        &mut handle,
        &renderer,
    );
    let painted = handle.get().unwrap().commands().len();

    for (x, y) in [(480.0, 100.0), (100.0, 480.0), (-1.0, -1.0), (479.5, 1e9)] {
        let (next, _) = step(session, pointer_at_local(x, y), &mut handle, &renderer);
        let (next, effect) = step(next, InputEvent::Clicked, &mut handle, &renderer);
        assert_eq!(effect, Effect::None);
        assert_eq!(next.board().marked_count(), 0);
        session = next;
    }
    assert_eq!(handle.get().unwrap().commands().len(), painted);
}

#[test]
fn test_click_before_mount_is_silent() {
    let renderer = BoardRenderer::default();
    let mut handle: SurfaceHandle<DisplayList> = SurfaceHandle::detached();
    let (session, _) = step(
        Session::new(Player::O),
        pointer_at_local(10.0, 10.0),
        &mut handle,
        &renderer,
    );
    let (session, effect) = step(session, InputEvent::Clicked, &mut handle, &renderer);
    assert_eq!(effect, Effect::None);
    assert_eq!(session.board().marked_count(), 0);
    assert!(!handle.is_attached());
}
