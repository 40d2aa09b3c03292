//! Application state and logic.

use crate::config::{AppConfig, TerminalScale};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tictac_canvas::{
    BoardRenderer, Effect, InputEvent, PixelCanvas, Player, SURFACE_HEIGHT, SURFACE_WIDTH, Session,
    SurfaceHandle,
};
use tracing::{debug, info, instrument, trace};

/// Main application state.
pub struct App {
    session: Session,
    surface: SurfaceHandle<PixelCanvas>,
    renderer: BoardRenderer,
    scale: TerminalScale,
    board_area: Option<Rect>,
    should_quit: bool,
}

impl App {
    /// Creates a new application. The surface stays detached until
    /// [`App::mount`] is called.
    #[instrument(skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: Session::new(*config.initial_player()),
            surface: SurfaceHandle::detached(),
            renderer: BoardRenderer::new(*config.theme()),
            scale: *config.terminal(),
            board_area: None,
            should_quit: false,
        }
    }

    /// Gets the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the surface handle.
    pub fn surface(&self) -> &SurfaceHandle<PixelCanvas> {
        &self.surface
    }

    /// Gets the renderer.
    pub fn renderer(&self) -> &BoardRenderer {
        &self.renderer
    }

    /// Gets the terminal scale.
    pub fn scale(&self) -> TerminalScale {
        self.scale
    }

    /// Terminal area holding the board, once mounted.
    pub fn board_area(&self) -> Option<Rect> {
        self.board_area
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Mounts the board surface at `area`, measuring its geometry.
    ///
    /// Only the first call has any effect.
    #[instrument(skip(self))]
    pub fn mount(&mut self, area: Rect) {
        if self.board_area.is_some() {
            return;
        }
        info!("Mounting board surface");
        self.board_area = Some(area);
        self.surface
            .attach(PixelCanvas::new(SURFACE_WIDTH, SURFACE_HEIGHT));
        let geometry = self.scale.surface_at(area.x, area.y);
        self.dispatch(InputEvent::SurfaceMounted(geometry));
    }

    /// Feeds one session event through the board pipeline.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: InputEvent) {
        let session = std::mem::take(&mut self.session);
        let transition = session.apply(event);
        self.session = transition.session;

        if transition.effect == Effect::Redraw {
            let painted = self.renderer.draw(&mut self.surface, self.session.board());
            debug!(painted, board = %self.session.board(), "Repainted board");
        }
    }

    /// Handles a terminal event.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            other => trace!(?other, "Ignoring terminal event"),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('x') | KeyCode::Char('X') => self.select(Player::X),
            KeyCode::Char('o') | KeyCode::Char('O') => self.select(Player::O),
            KeyCode::Tab => self.select(self.session.active_player().other()),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let pointer = self.scale.to_screen(mouse.column, mouse.row);
                self.dispatch(InputEvent::PointerMoved(pointer));
            }
            // The press position is ignored; the last move is authoritative.
            MouseEventKind::Down(MouseButton::Left) => self.dispatch(InputEvent::Clicked),
            _ => {}
        }
    }

    fn select(&mut self, player: Player) {
        self.dispatch(InputEvent::PlayerSelected(player));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tictac_canvas::Cell;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mounted() -> App {
        let mut app = App::new(&AppConfig::default());
        app.mount(Rect::new(2, 2, 48, 24));
        app
    }

    #[test]
    fn test_mount_attaches_and_paints() {
        let app = mounted();
        assert!(app.surface().is_attached());
        let canvas = app.surface().get().unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(tictac_canvas::Rgb::WHITE));
        assert_eq!(canvas.pixel(158, 0), Some(tictac_canvas::Rgb::BLACK));
    }

    #[test]
    fn test_click_marks_hovered_cell() {
        let mut app = mounted();
        // Column 2 + 30 is local x 305: middle column; row 2 + 20 is local y 410: bottom row
        app.handle_event(mouse(MouseEventKind::Moved, 32, 22));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(app.session().board().get(2, 1), Some(Cell::Marked(Player::X)));
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = mounted();
        app.handle_event(mouse(MouseEventKind::Moved, 50, 10));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 50, 10));
        assert_eq!(app.session().board().marked_count(), 0);
    }

    #[test]
    fn test_click_before_mount_is_ignored() {
        let mut app = App::new(&AppConfig::default());
        app.handle_event(mouse(MouseEventKind::Moved, 5, 5));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        assert_eq!(app.session().board().marked_count(), 0);
        assert!(!app.surface().is_attached());
    }

    #[test]
    fn test_keys_select_team() {
        let mut app = mounted();
        app.handle_event(key('o'));
        assert_eq!(*app.session().active_player(), Player::O);
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert_eq!(*app.session().active_player(), Player::X);
        app.handle_event(key('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_second_mount_keeps_first_area() {
        let mut app = mounted();
        app.mount(Rect::new(10, 10, 48, 24));
        assert_eq!(app.board_area(), Some(Rect::new(2, 2, 48, 24)));
    }
}
