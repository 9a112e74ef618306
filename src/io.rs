use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::Coord;
use crate::events::AppEvent;
use crate::events::CameraEvent;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::world::World;

/// How far a single key press moves the view, in cells
const PAN_STEP: Coord = 8;

/// Converts a crossterm event into an application event
///
/// ```notrust
/// q, ctrl-c  exit
/// space      pause / resume
/// n          single step
/// r          reseed with the starting pattern
/// c          clear the world
/// h j k l    move the view (arrow keys work too)
/// 0          recenter the view
/// ```
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    let event = match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => return None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Event::AppEvent(AppEvent::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Event::AppEvent(AppEvent::TogglePause),
            KeyEvent {
                code: KeyCode::Char('n'),
                ..
            } => Event::EngineEvent(EngineEvent::Step),
            KeyEvent {
                code: KeyCode::Char('r'),
                ..
            } => Event::EngineEvent(EngineEvent::Reseed),
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => Event::EngineEvent(EngineEvent::Clear),
            KeyEvent {
                code: KeyCode::Char('h') | KeyCode::Left,
                ..
            } => pan(-PAN_STEP, 0),
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => pan(0, PAN_STEP),
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => pan(0, -PAN_STEP),
            KeyEvent {
                code: KeyCode::Char('l') | KeyCode::Right,
                ..
            } => pan(PAN_STEP, 0),
            KeyEvent {
                code: KeyCode::Char('0'),
                ..
            } => Event::AppEvent(AppEvent::CameraEvent(CameraEvent::ResetView)),
            _ => return None,
        },
        CrossTermEvent::Resize(cols, rows) => {
            Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Resize { cols, rows }))
        }
        _ => return None,
    };

    Some(event)
}

fn pan(dx: Coord, dy: Coord) -> Event {
    Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Move { dx, dy }))
}

/// The counters line shown under the grid.
pub fn status_line(world: &World, paused: bool) -> String {
    let mut line = format!(
        "Iterations: {}  Population: {}  Time: {:.2}s",
        world.iteration(),
        world.population(),
        world.elapsed().as_secs_f64()
    );

    if paused {
        line.push_str("  [paused]");
    }

    line
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use super::status_line;
    use crate::cell::Cell;
    use crate::events::AppEvent;
    use crate::events::CameraEvent;
    use crate::events::EngineEvent;
    use crate::events::Event;
    use crate::world::World;

    fn key(c: char) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn quit_keys() {
        assert!(matches!(
            convert_event(key('q')),
            Some(Event::AppEvent(AppEvent::Exit))
        ));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            convert_event(CrossTermEvent::Key(ctrl_c)),
            Some(Event::AppEvent(AppEvent::Exit))
        ));
    }

    #[test]
    fn plain_c_clears() {
        assert!(matches!(
            convert_event(key('c')),
            Some(Event::EngineEvent(EngineEvent::Clear))
        ));
        assert!(matches!(
            convert_event(key('r')),
            Some(Event::EngineEvent(EngineEvent::Reseed))
        ));
    }

    #[test]
    fn movement() {
        assert!(matches!(
            convert_event(key('h')),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Move { dx, dy: 0 }))) if dx < 0
        ));
        assert!(matches!(
            convert_event(CrossTermEvent::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Move { dx: 0, dy }))) if dy > 0
        ));
    }

    #[test]
    fn releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert!(convert_event(CrossTermEvent::Key(release)).is_none());
        assert!(convert_event(key('x')).is_none());
    }

    #[test]
    fn resize_is_forwarded() {
        assert!(matches!(
            convert_event(CrossTermEvent::Resize(80, 24)),
            Some(Event::AppEvent(AppEvent::CameraEvent(CameraEvent::Resize { cols: 80, rows: 24 })))
        ));
    }

    #[test]
    fn status_line_counters() {
        let mut world = World::new();
        world.seed([Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        world.advance_n(3, Duration::from_millis(50));

        assert_eq!(
            status_line(&world, false),
            "Iterations: 3  Population: 3  Time: 0.15s"
        );
        assert!(status_line(&world, true).ends_with("[paused]"));
    }
}
