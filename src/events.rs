use crate::Coord;

pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

pub enum EngineEvent {
    /// Compute one generation right away, paused or not
    Step,

    /// Seed the world with the starting pattern again
    Reseed,

    /// Kill every cell and zero the counters
    Clear,
}

pub enum AppEvent {
    CameraEvent(CameraEvent),

    /// Stop or resume the generation clock
    TogglePause,

    /// Exit the application
    Exit,
}

pub enum CameraEvent {
    /// Move the view by the given number of cells
    Move { dx: Coord, dy: Coord },

    /// Put the origin back in the middle of the view
    ResetView,

    /// The terminal changed size
    Resize { cols: u16, rows: u16 },
}
