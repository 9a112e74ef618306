use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sparselife::camera::Camera;
use sparselife::config;
use sparselife::config::Command;
use sparselife::config::Config;
use sparselife::events::AppEvent;
use sparselife::events::CameraEvent;
use sparselife::events::EngineEvent;
use sparselife::events::Event;
use sparselife::io::convert_event;
use sparselife::io::status_line;
use sparselife::pattern::Pattern;
use sparselife::scheduler::Scheduler;
use sparselife::world::World;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE as u64);

/// Terminal rows kept free under the grid for the counters
const STATUS_ROWS: u16 = 1;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never end up inside the frame on stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sparselife=info".parse()?))
        .init();

    let config = match config::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print!("{}", config::USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };

    let pattern = config
        .load_pattern()
        .context("Failed to load the starting pattern")?;
    let rule = config.rule_for(&pattern);

    let mut world = World::with_rules(rule)?;
    world.seed_pattern(&pattern);

    info!(
        pattern = pattern.name.as_deref().unwrap_or("unnamed"),
        %rule,
        population = world.population(),
        interval_ms = config.interval.as_millis() as u64,
        "starting simulation"
    );

    if config.headless {
        run_headless(&mut world, &config)
    } else {
        run_terminal(&mut world, &pattern, &config)
    }
}

/// Compute the generations back to back and print the final state.
fn run_headless(world: &mut World, config: &Config) -> anyhow::Result<()> {
    let generations = config.generations.unwrap_or_default();
    let start = Instant::now();

    world.advance_n(generations, config.interval);

    info!(
        generations,
        took_ms = start.elapsed().as_millis() as u64,
        "headless run finished"
    );

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", world.cells())?;
    writeln!(stdout, "{}", status_line(world, false))?;

    Ok(())
}

fn run_terminal(world: &mut World, pattern: &Pattern, config: &Config) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = event_loop(&mut stdout, world, pattern, config);

    // Restore the terminal even when the loop failed
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn event_loop(
    stdout: &mut io::Stdout,
    world: &mut World,
    pattern: &Pattern,
    config: &Config,
) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut cam = Camera::for_terminal(cols, rows, STATUS_ROWS);
    let mut scheduler = Scheduler::new(config.interval);
    scheduler.restart(Instant::now());

    loop {
        // Poll input for as long as we can before the next generation is due
        let wait = scheduler.time_until_due(Instant::now()).min(FRAMETIME);
        let event = if event::poll(wait)? {
            convert_event(event::read()?)
        } else {
            None
        };

        match event {
            None => {}
            Some(Event::AppEvent(AppEvent::Exit)) => break,
            Some(Event::AppEvent(AppEvent::TogglePause)) => {
                scheduler.toggle_pause();
                debug!(paused = scheduler.is_paused(), "toggled pause");
            }
            Some(Event::AppEvent(AppEvent::CameraEvent(event))) => match event {
                CameraEvent::Move { dx, dy } => cam.pan(dx, dy),
                CameraEvent::ResetView => cam.reset_view(),
                CameraEvent::Resize { cols, rows } => {
                    let resized = Camera::for_terminal(cols, rows, STATUS_ROWS);
                    cam.resize(resized.width(), resized.height());
                    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                }
            },
            Some(Event::EngineEvent(EngineEvent::Step)) => {
                world.advance(scheduler.interval());
            }
            Some(Event::EngineEvent(EngineEvent::Reseed)) => {
                world.seed_pattern(pattern);
                scheduler.restart(Instant::now());
            }
            Some(Event::EngineEvent(EngineEvent::Clear)) => {
                world.reset();
                scheduler.restart(Instant::now());
            }
        }

        let now = Instant::now();
        if scheduler.is_due(now) {
            world.advance(scheduler.interval());
            scheduler.mark(now);
        }

        draw(stdout, &mut cam, world, scheduler.is_paused())?;

        if config.generations.is_some_and(|n| world.iteration() >= n) {
            break;
        }
    }

    Ok(())
}

fn draw(stdout: &mut io::Stdout, cam: &mut Camera, world: &World, paused: bool) -> io::Result<()> {
    cam.clear();
    cam.draw(world.cells());

    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in cam.render().lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(status_line(world, paused))
    )?;

    stdout.flush()
}
