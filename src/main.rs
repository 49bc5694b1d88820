mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_bee::app::App;
use flappy_bee::build_info;
use flappy_bee::input::{map_key, InputResult};
use flappy_bee::logging;
use flappy_bee::persistence::{self, JsonScoreStore, ScoreStore};
use flappy_bee::settings::{parse_args, Command, Settings};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

fn print_help() {
    println!("Flappy Bee - Fly the bee between the flowers\n");
    println!("Usage: flappy-bee [options] [command]\n");
    println!("Commands:");
    println!("  reset-best     Forget the stored best score");
    println!("  --version      Show version information");
    println!("  --help         Show this help message\n");
    println!("Options:");
    println!("  --portrait     Always use the tall layout");
    println!("  --landscape    Always use the wide layout");
    println!("  --seed <n>     Fixed flower sequence");
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Version and help must work without a home directory.
    let mut settings = Settings::default();
    let command = match parse_args(&args, &mut settings) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy-bee --help' for usage.");
            std::process::exit(1);
        }
    };

    match command {
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::ResetBest => {
            let store = JsonScoreStore::open_default()?;
            let previous = store.load_best();
            store.clear()?;
            println!("Best score {} cleared.", previous);
            return Ok(());
        }
        Command::Play => {
            settings = Settings::load()?;
            // Flags override the settings file.
            if let Err(message) = parse_args(&args, &mut settings) {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
    }

    let log_path = persistence::save_path(logging::LOG_FILE)?;
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = JsonScoreStore::open_default()?;
    let (cols, rows) = terminal::size()?;
    let mut app = match App::new(settings, store, cols, rows) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Invalid engine configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    let snapshot = app.snapshot();
    println!("Best score: {}", snapshot.best_score);
    Ok(())
}

fn run<S: ScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> io::Result<()> {
    let poll_interval = Duration::from_millis(app.step_ms());
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &*app))?;

        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_action(map_key(key)) == InputResult::Quit {
                        tracing::info!("player quit");
                        return Ok(());
                    }
                }
                Event::Resize(cols, rows) => {
                    if let Err(e) = app.resize(cols, rows) {
                        tracing::warn!(error = %e, "keeping previous layout");
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;
        app.advance(dt_ms);
    }
}
