use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use edgecue::{
    asset::IconImage,
    config::{Config, ConfigStore, FileConfigStore},
    error::SessionError,
    logger::{session_id, TrialLogger},
    placer::RandomPlacer,
    runtime::{CrosstermEventSource, Runner},
    sequencer::{trial_count, TrialSequencer},
    session::{Outcome, Session, SessionState, COMPLETED_MESSAGE},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin, BufRead, Write},
    path::PathBuf,
};

const STEP_PROMPT: &str = "Enter to steps to run the program: ";

/// red dot on a grid, icon on one of its edges, one logged answer per frame
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shows a red dot on an 8x8 grid and a cartoon icon on one of its four edges. Each side is shown STEPS times in shuffled order; every answer (k, t, a) is appended to a timestamped csv under the results directory."
)]
pub struct Cli {
    /// times each edge is shown (asked for interactively when omitted)
    #[clap(short = 'n', long)]
    steps: Option<usize>,

    /// directory the session csv is written to
    #[clap(short = 'r', long)]
    results_dir: Option<PathBuf>,

    /// icon image shown on the active edge
    #[clap(short = 'i', long)]
    icon: Option<PathBuf>,

    /// suffix appended to the timestamp in the csv file name
    #[clap(long)]
    suffix: Option<String>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values take precedence over the stored config
    fn apply(&self, config: Config) -> Config {
        Config {
            results_dir: self.results_dir.clone().unwrap_or(config.results_dir),
            icon_path: self.icon.clone().unwrap_or(config.icon_path),
            file_suffix: self.suffix.clone().unwrap_or(config.file_suffix),
        }
    }
}

fn parse_step_count(input: &str) -> Result<usize, SessionError> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .filter(|n| trial_count(*n).is_some())
        .ok_or_else(|| SessionError::InvalidStepCount(trimmed.to_string()))
}

fn prompt_step_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize, SessionError> {
    write!(output, "{STEP_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_step_count(&line)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    let steps = match cli.steps {
        Some(n) => n,
        None => prompt_step_count(&mut stdin().lock(), &mut io::stdout())?,
    };

    let mut rng = rand::thread_rng();
    let sequencer = TrialSequencer::build(steps, &mut rng)?;

    let icon = IconImage::load(&config.icon_path)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let logger = TrialLogger::open(
        &config.results_dir,
        &session_id(Local::now(), &config.file_suffix),
    )?;
    let mut session = Session::new(sequencer, RandomPlacer::new(rng), logger);

    if session.state() == SessionState::Complete {
        println!("{COMPLETED_MESSAGE}");
        return Ok(());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = runner.run(&mut terminal, &mut session, &icon);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    match result? {
        Outcome::Completed => println!("{COMPLETED_MESSAGE}"),
        _ => println!(
            "Recorded {} of {} frames in {}",
            session.recorded(),
            session.total(),
            session.log_path().display()
        ),
    }

    Ok(())
}
