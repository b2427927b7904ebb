use std::fmt;
use std::io::{self, Write};

use geotutor_core::Clock;
use geotutor_core::model::{ModuleId, Tier};
use geotutor_core::score::ScoreBoard;
use services::catalog;
use services::{SessionError, SessionRunner, SubmitOutcome};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidModule { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidModule { raw } => write!(f, "invalid --module value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play [--module <key>] [--no-shuffle]");
    eprintln!("  cargo run -p app -- list");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  home menu over all modules, shuffled question order");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GEOTUTOR_MODULE");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

struct Args {
    module: Option<ModuleId>,
    shuffle: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut module = std::env::var("GEOTUTOR_MODULE")
            .ok()
            .and_then(|value| value.parse().ok());
        let mut shuffle = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--module" => {
                    let value = require_value(args, "--module")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidModule { raw: value.clone() })?;
                    module = Some(parsed);
                }
                "--no-shuffle" => shuffle = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { module, shuffle })
    }
}

/// How an interactive loop handed control back.
enum Flow {
    BackToMenu,
    EndSession,
}

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim_end_matches(['\n', '\r']).to_string()))
}

fn print_home(board: &ScoreBoard) {
    println!();
    println!(
        "Total score: {}   Overall progress: {}%",
        board.total_score(),
        board.global_percent()
    );
    for (index, module) in ModuleId::ALL.iter().enumerate() {
        let progress = board.module_progress(*module);
        let marker = if board.is_module_completed(*module) {
            "  done"
        } else {
            ""
        };
        println!(
            "  {}) {:<28} {:>2}/{} answered, {} points{marker}",
            index + 1,
            module.title(),
            progress.answered,
            progress.total,
            board.module_score(*module)
        );
    }
}

fn resolve_module(choice: &str) -> Option<ModuleId> {
    if let Ok(index) = choice.parse::<usize>() {
        if (1..=ModuleId::ALL.len()).contains(&index) {
            return Some(ModuleId::ALL[index - 1]);
        }
        return None;
    }
    choice.parse().ok()
}

fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Correct {
            points,
            attempt_number,
            feedback,
        } => println!("{feedback} +{points} points (attempt {attempt_number})."),
        SubmitOutcome::TryAgain { attempts_left } => {
            println!("Incorrect, try again. Attempts left: {attempts_left}.");
        }
        SubmitOutcome::Exhausted { correct_answer } => {
            println!("Out of attempts. The correct answer was {correct_answer}.");
        }
    }
}

fn run_bank_module(
    runner: &SessionRunner,
    board: &mut ScoreBoard,
    module: ModuleId,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let mut session = match runner.start_module(board, module) {
        Ok(session) => session,
        Err(SessionError::Empty) => {
            println!("{} is already complete.", module.title());
            return Ok(Flow::BackToMenu);
        }
        Err(err) => return Err(err.into()),
    };

    println!();
    println!("── {} ──", module.title());
    loop {
        let Some(prompt) = session.current_question().map(|q| q.prompt().to_string()) else {
            break;
        };
        let progress = session.progress();
        println!();
        println!("[{}/{}] {prompt}", progress.answered + 1, progress.total);

        let Some(answer) = read_line("Your answer ('menu' to pause, 'quit' to end): ")? else {
            return Ok(Flow::EndSession);
        };
        match answer.trim() {
            "menu" => return Ok(Flow::BackToMenu),
            "quit" => return Ok(Flow::EndSession),
            _ => {}
        }

        match session.submit(board, &answer) {
            Ok(outcome) => print_outcome(&outcome),
            Err(SessionError::Malformed(err)) => println!("{err}. No attempt used."),
            Err(err) => return Err(err.into()),
        }
    }

    println!();
    println!(
        "{} complete! You earned {} points this sitting.",
        module.title(),
        session.points_earned()
    );
    Ok(Flow::BackToMenu)
}

fn run_angles(
    runner: &SessionRunner,
    board: &mut ScoreBoard,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let mut session = match runner.start_angles(board) {
        Ok(session) => session,
        Err(SessionError::Empty) => {
            println!("{} is already complete.", ModuleId::AngleType.title());
            return Ok(Flow::BackToMenu);
        }
        Err(err) => return Err(err.into()),
    };

    println!();
    println!("── {} ──", ModuleId::AngleType.title());
    while !session.is_complete() {
        println!();
        println!(
            "Types still to identify: {}.",
            session.remaining_types(board).join(", ")
        );

        let Some(raw) = read_line("Enter an angle in degrees (0-360, step 10), 'menu' or 'quit': ")?
        else {
            return Ok(Flow::EndSession);
        };
        match raw.trim() {
            "menu" => return Ok(Flow::BackToMenu),
            "quit" => return Ok(Flow::EndSession),
            _ => {}
        }
        let Ok(degrees) = raw.trim().parse::<i32>() else {
            println!("Enter a whole number of degrees.");
            continue;
        };

        let prompt = match session.pose(board, degrees) {
            Ok(question) => question.prompt().to_string(),
            Err(SessionError::Angle(err)) => {
                println!("{err}.");
                continue;
            }
            Err(SessionError::AlreadyIdentified(name)) => {
                println!("The {name} type is already identified; pick a different angle.");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        println!("{prompt}");
        loop {
            let Some(answer) = read_line("Your answer (acute/right/obtuse/reflex): ")? else {
                return Ok(Flow::EndSession);
            };
            match answer.trim() {
                "menu" => return Ok(Flow::BackToMenu),
                "quit" => return Ok(Flow::EndSession),
                _ => {}
            }
            match session.submit(board, &answer) {
                Ok(outcome) => {
                    print_outcome(&outcome);
                    if !matches!(outcome, SubmitOutcome::TryAgain { .. }) {
                        break;
                    }
                }
                Err(SessionError::Malformed(err)) => println!("{err}. No attempt used."),
                Err(err) => return Err(err.into()),
            }
        }
    }

    println!();
    println!(
        "{} complete! You earned {} points this sitting.",
        ModuleId::AngleType.title(),
        session.points_earned()
    );
    Ok(Flow::BackToMenu)
}

fn run_module(
    runner: &SessionRunner,
    board: &mut ScoreBoard,
    module: ModuleId,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match module {
        ModuleId::AngleType => run_angles(runner, board),
        _ => run_bank_module(runner, board, module),
    }
}

fn play(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let runner = SessionRunner::new(Clock::default_clock()).with_shuffle(args.shuffle);
    let mut board = runner.standard_board();

    println!("Welcome to GeoTutor!");
    println!("Score points by answering each module's questions within three attempts.");

    let mut ended = false;
    if let Some(module) = args.module {
        ended = matches!(run_module(&runner, &mut board, module)?, Flow::EndSession);
    }

    while !ended {
        print_home(&board);
        let Some(choice) = read_line("Choose a module (number or name), or 'q' to end: ")? else {
            break;
        };
        let choice = choice.trim().to_string();
        match choice.as_str() {
            "" => continue,
            "q" | "quit" | "end" => break,
            _ => {}
        }
        let Some(module) = resolve_module(&choice) else {
            println!("No module matches {choice:?}. Pick a number from the menu or a key like shapes-2d.");
            continue;
        };
        ended = matches!(run_module(&runner, &mut board, module)?, Flow::EndSession);
    }

    println!();
    println!(
        "You have achieved {} points in this session. Goodbye!",
        board.total_score()
    );
    Ok(())
}

fn list_modules() {
    println!("Modules:");
    for module in ModuleId::ALL {
        let tier = match module.tier() {
            Tier::Basic => "basic",
            Tier::Advanced => "advanced",
        };
        println!(
            "  {:<10} {:<28} {:>8}  {} questions",
            module.key(),
            module.title(),
            tier,
            catalog::question_total(module)
        );
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::List => {
            list_modules();
            Ok(())
        }
        Command::Play => play(args),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
