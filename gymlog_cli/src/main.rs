use chrono::Local;
use clap::{Parser, Subcommand};
use gymlog_core::*;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(about = "Workout logging with free-text set parsing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override parser backend URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive logging session (default)
    Log {
        /// Body part to train (skips the picker)
        #[arg(long)]
        part: Option<String>,
    },

    /// List saved workouts, newest first
    History,

    /// Show the sets of one saved workout
    Show { id: String },

    /// Delete one saved workout
    Delete { id: String },

    /// Delete the entire workout history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    gymlog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let api_url = cli
        .api_url
        .unwrap_or_else(|| config.api.base_url.clone());

    let mut store = WorkoutStore::new(FileKvStore::new(&data_dir));

    match cli.command {
        Some(Commands::Log { part }) => cmd_log(&mut store, &api_url, &config, part),
        Some(Commands::History) => cmd_history(&store),
        Some(Commands::Show { id }) => cmd_show(&store, &id),
        Some(Commands::Delete { id }) => cmd_delete(&mut store, &id),
        Some(Commands::Clear { yes }) => cmd_clear(&mut store, yes),
        None => cmd_log(&mut store, &api_url, &config, None),
    }
}

fn cmd_log(
    store: &mut WorkoutStore<FileKvStore>,
    api_url: &str,
    config: &Config,
    part: Option<String>,
) -> Result<()> {
    let client = ParserClient::new(api_url);
    let mut controller = SessionController::new();

    if let Some(part) = part {
        start_workout(&mut controller, vec![part]);
    } else {
        println!("Type /start to begin a workout. /help lists commands.");
    }

    // Input arrives over a channel so the rollover check can run on a
    // recurring timer even while waiting for the next line.
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let poll = Duration::from_secs(config.session.rollover_poll_seconds.max(1));
    loop {
        let line = match rx.recv_timeout(poll) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                run_rollover_check(&mut controller);
                continue;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        run_rollover_check(&mut controller);

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_whitespace().next().unwrap_or_default() {
            "/start" => {
                let rest = input.trim_start_matches("/start").trim();
                let parts = if rest.is_empty() {
                    pick_body_parts(&config.session.body_parts, &rx)
                } else {
                    split_parts(rest)
                };
                start_workout(&mut controller, parts);
            }
            "/add" => {
                let rest = input.trim_start_matches("/add").trim();
                add_set(&mut controller, rest);
            }
            "/rows" => match controller.active() {
                Some(session) => print_rows(&session.rows),
                None => println!("No active workout. Start a workout first."),
            },
            "/clear" => {
                if controller.active().is_some() {
                    controller.clear_rows();
                    println!("Rows cleared.");
                } else {
                    println!("No active workout. Start a workout first.");
                }
            }
            "/end" => end_workout(&mut controller, store),
            "/quit" | "/q" => {
                if let Some(session) = controller.active() {
                    if !session.rows.is_empty() {
                        println!("Leaving without /end - this workout was not saved.");
                    }
                }
                break;
            }
            "/help" => print_help(),
            cmd if cmd.starts_with('/') => {
                println!("Unknown command {cmd}. /help lists commands.");
            }
            _ => send_message(&mut controller, &client, input),
        }
    }

    Ok(())
}

fn run_rollover_check(controller: &mut SessionController) {
    if controller.check_day_rollover(Local::now().date_naive()) {
        println!("New day - the previous unsaved workout was discarded.");
    }
}

fn start_workout(controller: &mut SessionController, parts: Vec<String>) {
    match controller.start_workout(parts, Local::now()) {
        Ok(session) => {
            println!(
                "Started {} workout for {}. Log sets as free text or with /add.",
                join_part_label(&session.parts),
                session.date.format("%m/%d")
            );
        }
        Err(e) => report(e),
    }
}

/// Interactive body-part picker, mirroring the start-of-workout modal.
/// Accepts names or 1-based indices, comma separated; an empty line means
/// no selection (the session gets the generic label).
fn pick_body_parts(choices: &[String], rx: &mpsc::Receiver<String>) -> Vec<String> {
    println!("What body part are you training?");
    for (i, part) in choices.iter().enumerate() {
        println!("  {}. {}", i + 1, part);
    }
    println!("Pick one or more (name or number, comma separated):");

    let Ok(answer) = rx.recv() else {
        return Vec::new();
    };

    split_parts(&answer)
        .into_iter()
        .map(|entry| {
            match entry.parse::<usize>() {
                Ok(n) if n >= 1 && n <= choices.len() => choices[n - 1].clone(),
                _ => entry,
            }
        })
        .collect()
}

fn split_parts(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Manual entry: `/add exercise | weight | reps | notes` (weight, reps and
/// notes optional). The set number is assigned automatically.
fn add_set(controller: &mut SessionController, entry: &str) {
    let mut fields = entry.split('|').map(str::trim);
    let exercise = fields.next().unwrap_or_default();
    let weight = fields.next().unwrap_or_default();
    let reps = fields.next().unwrap_or_default();
    let notes = fields.next().unwrap_or_default();

    match controller.add_set(exercise, weight, reps, notes) {
        Ok(row) => println!("Logged {} set {}.", row.exercise, row.set),
        Err(e) => report(e),
    }
}

fn send_message(controller: &mut SessionController, client: &ParserClient, message: &str) {
    let Some(session) = controller.active() else {
        println!("Start a workout before logging sets.");
        return;
    };

    let rows = match client.parse(message, &session.rows) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::debug!("Parser call failed: {}", e);
            println!("Failed to reach API. Your message was not logged - try again.");
            return;
        }
    };

    if rows.is_empty() {
        println!("No rows returned. Try rephrasing the message.");
        return;
    }

    match controller.append_rows(rows) {
        Ok(added) => {
            println!("Added {added} row(s).");
            if let Some(session) = controller.active() {
                print_rows(&session.rows);
            }
        }
        Err(e) => report(e),
    }
}

fn end_workout(controller: &mut SessionController, store: &mut WorkoutStore<FileKvStore>) {
    match controller.end_workout(store) {
        Ok(session) => {
            println!(
                "Saved. {} \"{}\" workout with {} row(s) added to history.",
                session.date.format("%m/%d"),
                session.part,
                session.rows.len()
            );
        }
        Err(e) => report(e),
    }
}

fn cmd_history(store: &WorkoutStore<FileKvStore>) -> Result<()> {
    let sessions = store.list()?;
    if sessions.is_empty() {
        println!("No saved workouts yet.");
        return Ok(());
    }

    for session in sessions {
        println!(
            "{} - \"{}\"  {} row(s)  [{}]",
            session.date.format("%m/%d"),
            session.part,
            session.rows.len(),
            session.id
        );
    }
    Ok(())
}

fn cmd_show(store: &WorkoutStore<FileKvStore>, id: &str) -> Result<()> {
    match store.find(id)? {
        Some(session) => {
            println!("{} / {}", session.date, session.part);
            print_rows(&session.rows);
            Ok(())
        }
        None => {
            println!("Workout not found.");
            Ok(())
        }
    }
}

fn cmd_delete(store: &mut WorkoutStore<FileKvStore>, id: &str) -> Result<()> {
    store.delete(id)?;
    println!("Deleted {id} (if it existed).");
    Ok(())
}

fn cmd_clear(store: &mut WorkoutStore<FileKvStore>, yes: bool) -> Result<()> {
    if !yes {
        println!("This deletes the entire workout history. Re-run with --yes to confirm.");
        return Ok(());
    }
    store.clear()?;
    println!("History cleared.");
    Ok(())
}

fn print_rows(rows: &[WorkoutRow]) {
    if rows.is_empty() {
        println!("  (no sets logged yet)");
        return;
    }

    println!(
        "  {:<24} {:>3}  {:>12}  {:>8}  Notes",
        "Exercise", "Set", "Weight (lbs)", "Reps"
    );
    for row in rows {
        println!(
            "  {:<24} {:>3}  {:>12}  {:>8}  {}",
            row.exercise,
            row.set,
            if row.weight_lbs.is_empty() { "-" } else { row.weight_lbs.as_str() },
            if row.reps.is_empty() { "-" } else { row.reps.as_str() },
            row.notes
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /start [part, ...]   begin a workout");
    println!("  /add ex | wt | reps | notes   log one set manually");
    println!("  /rows                show the current table");
    println!("  /clear               clear the current table");
    println!("  /end                 save the workout to history");
    println!("  /quit                leave without saving");
    println!("Anything else is sent to the parser backend as free text.");
}

/// Surface a rejected action or a failure as a user-facing message.
/// Nothing here is fatal; the session loop keeps running.
fn report(e: Error) {
    if e.is_rejection() {
        println!("{e}");
    } else {
        println!("Error: {e}");
    }
}
