//! The interactive game loop.
//!
//! All rendering and raw line reading happens here; rules, parsing, and
//! state live in `cog-fiction`. Recoverable errors print in yellow and play
//! continues; the fatal content tier aborts the run.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use cog_fiction::{
    DialogView, ExploreCommand, FictionError, GameSession, LocationView, MenuPick, ReplyCommand,
    Turn, UnlockOutcome,
};

pub fn run(world_file: Option<&Path>) -> Result<(), String> {
    let world = super::load_world(world_file)?;
    let mut session = GameSession::new(world);
    let mut console = Console::new();

    println!("  {} Cogtown", "Welcome to".bold());
    println!("  The trams are down and the robots are glitching. See what you can do.");

    loop {
        let view = session.look().map_err(|e| e.to_string())?;
        render_location(&view);

        let Some(raw) = console.read(&options_line(&view))? else {
            break;
        };

        match ExploreCommand::parse(&raw) {
            Some(ExploreCommand::Move) => handle_move(&mut session, &mut console, &view)?,
            Some(ExploreCommand::Talk) => handle_talk(&mut session, &mut console, &view)?,
            Some(ExploreCommand::Unlock) => handle_unlock(&mut session, &mut console, &view)?,
            Some(ExploreCommand::Ride) => handle_ride(&mut session, &mut console)?,
            Some(ExploreCommand::Quit) => break,
            None => println!("{}", "Invalid choice. Try again.".yellow()),
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Locked stdin plus a reusable line buffer.
struct Console {
    reader: io::StdinLock<'static>,
    line: String,
}

impl Console {
    fn new() -> Self {
        Self {
            reader: io::stdin().lock(),
            line: String::new(),
        }
    }

    /// Print a prompt and read one raw line. `None` means EOF.
    fn read(&mut self, prompt: &str) -> Result<Option<String>, String> {
        print!("{prompt}");
        io::stdout().flush().map_err(|e| e.to_string())?;

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(self.line.clone())),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Print a recoverable error and carry on; propagate the fatal tier.
fn relay(e: FictionError) -> Result<(), String> {
    if e.is_fatal() {
        return Err(e.to_string());
    }
    println!("{}", e.to_string().yellow());
    Ok(())
}

fn render_location(view: &LocationView) {
    println!();
    println!("  {} {} / {}", "Location:".bold(), view.city, view.district);
    println!("  You are at: {}", view.name.bold());
    println!("  {}", view.description);

    if view.connections.is_empty() {
        println!("  No exits here.");
    } else {
        println!("  Connections:");
        for connection in &view.connections {
            println!("    - {}: {}", connection.label, connection.destination);
        }
    }

    if view.occupants.is_empty() {
        println!("  No robots in this area.");
    } else {
        println!("  Robots present:");
        for (i, name) in view.occupants.iter().enumerate() {
            println!("    {}. {}", i + 1, name);
        }
    }

    if let Some(station) = &view.station {
        let status = if station.unlocked {
            "OPERATIONAL".green()
        } else {
            "locked".yellow()
        };
        println!("  Station status: {status}");
    }
}

fn options_line(view: &LocationView) -> String {
    let mut options = String::from("(M)ove  (T)alk");
    if let Some(station) = &view.station {
        if station.unlocked {
            options.push_str("  (R)ide");
        } else {
            options.push_str("  (U)nlock");
        }
    }
    options.push_str("  (Q)uit");
    format!("\n{} {options}\n> ", "Options:".bold())
}

fn handle_move(
    session: &mut GameSession,
    console: &mut Console,
    view: &LocationView,
) -> Result<(), String> {
    if view.connections.is_empty() {
        println!("No available moves from here.");
        return Ok(());
    }

    let Some(raw) = console.read("Enter a direction/name to move:\n> ")? else {
        return Ok(());
    };
    if let Err(e) = session.move_to(&raw) {
        relay(e)?;
    }
    Ok(())
}

fn handle_talk(
    session: &mut GameSession,
    console: &mut Console,
    view: &LocationView,
) -> Result<(), String> {
    if view.occupants.is_empty() {
        println!("No one to talk to here.");
        return Ok(());
    }

    println!("Choose a robot number to converse (or blank to cancel):");
    for (i, name) in view.occupants.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    let Some(raw) = console.read("> ")? else {
        return Ok(());
    };

    match MenuPick::parse(&raw) {
        Some(MenuPick::Cancel) => Ok(()),
        Some(MenuPick::Index(i)) => match session.talk(i) {
            Ok(dialog) => conversation_loop(session, console, dialog),
            Err(e) => relay(e),
        },
        None => {
            println!("{}", "Invalid robot selection.".yellow());
            Ok(())
        }
    }
}

fn conversation_loop(
    session: &mut GameSession,
    console: &mut Console,
    mut dialog: DialogView,
) -> Result<(), String> {
    loop {
        render_dialog(&dialog);

        let Some(raw) = console.read("> ")? else {
            session.leave_conversation().map_err(|e| e.to_string())?;
            return Ok(());
        };

        match ReplyCommand::parse(&raw) {
            Some(ReplyCommand::Exit) => {
                let speaker = session.leave_conversation().map_err(|e| e.to_string())?;
                println!("You step away from {speaker}.");
                return Ok(());
            }
            Some(ReplyCommand::Choice(i)) => match session.reply(i) {
                Ok(Turn::Continued { learned, view }) => {
                    report_learned(&learned);
                    dialog = view;
                }
                Ok(Turn::Ended { learned, speaker }) => {
                    report_learned(&learned);
                    println!("The conversation with {speaker} winds down.");
                    return Ok(());
                }
                Err(e) if e.is_fatal() => return Err(e.to_string()),
                Err(_) => println!(
                    "{}",
                    "Invalid selection. Choose a listed number or X to exit.".yellow()
                ),
            },
            None => println!(
                "{}",
                "Invalid selection. Choose a listed number or X to exit.".yellow()
            ),
        }
    }
}

fn render_dialog(view: &DialogView) {
    println!();
    println!("  [{}] {}", view.speaker.bold(), view.text);
    for (i, choice) in view.choices.iter().enumerate() {
        println!("    {}. {}", i + 1, choice);
    }
    println!("    X. Exit conversation");
}

fn report_learned(learned: &[String]) {
    for code in learned {
        println!("  {} {}", "You memorize the code:".green(), code.bold());
    }
}

fn handle_unlock(
    session: &mut GameSession,
    console: &mut Console,
    view: &LocationView,
) -> Result<(), String> {
    let Some(station) = &view.station else {
        println!("{}", "You are not at a station panel.".yellow());
        return Ok(());
    };
    if station.unlocked {
        println!("The station is already operational.");
        return Ok(());
    }

    let Some(raw) = console.read("Enter override code (or blank to cancel): ")? else {
        return Ok(());
    };

    match session.attempt_unlock(&raw) {
        Ok(UnlockOutcome::Unlocked) => {
            println!("{}", "The panel chimes. The local line hums back to life.".green());
        }
        Ok(UnlockOutcome::Incorrect) => {
            println!("{}", "Incorrect code. The panel resets.".yellow());
        }
        Ok(UnlockOutcome::AlreadyUnlocked) => {
            println!("The station is already operational.");
        }
        Ok(UnlockOutcome::Cancelled) => {}
        Err(e) => relay(e)?,
    }
    Ok(())
}

fn handle_ride(session: &mut GameSession, console: &mut Console) -> Result<(), String> {
    let destinations = match session.destinations() {
        Ok(destinations) => destinations,
        Err(e) => return relay(e),
    };
    if destinations.is_empty() {
        println!("No other stations on this line yet.");
        return Ok(());
    }

    println!("Choose a destination (blank to cancel):");
    for (i, destination) in destinations.iter().enumerate() {
        println!("  {}. {}", i + 1, destination.name);
    }
    let Some(raw) = console.read("> ")? else {
        return Ok(());
    };

    match MenuPick::parse(&raw) {
        Some(MenuPick::Cancel) => Ok(()),
        Some(MenuPick::Index(i)) => {
            let Some(destination) = i.checked_sub(1).and_then(|i| destinations.get(i)) else {
                println!("{}", "Invalid selection.".yellow());
                return Ok(());
            };
            match session.ride(&destination.key) {
                Ok(_) => {
                    println!("You ride the line to {} and arrive at its station.", destination.name);
                    Ok(())
                }
                Err(e) => relay(e),
            }
        }
        None => {
            println!("{}", "Invalid selection.".yellow());
            Ok(())
        }
    }
}
