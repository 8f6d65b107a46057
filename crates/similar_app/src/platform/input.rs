use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use similar_core::{Msg, RatingAction};

use super::ui::constants::{DISLIKE_LABEL, LIKE_LABEL};

pub const HELP: &str = "\
commands:
  star <candidate> <1-5>   rate a candidate
  reset <candidate>        clear a rating
  drop <candidate>         mark a candidate as not relevant
  like <candidate>         like a candidate
  dislike <candidate>      dislike a candidate
  help                     show this text
  quit                     leave";

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Msg(Msg),
    /// Rating control clicked; the row key is resolved against indexed rows.
    Rate {
        candidate: String,
        action: RatingAction,
    },
    Quit,
    /// Standard input reached end of file.
    InputClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Msg),
    Rate {
        candidate: String,
        action: RatingAction,
    },
    Help,
    Quit,
}

/// Parses one line of user input.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let candidate = words.next();
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for {verb:?}"));
    }

    let rating = |action: RatingAction, candidate: &str| Command::Rate {
        candidate: candidate.to_string(),
        action,
    };
    let reaction = |code: i32, candidate: &str| {
        Command::Click(Msg::ReactionClicked {
            candidate: candidate.to_string(),
            code,
        })
    };

    let command = match (verb, candidate, argument) {
        ("help", None, None) => Command::Help,
        ("quit" | "exit", None, None) => Command::Quit,
        ("star", Some(candidate), Some(stars)) => {
            let stars = stars
                .parse::<u8>()
                .map_err(|_| format!("not a star count: {stars:?}"))?;
            rating(RatingAction::Star(stars), candidate)
        }
        ("reset", Some(candidate), None) => rating(RatingAction::Reset, candidate),
        ("drop", Some(candidate), None) => rating(RatingAction::NotRelevant, candidate),
        ("like", Some(candidate), None) => reaction(LIKE_LABEL, candidate),
        ("dislike", Some(candidate), None) => reaction(DISLIKE_LABEL, candidate),
        _ => return Err(format!("unrecognized command {line:?}; try \"help\"")),
    };
    Ok(Some(command))
}

/// Reads commands from standard input on a background thread.
pub fn spawn_stdin_reader(tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line) {
                Ok(Some(Command::Click(msg))) => HostEvent::Msg(msg),
                Ok(Some(Command::Rate { candidate, action })) => {
                    HostEvent::Rate { candidate, action }
                }
                Ok(Some(Command::Help)) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(Some(Command::Quit)) => HostEvent::Quit,
                Ok(None) => continue,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(HostEvent::InputClosed);
    });
}
