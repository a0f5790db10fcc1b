//! REPL (Read-Eval-Print Loop) for the operator console
//!
//! The console is what drives the controller's polling tick: every command
//! triggers a tick through the controller's entry points, and `watch`
//! re-polls once per second until the window closes.

use crate::ConsoleFormatter;
use chrono::TimeDelta;
use pitchpoll_application::{
    Clock, ConnectionContext, IdentityResolver, PollController, VoteStore,
};
use pitchpoll_domain::{Phase, TradeDirection, VoteChoice};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use std::time::Duration;

/// Token used when the operator casts a vote without naming a participant
const OPERATOR_TOKEN: &str = "operator";

/// Interactive operator console
pub struct OperatorRepl<S, I, C> {
    controller: Arc<PollController<S, I, C>>,
    show_banner: bool,
}

impl<S, I, C> OperatorRepl<S, I, C>
where
    S: VoteStore,
    I: IdentityResolver,
    C: Clock,
{
    /// Create a new console over the given controller
    pub fn new(controller: Arc<PollController<S, I, C>>) -> Self {
        Self {
            controller,
            show_banner: true,
        }
    }

    /// Set whether to print the welcome banner
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Run the interactive console
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("pitchpoll").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.show_banner {
            self.print_welcome();
        }

        loop {
            let readline = rl.readline("poll> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if self.handle_command(line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Pitchpoll - Stock Pitch Voting       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Commands:");
        println!("  start <ticker> <buy|sell> <shares> <seconds>  - Start a new vote");
        println!("  vote <yes|no> [participant]                   - Cast a vote");
        println!("  status                                        - Show current state");
        println!("  watch                                         - Follow the poll until it closes");
        println!("  results                                       - Show the current tally");
        println!("  reset                                         - Abandon the session");
        println!("  help                                          - Show this help");
        println!("  quit                                          - Exit");
        println!();
    }

    /// Handle one command line. Returns true if the console should exit.
    async fn handle_command(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "start" => self.cmd_start(&args).await,
            "vote" => self.cmd_vote(&args).await,
            "status" => self.cmd_status().await,
            "watch" => self.cmd_watch().await,
            "results" => self.cmd_results().await,
            "reset" => {
                self.controller.reset_session();
                println!("Session reset.");
            }
            "help" => self.print_welcome(),
            "quit" | "exit" => {
                println!("Bye!");
                return true;
            }
            other => println!("Unknown command: {} (try `help`)", other),
        }
        false
    }

    async fn cmd_start(&self, args: &[&str]) {
        let [ticker, direction, shares, seconds] = args else {
            println!("Usage: start <ticker> <buy|sell> <shares> <seconds>");
            return;
        };

        let Some(direction) = TradeDirection::parse(direction) else {
            println!("Direction must be `buy` or `sell`.");
            return;
        };
        let Ok(shares) = shares.parse::<u32>() else {
            println!("Share count must be a positive integer.");
            return;
        };
        let Ok(seconds) = seconds.parse::<i64>() else {
            println!("Duration must be a number of seconds.");
            return;
        };

        match self
            .controller
            .start_vote(ticker, direction, shares, TimeDelta::seconds(seconds))
        {
            Ok(_) => self.cmd_status().await,
            Err(e) => println!("Cannot start: {}", e),
        }
    }

    async fn cmd_vote(&self, args: &[&str]) {
        let Some(choice) = args.first().and_then(|s| VoteChoice::parse(s)) else {
            println!("Usage: vote <yes|no> [participant]");
            return;
        };
        let token = args.get(1).copied().unwrap_or(OPERATOR_TOKEN);
        let context = ConnectionContext::new(token);

        match self.controller.cast_vote(&context, choice).await {
            Ok(outcome) => println!("{}", ConsoleFormatter::format_outcome(outcome)),
            Err(e) => println!("Vote rejected: {}", e),
        }
    }

    async fn cmd_status(&self) {
        match self.controller.status().await {
            Ok(status) => print!("{}", ConsoleFormatter::format_status(&status)),
            Err(e) => println!("Error: {}", e),
        }
    }

    /// Re-poll the controller once per second until the poll leaves the
    /// countdown/active phases, printing each refresh.
    async fn cmd_watch(&self) {
        loop {
            let status = match self.controller.status().await {
                Ok(status) => status,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };
            print!("{}", ConsoleFormatter::format_status(&status));

            match status.phase {
                Phase::Countdown | Phase::Active => {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Phase::Idle | Phase::Closed => return,
            }
        }
    }

    async fn cmd_results(&self) {
        match self.controller.current_tally().await {
            Ok(tally) => print!("{}", ConsoleFormatter::format_results(None, tally)),
            Err(e) => println!("Error: {}", e),
        }
    }
}
