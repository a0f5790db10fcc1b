//! Console output formatter for poll state

use chrono::TimeDelta;
use colored::Colorize;
use pitchpoll_application::{PollStatus, RecordOutcome};
use pitchpoll_domain::{Phase, Tally, TradeSubject};

/// Formats poll state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a full status snapshot, dispatching on phase
    pub fn format_status(status: &PollStatus) -> String {
        match status.phase {
            Phase::Idle => format!(
                "{}\n",
                "No active vote. Use `start <ticker> <buy|sell> <shares> <seconds>`.".dimmed()
            ),
            Phase::Countdown => Self::format_countdown(status.remaining),
            Phase::Active => Self::format_active(status),
            Phase::Closed => {
                Self::format_results(status.subject.as_ref(), status.tally.unwrap_or_default())
            }
        }
    }

    /// The pre-roll cue every participant display synchronizes on
    pub fn format_countdown(remaining: Option<TimeDelta>) -> String {
        let seconds = remaining.map(|r| r.num_seconds()).unwrap_or(0);
        format!(
            "{}\n",
            format!("Voting will begin in {}...", seconds).red().bold()
        )
    }

    fn format_active(status: &PollStatus) -> String {
        let mut output = String::new();

        if let Some(subject) = &status.subject {
            output.push_str(&format!(
                "{} {}\n",
                "Active Vote:".cyan().bold(),
                subject.to_string().bold()
            ));
        }
        if let Some(remaining) = status.remaining {
            output.push_str(&format!(
                "Time remaining: {}\n",
                Self::format_remaining(remaining)
            ));
        }
        if let Some(tally) = status.tally {
            output.push_str(&format!("Votes so far: {}\n", tally.total()));
        }
        output
    }

    /// Final results with counts and percentages
    pub fn format_results(subject: Option<&TradeSubject>, tally: Tally) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=== Final Results ===".cyan().bold()));
        if let Some(subject) = subject {
            output.push_str(&format!("{}\n", subject));
        }

        match (tally.yes_percent(), tally.no_percent()) {
            (Some(yes_pct), Some(no_pct)) => {
                output.push_str(&format!(
                    "{} {} ({:.1}%)\n",
                    "Yes Votes:".green().bold(),
                    tally.yes,
                    yes_pct
                ));
                output.push_str(&format!(
                    "{} {} ({:.1}%)\n",
                    "No Votes:".red().bold(),
                    tally.no,
                    no_pct
                ));
                output.push_str(&format!("Total Votes: {}\n", tally.total()));
            }
            _ => output.push_str("No votes were recorded.\n"),
        }

        output
    }

    /// Render a duration as `Mm Ss`
    pub fn format_remaining(remaining: TimeDelta) -> String {
        let total = remaining.num_seconds().max(0);
        format!("{}m {}s", total / 60, total % 60)
    }

    /// User feedback for a cast-vote outcome
    pub fn format_outcome(outcome: RecordOutcome) -> String {
        match outcome {
            RecordOutcome::Recorded => "Vote recorded!".green().to_string(),
            RecordOutcome::AlreadyVoted => "You have already voted!".yellow().to_string(),
        }
    }
}
