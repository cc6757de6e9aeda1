//! Command-line surface.
//!
//! Every global option falls back to a `LOGOPEDIA_*` environment variable.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use logopedia_core::{ChildId, ExaminationId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "logopedia", version, about = "Speech-therapy records: children, examinations, answers")]
pub struct Cli {
    /// SQLite database file; created on first run.
    #[arg(long, env = "LOGOPEDIA_DB", default_value = "logopedia.db", global = true)]
    pub db: PathBuf,

    /// Directory for rolling log files.
    #[arg(long, env = "LOGOPEDIA_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long, env = "LOGOPEDIA_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Display language (`pl` or `en`); detected from the locale when unset.
    #[arg(long, env = "LOGOPEDIA_LANG", global = true)]
    pub lang: Option<String>,

    /// Echo warnings and errors to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive numbered menu (default).
    Menu,
    /// Add one child.
    AddChild {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List all children in insertion order.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one child with examinations and answers.
    Show {
        id: ChildId,
        #[arg(long)]
        json: bool,
    },
    /// Replace a child's notes; an empty value clears them.
    EditNotes { id: ChildId, notes: String },
    /// Delete a child with all examinations and answers.
    Delete { id: ChildId },
    /// Record an examination for a child.
    AddExam {
        child_id: ChildId,
        #[arg(long = "type", default_value = "")]
        exam_type: String,
        #[arg(long, default_value = "")]
        conclusions: String,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record one answer within an examination.
    AddAnswer {
        examination_id: ExaminationId,
        question_id: String,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use chrono::NaiveDate;
    use clap::Parser;

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["logopedia", "--db", "/tmp/x.db"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.db.to_str(), Some("/tmp/x.db"));
    }

    #[test]
    fn add_child_parses_iso_birth_date() {
        let cli = Cli::try_parse_from([
            "logopedia",
            "add-child",
            "--first-name",
            "Anna",
            "--last-name",
            "Kowalska",
            "--birth-date",
            "2018-01-01",
            "--gender",
            "K",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::AddChild {
                birth_date, gender, notes, ..
            }) => {
                assert_eq!(birth_date, NaiveDate::from_ymd_opt(2018, 1, 1));
                assert_eq!(gender, "K");
                assert_eq!(notes, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_date_is_rejected() {
        let result = Cli::try_parse_from([
            "logopedia",
            "add-exam",
            "1",
            "--date",
            "01.01.2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["logopedia", "list", "--json", "--lang", "pl"]).unwrap();
        assert_eq!(cli.lang.as_deref(), Some("pl"));
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }
}
