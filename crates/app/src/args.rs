use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB: &str = "quiz.sqlite3";
pub const DEFAULT_QUESTIONS: &str = "questions.json";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    MissingImportPath,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingImportPath => write!(f, "import requires a file path"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Status,
    Export,
    Import,
    Reset,
    Theme,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "status" => Some(Self::Status),
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            "reset" => Some(Self::Reset),
            "theme" => Some(Self::Theme),
            _ => None,
        }
    }
}

/// Where progress and preferences live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    /// `sqlite::memory:`; gone when the process exits.
    Memory,
    /// Absolute path of the database file.
    File(PathBuf),
}

impl Database {
    /// Accepts `sqlite::memory:`, `sqlite://<path>`, `sqlite:<path>` or a bare
    /// path. Relative paths resolve against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError::InvalidDbUrl` when no path is left.
    pub fn parse(raw: &str, cwd: &Path) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed == "sqlite::memory:" {
            return Ok(Self::Memory);
        }
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        if path.is_empty() {
            return Err(ArgsError::InvalidDbUrl {
                raw: raw.to_string(),
            });
        }
        Ok(Self::File(cwd.join(path)))
    }

    /// Connection URL; `mode=rwc` lets `SQLite` create a missing file.
    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_string(),
            Self::File(path) => format!("sqlite://{}?mode=rwc", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub db: Database,
    pub questions: PathBuf,
    /// `export --out <path>`
    pub out: Option<PathBuf>,
    /// `import <path>`
    pub import_path: Option<PathBuf>,
    /// `reset --yes` skips the confirmation prompt.
    pub assume_yes: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(Args),
    Help,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Parse `argv` (without the program name). `env` supplies defaults for
/// `QUIZ_DB_URL` and `QUIZ_QUESTIONS`.
pub fn parse(
    argv: Vec<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Invocation, ArgsError> {
    let mut iter = argv.into_iter().peekable();

    let command = match iter.peek().map(String::as_str) {
        None => Command::Play,
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => {
            let cmd = Command::from_arg(first)
                .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
            iter.next();
            cmd
        }
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let db_raw = env("QUIZ_DB_URL").unwrap_or_else(|| DEFAULT_DB.to_string());
    let mut args = Args {
        command,
        db: Database::parse(&db_raw, &cwd)?,
        questions: env("QUIZ_QUESTIONS").map_or_else(|| DEFAULT_QUESTIONS.into(), PathBuf::from),
        out: None,
        import_path: None,
        assume_yes: false,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Invocation::Help),
            "--db" => {
                let value = require_value(&mut iter, "--db")?;
                args.db = Database::parse(&value, &cwd)?;
            }
            "--questions" => {
                args.questions = require_value(&mut iter, "--questions")?.into();
            }
            "--out" if command == Command::Export => {
                args.out = Some(require_value(&mut iter, "--out")?.into());
            }
            "--yes" | "-y" if command == Command::Reset => args.assume_yes = true,
            path if command == Command::Import
                && args.import_path.is_none()
                && !path.starts_with('-') =>
            {
                args.import_path = Some(path.into());
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    if command == Command::Import && args.import_path.is_none() {
        return Err(ArgsError::MissingImportPath);
    }

    Ok(Invocation::Run(args))
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [play]            [--db <db>] [--questions <file>]");
    eprintln!("  quiz status            [--db <db>]");
    eprintln!("  quiz export [--out <file>]");
    eprintln!("  quiz import <file>");
    eprintln!("  quiz reset  [--yes]");
    eprintln!("  quiz theme");
    eprintln!();
    eprintln!("Keys while playing:");
    eprintln!("  1-4 or a-d  answer      Enter  next question");
    eprintln!("  t  toggle theme   r  reset progress   q  quit");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB}   (a path, sqlite:<path> or sqlite::memory:)");
    eprintln!("  --questions {DEFAULT_QUESTIONS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_QUESTIONS, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run_args(items: &[&str]) -> Args {
        match parse(argv(items), no_env).unwrap() {
            Invocation::Run(args) => args,
            Invocation::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn no_arguments_means_play_with_defaults() {
        let args = run_args(&[]);
        assert_eq!(args.command, Command::Play);
        let Database::File(path) = &args.db else {
            panic!("expected a database file");
        };
        assert!(path.is_absolute());
        assert!(path.ends_with(DEFAULT_DB));
        assert_eq!(args.questions, PathBuf::from(DEFAULT_QUESTIONS));
    }

    #[test]
    fn flags_without_subcommand_mean_play() {
        let args = run_args(&["--db", "sqlite::memory:", "--questions", "bank.json"]);
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.db, Database::Memory);
        assert_eq!(args.questions, PathBuf::from("bank.json"));
    }

    #[test]
    fn env_supplies_defaults() {
        let env = |key: &str| match key {
            "QUIZ_DB_URL" => Some("sqlite::memory:".to_string()),
            "QUIZ_QUESTIONS" => Some("data/q.json".to_string()),
            _ => None,
        };
        let Invocation::Run(args) = parse(argv(&["status"]), env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(args.command, Command::Status);
        assert_eq!(args.db, Database::Memory);
        assert_eq!(args.questions, PathBuf::from("data/q.json"));
    }

    #[test]
    fn import_takes_a_path() {
        let args = run_args(&["import", "progress.json"]);
        assert_eq!(args.import_path, Some(PathBuf::from("progress.json")));

        assert_eq!(
            parse(argv(&["import"]), no_env).unwrap_err(),
            ArgsError::MissingImportPath
        );
    }

    #[test]
    fn export_out_and_reset_yes_are_command_specific() {
        assert_eq!(
            run_args(&["export", "--out", "p.json"]).out,
            Some(PathBuf::from("p.json"))
        );
        assert!(run_args(&["reset", "--yes"]).assume_yes);
        assert_eq!(
            parse(argv(&["play", "--yes"]), no_env).unwrap_err(),
            ArgsError::UnknownArg("--yes".into())
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(
            parse(argv(&["frobnicate"]), no_env).unwrap_err(),
            ArgsError::UnknownCommand("frobnicate".into())
        );
        assert_eq!(
            parse(argv(&["--db"]), no_env).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
    }

    #[test]
    fn help_flag_short_circuits() {
        assert_eq!(parse(argv(&["export", "-h"]), no_env).unwrap(), Invocation::Help);
    }

    #[test]
    fn database_forms_resolve_to_files_or_memory() {
        let cwd = Path::new("/home/quiz");
        assert_eq!(
            Database::parse("sqlite:data/q.db", cwd).unwrap(),
            Database::File(PathBuf::from("/home/quiz/data/q.db"))
        );
        assert_eq!(
            Database::parse("sqlite:///tmp/q.db", cwd).unwrap(),
            Database::File(PathBuf::from("/tmp/q.db"))
        );
        assert_eq!(
            Database::parse("q.db", cwd).unwrap().url(),
            "sqlite:///home/quiz/q.db?mode=rwc"
        );
        assert_eq!(Database::parse(" sqlite::memory: ", cwd).unwrap().url(), "sqlite::memory:");
        assert_eq!(
            Database::parse("sqlite:", cwd).unwrap_err(),
            ArgsError::InvalidDbUrl { raw: "sqlite:".into() }
        );
    }
}
