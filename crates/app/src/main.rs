mod args;
mod messages;
mod terminal;

use std::path::PathBuf;

use args::{Args, ArgsError, Command, Database, Invocation};
use services::{AppServices, Clock, ScoreView};
use tokio::io::{AsyncBufReadExt, BufReader};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match args::parse(argv, |key| std::env::var(key).ok()) {
        Ok(Invocation::Run(parsed)) => parsed,
        Ok(Invocation::Help) => {
            args::print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            args::print_usage();
            return Err(err.into());
        }
    };

    if let Database::File(path) = &parsed.db {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let db_url = parsed.db.url();
    let services = AppServices::new_sqlite(&db_url, &parsed.questions, Clock::default()).await?;
    log::debug!(
        "services ready (db={db_url}, questions={})",
        parsed.questions.display()
    );

    match parsed.command {
        Command::Play => terminal::play(&services).await,
        Command::Status => {
            let progress = services.progress().load().await;
            println!("{}", terminal::score_text(&ScoreView::from_progress(&progress)));
            Ok(())
        }
        Command::Export => export(&services, parsed.out).await,
        Command::Import => import(&services, &parsed).await,
        Command::Reset => reset(&services, parsed.assume_yes).await,
        Command::Theme => {
            let theme = services.theme().toggle().await?;
            println!("{}", messages::theme_set(theme.as_str()));
            Ok(())
        }
    }
}

async fn export(
    services: &AppServices,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = services.progress();
    let document = progress.export(&progress.load().await)?;
    let path = out.unwrap_or_else(|| PathBuf::from(progress.export_file_name()));
    tokio::fs::write(&path, document).await?;
    println!("{}", messages::export_done(&path));
    Ok(())
}

async fn import(services: &AppServices, parsed: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = parsed
        .import_path
        .as_deref()
        .ok_or(ArgsError::MissingImportPath)?;
    let text = tokio::fs::read_to_string(path).await?;
    match services.progress().import(&text).await {
        Ok(progress) => {
            println!("{}", messages::import_done(progress.score(), progress.total_answered()));
            Ok(())
        }
        Err(err) => Err(messages::import_failed(&err).into()),
    }
}

async fn reset(services: &AppServices, assume_yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !assume_yes {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        if !terminal::confirm(&mut lines).await? {
            println!("{}", messages::RESET_CANCELLED);
            return Ok(());
        }
    }
    services.progress().reset().await?;
    println!("{}", messages::RESET_DONE);
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
