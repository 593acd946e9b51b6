use clap::{Parser, Subcommand};
use outline_notes::config::{RcConfig, RcLoader};
use outline_notes::controller::EditorController;
use outline_notes::{OutlineText, logging, outline};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "outline", version, about = "Numbered meeting-note editor")]
struct Cli {
    /// Use this rc file instead of .outlinerc lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Edit a note in the terminal
    Edit { file: PathBuf },
    /// Print a note with display numbering
    Show { file: PathBuf },
    /// Strip numbering from an edit-form text (file or stdin)
    Normalize { file: Option<PathBuf> },
    /// Number a stored note for editing (file or stdin)
    Render { file: Option<PathBuf> },
    /// Print a sample .outlinerc
    SampleRc,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RcLoader::load_from(path),
        None => RcLoader::load_config(),
    };

    match cli.command {
        Command::Edit { file } => edit(file, &config)?,
        Command::Show { file } => {
            let storage = read_input(Some(&file))?;
            println!("{}", outline::format_display(&OutlineText::parse(&storage)));
        }
        Command::Normalize { file } => {
            println!("{}", outline::normalize(&read_input(file.as_deref())?));
        }
        Command::Render { file } => {
            let storage = read_input(file.as_deref())?;
            println!("{}", outline::render(&OutlineText::parse(&storage)));
        }
        Command::SampleRc => print!("{}", RcLoader::generate_sample_rc()),
    }

    Ok(())
}

fn edit(file: PathBuf, config: &RcConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Logging is best-effort; the editor works without it
    let _guard = logging::init(&config.log_level, &logging::default_log_dir()).ok();

    EditorController::open(file, config)?.run()?;
    Ok(())
}

/// Read a document from `file`, or stdin when there is none.
fn read_input(file: Option<&Path>) -> io::Result<String> {
    let input = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    Ok(trim_final_newline(input))
}

/// Files and pipes usually end with one newline that is not content.
fn trim_final_newline(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}
