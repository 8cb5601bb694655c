mod commands;
mod config;
mod template_file;

use blockmail_editor::EditorError;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compile, init, new, preview, set, templates, CompileArgs, InitArgs, NewArgs, PreviewArgs,
    SetArgs, TemplatesArgs,
};
use tracing_subscriber::filter::LevelFilter;

/// Blockmail CLI - block-based email template builder
#[derive(Parser, Debug)]
#[command(name = "blockmail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Blockmail project
    Init(InitArgs),

    /// Scaffold a template from catalog defaults
    New(NewArgs),

    /// Edit one property of a component in a template file
    Set(SetArgs),

    /// Render the editor canvas for a template
    Preview(PreviewArgs),

    /// Compile templates to standalone HTML emails
    Compile(CompileArgs),

    /// Manage templates in the template store
    Templates(TemplatesArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Compile(args) => compile(args, &cwd),
        Command::Templates(args) => templates(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        match err.downcast_ref::<EditorError>() {
            Some(editor_err) => {
                let notice = editor_err.notice();
                eprintln!("{} {}: {}", "Error:".red().bold(), notice.title, notice.message);
                eprintln!("  {}", err.to_string().dimmed());
            }
            None => eprintln!("{} {}", "Error:".red().bold(), err),
        }
        eprintln!();
        std::process::exit(1);
    }
}
