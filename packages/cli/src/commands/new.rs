use crate::config::Config;
use crate::template_file::{file_name_for, TemplateFile};
use anyhow::{anyhow, Result};
use blockmail_editor::{ComponentType, EditSession, Gesture, GestureOutcome};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Component types, top to bottom (e.g. header hero text footer)
    #[arg(required = true)]
    pub types: Vec<String>,

    /// Template name
    #[arg(short, long, default_value = "Untitled")]
    pub name: String,

    /// Output file (defaults to <templatesDir>/<name>.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let types = args
        .types
        .iter()
        .map(|tag| {
            tag.parse::<ComponentType>().map_err(|_| {
                let catalog = ComponentType::CATALOG;
                let known: Vec<&str> = catalog.iter().map(|ty| ty.as_str()).collect();
                anyhow!("Unknown component type: {} (expected one of: {})", tag, known.join(", "))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut session = EditSession::new(config.editor_config());
    for ty in types {
        if let GestureOutcome::Inserted { id, notice } = session.drop_gesture(&Gesture::insert(ty, None)) {
            println!("  {} {} ({})", "✓".green(), notice.message, id.dimmed());
        }
    }

    let out = match args.out {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_templates_dir(cwd).join(file_name_for(&args.name)),
    };

    TemplateFile::from_session(&session, &args.name).write(&out)?;

    println!();
    println!(
        "{} Created {} with {} components",
        "✅".green(),
        out.display(),
        session.document().len()
    );

    Ok(())
}
