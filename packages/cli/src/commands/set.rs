use crate::config::Config;
use crate::template_file::TemplateFile;
use anyhow::{anyhow, Result};
use blockmail_editor::{EditSession, MutationResult};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Template file
    pub file: PathBuf,

    /// Component id
    pub component_id: String,

    /// Property name (e.g. fontSize, rows, platforms)
    pub field: String,

    /// Raw value, as typed into the property panel
    pub value: String,

    /// Toggle a flag of the record at this index instead (value is true/false)
    #[arg(short, long)]
    pub index: Option<usize>,

    /// Record key toggled with --index
    #[arg(short, long, default_value = "enabled")]
    pub key: String,
}

pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = PathBuf::from(cwd).join(&args.file);

    let file = TemplateFile::read(&path)?;
    let name = file.name.clone();
    let mut session = EditSession::new(config.editor_config());
    file.open_in(&mut session);

    let Some(component) = session.document().get(&args.component_id) else {
        return Err(anyhow!("No component with id {} in {}", args.component_id, args.file.display()));
    };
    if session.registry().field(component.component_type(), &args.field).is_none() {
        return Err(anyhow!(
            "{} has no property {}",
            component.component_type().display_name(),
            args.field
        ));
    }

    let result = match args.index {
        Some(index) => {
            let flag: bool = args
                .value
                .trim()
                .parse()
                .map_err(|_| anyhow!("Expected true or false, got {:?}", args.value))?;
            session.set_record_flag(&args.component_id, &args.field, index, &args.key, flag)
        }
        None => session.set_property(&args.component_id, &args.field, &args.value),
    };

    match result {
        MutationResult::Applied => {
            TemplateFile::from_session(&session, &name).write(&path)?;
            println!("  {} {}.{} updated", "✓".green(), args.component_id, args.field);
        }
        MutationResult::Unchanged | MutationResult::Skipped => {
            println!(
                "  {} {}.{} unchanged (value rejected or identical)",
                "⚠️".yellow(),
                args.component_id,
                args.field
            );
        }
    }

    Ok(())
}
