use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::template_file::TemplateFile;
use anyhow::Result;
use blockmail_editor::{ComponentType, EditSession, Gesture};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Base URL of the template store
    #[arg(short, long)]
    pub gateway_url: Option<String>,

    /// Templates directory
    #[arg(short, long, default_value = "templates")]
    pub templates_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

/// Blocks of the sample template, top to bottom
const WELCOME_BLOCKS: [ComponentType; 5] = [
    ComponentType::Header,
    ComponentType::Hero,
    ComponentType::Text,
    ComponentType::Button,
    ComponentType::Footer,
];

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Blockmail project...".bright_blue().bold()
    );

    let templates_dir = PathBuf::from(cwd).join(&args.templates_dir);
    if !templates_dir.exists() {
        fs::create_dir_all(&templates_dir)?;
        println!("  {} Created {}/", "✓".green(), args.templates_dir);
    }

    // Sample template built from catalog defaults
    let welcome_file = templates_dir.join("welcome.json");
    if !welcome_file.exists() {
        let mut session = EditSession::default();
        for ty in WELCOME_BLOCKS.iter() {
            session.drop_gesture(&Gesture::insert(ty.clone(), None));
        }
        TemplateFile::from_session(&session, "Welcome").write(&welcome_file)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let mut config = Config {
        templates_dir: args.templates_dir.clone(),
        ..Config::default()
    };
    if let Some(url) = args.gateway_url {
        config.gateway_url = url;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.templates_dir);
    println!("  2. Run: blockmail compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
