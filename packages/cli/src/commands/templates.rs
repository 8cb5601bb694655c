use crate::config::Config;
use crate::template_file::{file_name_for, TemplateFile};
use anyhow::{anyhow, Result};
use blockmail_editor::{EditSession, Notice, TemplateGateway};
use blockmail_gateway::HttpGateway;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Base URL of the template store (overrides config)
    #[arg(short, long, global = true)]
    pub gateway_url: Option<String>,

    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List stored templates
    List,

    /// Store a template file; files without an id are created, others updated
    Push {
        file: PathBuf,

        /// Name for a template that has never been pushed
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Download a stored template into a file
    Pull {
        id: String,

        /// Output file (defaults to <templatesDir>/<name>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete a stored template
    Delete { id: String },
}

pub fn templates(args: TemplatesArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let url = args.gateway_url.clone().unwrap_or_else(|| config.gateway_url.clone());
    let gateway = HttpGateway::new(&url)?;
    tracing::info!(%url, "using template store");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(args.command, &gateway, &config, cwd))
}

async fn run<G: TemplateGateway>(
    command: TemplatesCommand,
    gateway: &G,
    config: &Config,
    cwd: &str,
) -> Result<()> {
    let mut session = EditSession::new(config.editor_config());

    match command {
        TemplatesCommand::List => {
            let templates = session.list_templates(gateway).await?;
            if templates.is_empty() {
                println!("{}", "No saved templates yet".dimmed());
            }
            for template in templates {
                println!(
                    "  {} {} ({} components)",
                    template.id.bright_white(),
                    template.name,
                    template.components.len()
                );
            }
        }

        TemplatesCommand::Push { file, name } => {
            let path = PathBuf::from(cwd).join(&file);
            let template_file = TemplateFile::read(&path)?;
            let file_name = name.unwrap_or_else(|| template_file.name.clone());
            template_file.open_in(&mut session);

            let notice = if session.template().is_some() {
                session.save(gateway).await?
            } else {
                session.save_as(gateway, &file_name).await?
            };

            // remember the store id so the next push updates
            TemplateFile::from_session(&session, &file_name).write(&path)?;
            print_notice(&notice);
        }

        TemplatesCommand::Pull { id, out } => {
            let templates = session.list_templates(gateway).await?;
            let template = templates
                .into_iter()
                .find(|t| t.id == id)
                .ok_or_else(|| anyhow!("Template not found: {}", id))?;

            let out = match out {
                Some(out) => PathBuf::from(cwd).join(out),
                None => config.get_templates_dir(cwd).join(file_name_for(&template.name)),
            };
            let notice = session.load(template);
            TemplateFile::from_session(&session, "").write(&out)?;

            print_notice(&notice);
            println!("  → {}", out.display());
        }

        TemplatesCommand::Delete { id } => {
            let notice = session.delete_template(gateway, &id).await?;
            print_notice(&notice);
        }
    }

    Ok(())
}

fn print_notice(notice: &Notice) {
    if notice.is_error() {
        println!("{} {}", notice.title.red().bold(), notice.message);
    } else {
        println!("{} {}: {}", "✓".green(), notice.title.bold(), notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_editor::{ComponentType, Gesture, MemoryGateway};

    fn write_draft(dir: &std::path::Path) -> PathBuf {
        let mut session = EditSession::default();
        session.drop_gesture(&Gesture::insert(ComponentType::Hero, None));
        let path = dir.join("draft.json");
        TemplateFile::from_session(&session, "Draft").write(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_push_creates_then_updates() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let path = write_draft(dir.path());
        let gateway = MemoryGateway::new();
        let config = Config::default();

        let push = || TemplatesCommand::Push {
            file: PathBuf::from("draft.json"),
            name: None,
        };

        run(push(), &gateway, &config, &cwd).await.unwrap();
        let pushed = TemplateFile::read(&path).unwrap();
        assert_eq!(pushed.id.as_deref(), Some("1"));

        run(push(), &gateway, &config, &cwd).await.unwrap();
        let stored = gateway.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Draft");
    }

    #[tokio::test]
    async fn test_pull_writes_stored_template() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let gateway = MemoryGateway::new();
        let saved = gateway.create("Spring Sale", &[]).await.unwrap();

        let pull = TemplatesCommand::Pull {
            id: saved.id.clone(),
            out: None,
        };
        run(pull, &gateway, &Config::default(), &cwd).await.unwrap();

        let file = TemplateFile::read(&dir.path().join("templates/spring-sale.json")).unwrap();
        assert_eq!(file.id, Some(saved.id));
        assert_eq!(file.name, "Spring Sale");
    }

    #[tokio::test]
    async fn test_offline_store_fails_with_action() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let path = write_draft(dir.path());
        let before = std::fs::read_to_string(&path).unwrap();

        let push = TemplatesCommand::Push {
            file: PathBuf::from("draft.json"),
            name: None,
        };
        let err = run(push, &MemoryGateway::offline(), &Config::default(), &cwd)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("save template"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
