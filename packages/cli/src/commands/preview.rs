use crate::config::Config;
use crate::template_file::TemplateFile;
use anyhow::{anyhow, Result};
use blockmail_editor::EditSession;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Template file
    pub file: PathBuf,

    /// Render with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Mark this component as selected
    #[arg(short, long)]
    pub select: Option<String>,

    /// Write the canvas markup here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let file = TemplateFile::read(&PathBuf::from(cwd).join(&args.file))?;

    let mut session = EditSession::new(config.editor_config());
    session.set_theme(config.theme(args.dark));
    file.open_in(&mut session);

    if let Some(id) = args.select.as_deref() {
        if !session.select(Some(id)) {
            return Err(anyhow!("No component with id {} in {}", id, args.file.display()));
        }
    }

    let html = session.preview();
    match args.out {
        Some(out) => {
            let out = PathBuf::from(cwd).join(out);
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out, html)?;
            eprintln!("  {} {} → {}", "✓".green(), args.file.display(), out.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_editor::{ComponentType, Gesture};

    #[test]
    fn test_preview_marks_selection() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        let mut session = EditSession::default();
        session.drop_gesture(&Gesture::insert(ComponentType::Button, None));
        let id = session.document().components()[0].id().to_string();
        TemplateFile::from_session(&session, "Preview")
            .write(&dir.path().join("preview.json"))
            .unwrap();

        let args = PreviewArgs {
            file: PathBuf::from("preview.json"),
            dark: true,
            select: Some(id),
            out: Some(PathBuf::from("out/canvas.html")),
        };
        preview(args, &cwd).unwrap();

        let html = fs::read_to_string(dir.path().join("out/canvas.html")).unwrap();
        assert!(html.contains("email-preview dark-mode"));
        assert!(html.contains("canvas-component selected"));
    }

    #[test]
    fn test_preview_rejects_unknown_selection() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        TemplateFile {
            id: None,
            name: "Empty".to_string(),
            components: Vec::new(),
        }
        .write(&dir.path().join("empty.json"))
        .unwrap();

        let args = PreviewArgs {
            file: PathBuf::from("empty.json"),
            dark: false,
            select: Some("comp_x-1".to_string()),
            out: None,
        };
        assert!(preview(args, &cwd).is_err());
    }
}
