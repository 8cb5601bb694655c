use crate::config::Config;
use crate::template_file::TemplateFile;
use anyhow::{anyhow, Result};
use blockmail_editor::{CompileOptions, EditSession};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Template file or directory (defaults to the templates directory)
    pub path: Option<String>,

    /// Render with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit without indentation or newlines
    #[arg(long)]
    pub compact: bool,

    /// Document title (defaults to the template name)
    #[arg(long)]
    pub title: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_templates_dir(cwd),
    };

    if !src.exists() {
        return Err(anyhow!("Path does not exist: {}", src.display()));
    }

    let (root, files) = if src.is_file() {
        let root = src.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![src.clone()])
    } else {
        (src.clone(), find_template_files(&src))
    };

    if files.is_empty() {
        println!("{}", "⚠️  No template files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Compiling templates...".bright_blue().bold());
        println!("Found {} files", files.len());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);
        match compile_file(file, relative_path, &args, &config, &out_dir) {
            Ok(output_path) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output_path
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} templates failed to compile", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} templates successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Compiled {} templates, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_template_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    args: &CompileArgs,
    config: &Config,
    out_dir: &Path,
) -> Result<String> {
    let file = TemplateFile::read(file_path)?;
    tracing::debug!(file = %file_path.display(), components = file.components.len(), "compiling template");

    let mut session = EditSession::new(config.editor_config());
    session.set_theme(config.theme(args.dark));
    session.set_compile_options(CompileOptions {
        pretty: !args.compact,
        title: args.title.clone().unwrap_or_else(|| file.name.clone()),
        ..CompileOptions::default()
    });
    file.open_in(&mut session);

    let html = session.export()?;

    if args.stdout {
        println!("{}", html);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(relative_path).with_extension("html");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;

    Ok(output_file.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_editor::{ComponentType, Gesture};

    fn write_template(path: &Path, name: &str, types: &[ComponentType]) {
        let mut session = EditSession::default();
        for ty in types {
            session.drop_gesture(&Gesture::insert(ty.clone(), None));
        }
        TemplateFile::from_session(&session, name).write(path).unwrap();
    }

    fn args(path: Option<&str>) -> CompileArgs {
        CompileArgs {
            path: path.map(str::to_string),
            dark: false,
            stdout: false,
            out_dir: None,
            compact: false,
            title: None,
        }
    }

    #[test]
    fn test_compile_directory_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let templates = dir.path().join("templates");
        write_template(&templates.join("welcome.json"), "Welcome <1>", &[ComponentType::Header]);
        write_template(&templates.join("promo/sale.json"), "Sale", &[ComponentType::Cta]);

        compile(args(None), &cwd).unwrap();

        let welcome = fs::read_to_string(dir.path().join("dist/welcome.html")).unwrap();
        assert!(welcome.starts_with("<!DOCTYPE html>"));
        assert!(welcome.contains("<title>Welcome &lt;1&gt;</title>"));
        assert!(dir.path().join("dist/promo/sale.html").exists());
    }

    #[test]
    fn test_empty_template_is_reported_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        write_template(&dir.path().join("empty.json"), "Empty", &[]);

        compile(args(Some("empty.json")), &cwd).unwrap();
        assert!(!dir.path().join("dist/empty.html").exists());
    }

    #[test]
    fn test_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        assert!(compile(args(Some("nope")), &cwd).is_err());
    }
}
