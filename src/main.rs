//! mdbrowse - browse a directory of Markdown help topics in the terminal.
//!
//! # Usage
//!
//! ```bash
//! mdbrowse docs/help
//! mdbrowse --topic Installing docs/help
//! mdbrowse --print --plain --topic FAQ docs/help
//! mdbrowse --list docs/help
//! ```

use std::io::{Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use mdbrowse::app::App;
use mdbrowse::browser::Browser;
use mdbrowse::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use mdbrowse::image::FsImageSupplier;
use mdbrowse::ui::print::print_items;
use mdbrowse::ui::view::TopicView;

/// A terminal browser for Markdown help topics
#[derive(Parser, Debug)]
#[command(name = "mdbrowse", version, about, long_about = None)]
struct Cli {
    /// Directories to load topics from
    #[arg(value_name = "DIR", default_value = ".")]
    dirs: Vec<PathBuf>,

    /// Topic to open instead of the home topic
    #[arg(short, long, value_name = "NAME")]
    topic: Option<String>,

    /// Print topic names and titles, then exit
    #[arg(short, long)]
    list: bool,

    /// Print the topic to stdout instead of opening the browser
    #[arg(short, long)]
    print: bool,

    /// Print without ANSI styling
    #[arg(long)]
    plain: bool,

    /// Directory image files are loaded from
    #[arg(long, value_name = "DIR")]
    images_path: Option<PathBuf>,

    /// Directory searched for `icon:` images (repeatable)
    #[arg(long = "icon-dir", value_name = "DIR")]
    icon_dirs: Vec<PathBuf>,

    /// Regex selecting topic files; capture 1 is the topic name
    #[arg(long, value_name = "REGEX")]
    file_match: Option<String>,

    /// Regex finding a topic's title; capture 1 is the title
    #[arg(long, value_name = "REGEX")]
    title_match: Option<String>,

    /// Bullet characters for list levels 1, 2 and 3+
    #[arg(long, value_name = "CHARS")]
    bullet_chars: Option<String>,

    /// Topic shown at startup and by the home key
    #[arg(long, value_name = "NAME")]
    home: Option<String>,

    /// Start with no topic selected
    #[arg(long)]
    no_home: bool,

    /// Number of visits kept in history (1-100)
    #[arg(long, value_name = "N")]
    history_max: Option<usize>,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            images_path: self.images_path.clone(),
            icon_dirs: self.icon_dirs.clone(),
            file_match: self.file_match.clone(),
            title_match: self.title_match.clone(),
            bullet_chars: self.bullet_chars.clone(),
            home: self.home.clone(),
            no_home: self.no_home,
            history_max: self.history_max,
            plain: self.plain,
        }
    }

    const fn interactive(&self) -> bool {
        !self.list && !self.print
    }
}

/// Log to stderr, to `--log-file`, or nowhere while the browser owns the
/// terminal.
fn init_logging(cli: &Cli) -> Result<()> {
    let writer = match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None if cli.interactive() => BoxMakeWriter::new(std::io::sink),
        None => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(writer)
        .with_ansi(cli.log_file.is_none())
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let view = TopicView::new(FsImageSupplier::new(effective.icon_dirs.clone()));
    let mut browser = Browser::new(effective.browser_config(), view)?;
    for dir in &cli.dirs {
        browser
            .add_topics_from_directory(
                dir,
                effective.file_match.as_deref(),
                effective.title_match.as_deref(),
            )
            .with_context(|| format!("Failed to load topics from {}", dir.display()))?;
    }
    browser.refresh();

    if let Some(name) = &cli.topic
        && !browser.navigate_to_topic_by_name(Some(name.as_str()))
    {
        anyhow::bail!("No topic named '{name}'");
    }

    if cli.list {
        let mut out = stdout().lock();
        for topic in browser.topics() {
            writeln!(out, "{}\t{}", topic.name, topic.title)?;
        }
        return Ok(());
    }

    if cli.print {
        if browser.current_topic().is_none() {
            anyhow::bail!("No topic to print; pass --topic NAME");
        }
        let supplier = FsImageSupplier::new(effective.icon_dirs.clone());
        print_items(
            &mut stdout().lock(),
            &browser.render_current(),
            &supplier,
            effective.plain,
        )?;
        return Ok(());
    }

    let app = App::new(browser).with_config_paths(
        Some(global_path),
        local_path.exists().then_some(local_path),
    );
    app.run().context("Application error")
}
