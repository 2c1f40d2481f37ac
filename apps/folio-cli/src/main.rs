use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_core::config::{Config, Settings};
use folio_editor::{EditorSession, FileDraftStore, NewTestimonial, Origin, TestimonialPatch};
use folio_search::{categories, suggestions, FuzzyRanker, Pager, Query, SearchOptions};

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Search and edit a portfolio content.json")]
struct Cli {
    /// Published content; overrides `data.content_path`.
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Draft directory; overrides `data.draft_dir`.
    #[arg(long, global = true)]
    drafts: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank projects against a query.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value = "All")]
        category: String,
        /// Extra "load more" steps past the first page.
        #[arg(long, default_value_t = 0)]
        more: usize,
        /// Print per-signal points.
        #[arg(long)]
        explain: bool,
    },
    /// Autocomplete titles for a partial query.
    Suggest { query: String },
    /// Category filter labels, with result counts for an optional query.
    Categories {
        #[arg(default_value = "")]
        query: String,
    },
    /// Print the text at a content path, e.g. `projects[0].tools`.
    Show { path: String },
    /// Replace the text at a content path. List fields take comma-separated text.
    Edit { path: String, text: String },
    /// Point a media field at a URL, e.g. `projects[2].thumbnail`.
    SetMedia { path: String, url: String },
    DeleteProject { id: String },
    AddTestimonial {
        #[arg(long)]
        quote: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: Option<String>,
    },
    UpdateTestimonial {
        id: String,
        #[arg(long)]
        quote: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    DeleteTestimonial { id: String },
    /// New testimonial order; every id exactly once.
    ReorderTestimonials {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Export the current content as pretty JSON.
    Publish {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Discard the draft.
    Reset,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn open_session(cli: &Cli, settings: &Settings) -> Result<EditorSession<FileDraftStore>> {
    let base = env::current_dir()?;
    let content = cli.content.clone().unwrap_or_else(|| settings.content_path(&base));
    let drafts = cli.drafts.clone().unwrap_or_else(|| settings.draft_dir(&base));
    EditorSession::open(FileDraftStore::new(drafts), content)
}

fn report(changed: bool, what: &str) {
    if changed {
        println!("✅ {what}");
    } else {
        println!("nothing changed: {what}");
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    let mut session = open_session(&cli, &settings)?;
    if session.origin() == Origin::Draft {
        tracing::info!("working on unpublished draft");
    }

    match cli.command {
        Command::Search { query, category, more, explain } => {
            let content = session.content()?;
            let ranker = FuzzyRanker::new(SearchOptions::from(&settings.search));
            let q = Query::new(query, category);
            let ranked = ranker.rank(&content.projects, &q);
            let mut pager = Pager::new(settings.search.page_initial, settings.search.page_step);
            for _ in 0..more {
                pager.load_more();
            }
            println!("🔍 {} results", ranked.len());
            for (i, hit) in pager.window(&ranked).iter().enumerate() {
                let p = hit.record;
                println!("  {}. score={:.2}  id={}  category={}  title={}", i + 1, hit.score, p.id, p.category, p.title);
                if explain {
                    println!("     {:?}", ranker.explain(p, &q.text));
                }
            }
            if pager.has_more(ranked.len()) {
                println!("  … {} more (use --more)", ranked.len() - pager.window(&ranked).len());
            }
        }
        Command::Suggest { query } => {
            let content = session.content()?;
            let ranker = FuzzyRanker::new(SearchOptions::from(&settings.search));
            let q = Query::text(query);
            let ranked = ranker.rank(&content.projects, &q);
            for p in suggestions(&ranked, &q, settings.search.suggestion_limit) {
                println!("{}\t{}", p.id, p.title);
            }
        }
        Command::Categories { query } => {
            let content = session.content()?;
            if query.trim().is_empty() {
                for label in categories(&content.projects) {
                    println!("{label}");
                }
            } else {
                let ranker = FuzzyRanker::new(SearchOptions::from(&settings.search));
                for (label, count) in ranker.category_counts(&content.projects, &query) {
                    println!("{label}: {count}");
                }
            }
        }
        Command::Show { path } => match session.text_at(&path)? {
            Some(text) => println!("{text}"),
            None => anyhow::bail!("nothing at '{path}'"),
        },
        Command::Edit { path, text } => {
            let changed = session.edit_text(&path, &text)?;
            report(changed, &format!("edited {path}"));
        }
        Command::SetMedia { path, url } => {
            let changed = session.set_media(&path, &url)?;
            report(changed, &format!("set {path}"));
        }
        Command::DeleteProject { id } => {
            let changed = session.delete_project(&id)?;
            report(changed, &format!("deleted project {id}"));
        }
        Command::AddTestimonial { quote, name, title, image } => {
            let id = session.add_testimonial(NewTestimonial { quote, name, title, image })?;
            println!("✅ added testimonial {id}");
        }
        Command::UpdateTestimonial { id, quote, name, title, image } => {
            let changed = session.update_testimonial(&id, TestimonialPatch { quote, name, title, image })?;
            report(changed, &format!("updated testimonial {id}"));
        }
        Command::DeleteTestimonial { id } => {
            let changed = session.delete_testimonial(&id)?;
            report(changed, &format!("deleted testimonial {id}"));
        }
        Command::ReorderTestimonials { ids } => {
            session.reorder_testimonials(&ids)?;
            println!("✅ testimonials reordered");
        }
        Command::Publish { out } => {
            let out = match out {
                Some(out) => out,
                None => settings.export_path(&env::current_dir()?),
            };
            session.publish(&out)?;
            println!("✅ exported {}", out.display());
        }
        Command::Reset => {
            session.reset()?;
            println!("✅ draft discarded");
        }
    }
    Ok(())
}
