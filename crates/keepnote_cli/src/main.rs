//! keepnote: command-line front end for the note core.
//!
//! # Responsibility
//! - Map subcommands onto note store operations.
//! - Resolve the data directory and bootstrap database and logging.
//! - Render the note list the way the store keeps it: newest first.

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use keepnote_core::db::open_db;
use keepnote_core::{
    category_counts, default_log_level, filter_notes, init_logging, Category, CategoryCounts,
    CategoryFilter, Note, NoteId, NotePatch, NoteStore, SqliteNoteStorage, ViewQuery,
};
use log::info;
use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

const DATA_DIR_ENV: &str = "KEEPNOTE_DIR";
const DEFAULT_DATA_DIR_NAME: &str = ".keepnote";
const DB_FILE_NAME: &str = "keepnote.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "keepnote")]
#[command(author, version, about = "Local-first note keeping on SQLite")]
#[command(propagate_version = true)]
struct Cli {
    /// Data directory (default: $KEEPNOTE_DIR, else ~/.keepnote)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a note
    Add {
        /// Note title
        title: String,

        /// Body text
        #[arg(short, long, default_value = "")]
        content: String,

        /// Category: personal, work or urgent
        #[arg(long, default_value = "personal")]
        category: String,
    },

    /// List notes, optionally narrowed by search term and category
    List {
        /// Case-insensitive substring matched in title or content
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category filter: all, personal, work or urgent
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Edit title, content or category of a note
    Edit {
        /// Note id or unique id prefix
        id: String,

        /// Replacement title
        #[arg(short, long)]
        title: Option<String>,

        /// Replacement body text
        #[arg(short, long)]
        content: Option<String>,

        /// Replacement category: personal, work or urgent
        #[arg(long)]
        category: Option<String>,
    },

    /// Toggle a note between open and done
    Toggle {
        /// Note id or unique id prefix
        id: String,
    },

    /// Remove a note
    Rm {
        /// Note id or unique id prefix
        id: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    std::fs::create_dir_all(&data_dir).map_err(|err| {
        format!(
            "failed to create data directory `{}`: {err}",
            data_dir.display()
        )
    })?;
    init_file_logging(&data_dir, cli.log_level.as_deref());

    let conn = open_db(&data_dir.join(DB_FILE_NAME))?;
    let mut store = NoteStore::open(SqliteNoteStorage::new(&conn));

    match cli.command {
        Commands::Add {
            title,
            content,
            category,
        } => {
            info!("event=cli_command module=cli status=start command=add");
            cmd_add(&mut store, &title, &content, &category)?;
        }
        Commands::List { search, category } => {
            info!("event=cli_command module=cli status=start command=list");
            cmd_list(&store, search, &category)?;
        }
        Commands::Edit {
            id,
            title,
            content,
            category,
        } => {
            info!("event=cli_command module=cli status=start command=edit");
            cmd_edit(&mut store, &id, title, content, category)?;
        }
        Commands::Toggle { id } => {
            info!("event=cli_command module=cli status=start command=toggle");
            cmd_toggle(&mut store, &id)?;
        }
        Commands::Rm { id } => {
            info!("event=cli_command module=cli status=start command=rm");
            cmd_rm(&mut store, &id)?;
        }
    }

    if let Some(warning) = store.storage_warning() {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

fn cmd_add(
    store: &mut NoteStore<SqliteNoteStorage<'_>>,
    title: &str,
    content: &str,
    category_token: &str,
) -> Result<(), Box<dyn Error>> {
    let category = parse_category(category_token)?;
    let note = store.create(title, content, category)?;
    println!(
        "added {} \"{}\" [{}]",
        short_id(&note.id),
        note.title,
        note.category
    );
    Ok(())
}

fn cmd_list(
    store: &NoteStore<SqliteNoteStorage<'_>>,
    search: String,
    category_token: &str,
) -> Result<(), Box<dyn Error>> {
    let query = ViewQuery {
        search_term: search,
        category: parse_category_filter(category_token)?,
    };

    println!("{}", counts_line(category_counts(store.notes())));
    println!();

    let visible = filter_notes(store.notes(), &query);
    if visible.is_empty() {
        println!("{}", empty_state_line(&query));
        return Ok(());
    }

    for note in visible {
        print_note(note);
    }
    Ok(())
}

fn cmd_edit(
    store: &mut NoteStore<SqliteNoteStorage<'_>>,
    id_token: &str,
    title: Option<String>,
    content: Option<String>,
    category_token: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let category = match category_token {
        Some(token) => Some(parse_category(&token)?),
        None => None,
    };
    let patch = NotePatch {
        title,
        content,
        category,
    };
    if patch.is_empty() {
        return Err("nothing to change; pass --title, --content or --category".into());
    }

    let id = resolve_note_id(store.notes(), id_token)?;
    if let Some(note) = store.update(id, &patch)? {
        println!(
            "updated {} \"{}\" [{}]",
            short_id(&note.id),
            note.title,
            note.category
        );
    }
    Ok(())
}

fn cmd_toggle(
    store: &mut NoteStore<SqliteNoteStorage<'_>>,
    id_token: &str,
) -> Result<(), Box<dyn Error>> {
    let id = resolve_note_id(store.notes(), id_token)?;
    if let Some(note) = store.toggle_complete(id) {
        let state = if note.completed { "done" } else { "open" };
        println!(
            "toggled {} \"{}\" -> {state}",
            short_id(&note.id),
            note.title
        );
    }
    Ok(())
}

fn cmd_rm(
    store: &mut NoteStore<SqliteNoteStorage<'_>>,
    id_token: &str,
) -> Result<(), Box<dyn Error>> {
    let id = resolve_note_id(store.notes(), id_token)?;
    if let Some(note) = store.delete(id) {
        println!("removed {} \"{}\"", short_id(&note.id), note.title);
    }
    Ok(())
}

fn print_note(note: &Note) {
    let marker = if note.completed { "x" } else { " " };
    println!(
        "[{marker}] {}  {}  [{}]  {}",
        short_id(&note.id),
        note.title,
        note.category,
        format_timestamp(note.created_at)
    );
    for line in note.content.lines() {
        println!("    {line}");
    }
}

/// Renders the filter-bar header. Column order follows `Category::ALL`.
fn counts_line(counts: CategoryCounts) -> String {
    let mut line = format!("All ({})", counts.get(CategoryFilter::All));
    for category in Category::ALL {
        line.push_str(&format!(
            "  {} ({})",
            category.label(),
            counts.get(CategoryFilter::Only(category))
        ));
    }
    line
}

/// Picks the empty-result message from the query alone. Any active
/// search or category pick gets the "not found" copy, even over an
/// empty collection; only the default query gets the first-run copy.
fn empty_state_line(query: &ViewQuery) -> &'static str {
    if query.is_unfiltered() {
        "No notes yet. Add your first note with `keepnote add <title>`."
    } else {
        "No notes found. Try a different search or filter."
    }
}

fn parse_category(token: &str) -> Result<Category, String> {
    let normalized = token.trim().to_ascii_lowercase();
    Category::parse(&normalized)
        .ok_or_else(|| format!("unknown category `{token}`; expected personal|work|urgent"))
}

fn parse_category_filter(token: &str) -> Result<CategoryFilter, String> {
    let normalized = token.trim().to_ascii_lowercase();
    CategoryFilter::parse(&normalized).ok_or_else(|| {
        format!("unknown category filter `{token}`; expected all|personal|work|urgent")
    })
}

/// Resolves a full note id or a unique prefix of its hex form against
/// the current collection.
fn resolve_note_id(notes: &[Note], token: &str) -> Result<NoteId, String> {
    let trimmed = token.trim();
    if let Ok(id) = Uuid::parse_str(trimmed) {
        if notes.iter().any(|note| note.id == id) {
            return Ok(id);
        }
        return Err(format!("no note with id `{trimmed}`"));
    }

    let needle = trimmed.replace('-', "").to_ascii_lowercase();
    if needle.is_empty() || !needle.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(format!("`{trimmed}` is not a note id or id prefix"));
    }

    let matches: Vec<NoteId> = notes
        .iter()
        .filter(|note| note.id.simple().to_string().starts_with(&needle))
        .map(|note| note.id)
        .collect();

    match matches.as_slice() {
        [only] => Ok(*only),
        [] => Err(format!("no note with id `{trimmed}`")),
        _ => Err(format!(
            "id prefix `{trimmed}` matches {} notes; use more characters",
            matches.len()
        )),
    }
}

fn short_id(id: &NoteId) -> String {
    id.simple().to_string()[..8].to_string()
}

fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%b %-d, %I:%M %p")
        .to_string()
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = if let Some(dir) = flag {
        dir
    } else if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        PathBuf::from(dir)
    } else {
        let home = env::var_os("HOME").ok_or_else(|| {
            format!("cannot determine home directory; pass --data-dir or set {DATA_DIR_ENV}")
        })?;
        PathBuf::from(home).join(DEFAULT_DATA_DIR_NAME)
    };

    if dir.is_absolute() {
        return Ok(dir);
    }
    // File logging requires an absolute path; anchor relative inputs to
    // the current directory.
    let cwd =
        env::current_dir().map_err(|err| format!("cannot resolve current directory: {err}"))?;
    Ok(cwd.join(dir))
}

fn init_file_logging(data_dir: &Path, level: Option<&str>) {
    // Logging init failure is non-fatal; the command still runs.
    let logs_dir = data_dir.join(LOG_DIR_NAME);
    let Some(logs_dir_str) = logs_dir.to_str() else {
        eprintln!("warning: file logging disabled: log directory path is not valid UTF-8");
        return;
    };
    let level = level.unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, logs_dir_str) {
        eprintln!("warning: file logging disabled: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{counts_line, empty_state_line, init_file_logging, resolve_note_id, LOG_DIR_NAME};
    use keepnote_core::{
        category_counts, default_log_level, logging_status, Category, CategoryFilter, Note,
        ViewQuery,
    };
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    #[test]
    fn full_id_resolves_only_when_present() {
        let notes = vec![
            note_with_id("11111111-2222-4333-8444-555555555555", "First"),
            note_with_id("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee", "Second"),
        ];

        let id = resolve_note_id(&notes, "11111111-2222-4333-8444-555555555555").unwrap();
        assert_eq!(id, notes[0].id);

        let absent =
            resolve_note_id(&notes, "99999999-2222-4333-8444-555555555555").unwrap_err();
        assert!(absent.contains("no note with id"));
    }

    #[test]
    fn unique_prefix_resolves_to_its_note() {
        let notes = vec![
            note_with_id("11111111-2222-4333-8444-555555555555", "First"),
            note_with_id("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee", "Second"),
        ];

        assert_eq!(resolve_note_id(&notes, "aaaa").unwrap(), notes[1].id);
        // Hyphens and case in the token are ignored.
        assert_eq!(resolve_note_id(&notes, "1111-1111").unwrap(), notes[0].id);
        assert_eq!(resolve_note_id(&notes, "AAAA").unwrap(), notes[1].id);
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let notes = vec![
            note_with_id("abc11111-2222-4333-8444-555555555555", "First"),
            note_with_id("abc22222-bbbb-4ccc-8ddd-eeeeeeeeeeee", "Second"),
        ];

        let error = resolve_note_id(&notes, "abc").unwrap_err();
        assert!(error.contains("matches 2 notes"));
    }

    #[test]
    fn unmatched_prefix_and_junk_tokens_fail_readably() {
        let notes = vec![note_with_id("11111111-2222-4333-8444-555555555555", "Only")];

        let unmatched = resolve_note_id(&notes, "ff").unwrap_err();
        assert!(unmatched.contains("no note with id"));

        let junk = resolve_note_id(&notes, "zz").unwrap_err();
        assert!(junk.contains("not a note id"));

        let blank = resolve_note_id(&notes, "  ").unwrap_err();
        assert!(blank.contains("not a note id"));
    }

    #[test]
    fn counts_line_reports_every_category_in_display_order() {
        let notes = vec![
            Note::new("One", "", Category::Personal).unwrap(),
            Note::new("Two", "", Category::Work).unwrap(),
            Note::new("Three", "", Category::Work).unwrap(),
            Note::new("Four", "", Category::Urgent).unwrap(),
        ];

        assert_eq!(
            counts_line(category_counts(&notes)),
            "All (4)  Personal (1)  Work (2)  Urgent (1)"
        );
        assert_eq!(
            counts_line(category_counts(&[])),
            "All (0)  Personal (0)  Work (0)  Urgent (0)"
        );
    }

    #[test]
    fn empty_state_copy_follows_the_active_filter() {
        assert!(empty_state_line(&ViewQuery::default()).starts_with("No notes yet"));

        // A whitespace-only term is still an active search.
        let searched = ViewQuery {
            search_term: " ".to_string(),
            ..ViewQuery::default()
        };
        assert!(empty_state_line(&searched).starts_with("No notes found"));

        let narrowed = ViewQuery {
            category: CategoryFilter::Only(Category::Urgent),
            ..ViewQuery::default()
        };
        assert!(empty_state_line(&narrowed).starts_with("No notes found"));
    }

    #[test]
    fn file_logging_defaults_the_level_and_survives_conflicts() {
        let data_dir = unique_temp_dir("primary");
        init_file_logging(&data_dir, None);

        let (level, log_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, default_log_level());
        assert_eq!(log_dir, data_dir.join(LOG_DIR_NAME));

        // A conflicting re-init warns on stderr; the command keeps going.
        init_file_logging(&unique_temp_dir("conflict"), Some("warn"));
        let (_, active_dir) = logging_status().expect("logging should stay active");
        assert_eq!(active_dir, data_dir.join(LOG_DIR_NAME));
    }

    fn note_with_id(id: &str, title: &str) -> Note {
        let mut note = Note::new(title, "", Category::Personal).unwrap();
        note.id = Uuid::parse_str(id).unwrap();
        note
    }

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "keepnote-cli-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }
}
