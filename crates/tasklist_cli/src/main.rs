//! Terminal host for the task list widget.
//!
//! # Responsibility
//! - Translate one stdin line into one `Command` and dispatch it.
//! - Draw what the core projector sends to the `ViewSink`.
//!
//! Row numbers typed by the user are 1-based positions in the current
//! frame; they are mapped to task ids before dispatch.

use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{
    default_log_level, init_logging, Command, DispatchOutcome, FilterMode, HydrationOutcome,
    SnapshotStore, SqliteSnapshotStore, TaskListService, Theme, ViewRow, ViewSink, WidgetConfig,
    DEFAULT_NAMESPACE,
};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Task list with filters, reordering and persistence")]
struct Args {
    /// SQLite file holding the snapshot; in-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Storage key for the snapshot.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    /// Initial filter: all, active or completed.
    #[arg(long, default_value = "all")]
    filter: String,
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,
}

/// Writes frames to stdout.
struct TerminalSink<W: Write> {
    out: W,
    rows: Vec<ViewRow>,
    filter: FilterMode,
    items_left: String,
    theme: Theme,
}

impl<W: Write> TerminalSink<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
            filter: FilterMode::All,
            items_left: String::new(),
            theme: Theme::Light,
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        writeln!(self.out, "-- {} ({:?}) --", self.filter, self.theme)?;
        for (position, row) in self.rows.iter().enumerate() {
            let mark = if row.checkbox_checked() { "x" } else { " " };
            let text = if row.struck_through() {
                format!("~~{}~~", row.description)
            } else {
                row.description.clone()
            };
            writeln!(self.out, "{:>3}. [{mark}] {text}", position + 1)?;
        }
        writeln!(self.out, "{}", self.items_left)?;
        self.out.flush()
    }
}

impl<W: Write> ViewSink for TerminalSink<W> {
    fn render_rows(&mut self, filter: FilterMode, rows: &[ViewRow]) {
        self.filter = filter;
        self.rows = rows.to_vec();
    }

    fn update_row(&mut self, row: &ViewRow) {
        if let Some(slot) = self.rows.iter_mut().find(|existing| existing.id == row.id) {
            *slot = row.clone();
        }
    }

    fn set_items_left(&mut self, label: &str) {
        self.items_left = label.to_string();
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Filter(FilterMode),
    Drag(usize),
    Drop(usize),
    Move(usize, usize),
    Clear,
    Theme,
    Show,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let row = |value: &str| -> Result<usize, String> {
        match value.parse::<usize>() {
            Ok(number) if number > 0 => Ok(number),
            _ => Err(format!("expected a row number, got `{value}`")),
        }
    };

    match verb {
        "add" => Ok(Input::Add(rest.to_string())),
        "toggle" => Ok(Input::Toggle(row(rest)?)),
        "delete" => Ok(Input::Delete(row(rest)?)),
        "filter" => Ok(Input::Filter(FilterMode::parse(rest))),
        "drag" => Ok(Input::Drag(row(rest)?)),
        "drop" => Ok(Input::Drop(row(rest)?)),
        "move" => {
            let (from, to) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: move <row> <before-row>".to_string())?;
            Ok(Input::Move(row(from.trim())?, row(to.trim())?))
        }
        "clear" => Ok(Input::Clear),
        "theme" => Ok(Input::Theme),
        "show" | "" => Ok(Input::Show),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command `{other}`")),
    }
}

fn run<S: SnapshotStore, W: Write>(
    service: &mut TaskListService<S, TerminalSink<W>>,
    input: impl BufRead,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let parsed = match parse_input(&line) {
            Ok(parsed) => parsed,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        // Unknown row numbers resolve to no id and are skipped like stale clicks.
        let frame = service.frame();
        let id_at = |row: usize| frame.row_at(row - 1).map(|row| row.id);
        let command = match parsed {
            Input::Quit => break,
            Input::Show => None,
            Input::Add(text) => Some(Command::Add(text)),
            Input::Toggle(row) => id_at(row).map(Command::Toggle),
            Input::Delete(row) => id_at(row).map(Command::Delete),
            Input::Filter(mode) => Some(Command::SetFilter(mode)),
            Input::Drag(row) => id_at(row).map(Command::DragStart),
            Input::Drop(row) => id_at(row).map(Command::Drop),
            Input::Move(from, to) => id_at(from)
                .zip(id_at(to))
                .map(|(from, to)| Command::Reorder { from, to }),
            Input::Clear => Some(Command::ClearCompleted),
            Input::Theme => Some(Command::ToggleTheme),
        };

        if let Some(command) = command {
            match service.dispatch(command) {
                DispatchOutcome::AppliedUnsaved(err) => eprintln!("not saved: {err}"),
                DispatchOutcome::Ignored(err) => warn!("event=cli_input status=ignored error={err}"),
                DispatchOutcome::Applied | DispatchOutcome::Unchanged => {}
            }
        }
        service.sink_mut().draw()?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = match WidgetConfig::from_parts(&args.namespace, &args.filter) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let conn = match args.db.as_ref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open storage: {err}");
            std::process::exit(1);
        }
    };

    let store = SqliteSnapshotStore::new(&conn, config.namespace.clone());
    let mut service = TaskListService::new(store, TerminalSink::new(io::stdout()), config);
    match service.start() {
        HydrationOutcome::Discarded(err) => eprintln!("saved list unreadable, starting empty: {err}"),
        HydrationOutcome::Restored(count) => info!("event=cli_start status=ok restored={count}"),
        HydrationOutcome::Empty => {}
    }
    let stdin = io::stdin();
    let session = service
        .sink_mut()
        .draw()
        .and_then(|()| run(&mut service, stdin.lock()));
    if let Err(err) = session {
        eprintln!("terminal io error: {err}");
        std::process::exit(1);
    }
}
