//! modstack - Main entry point.
//!
//! CLI driver for the install dashboard core.
//!
//! Usage: modstack [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list                     List catalog entries
//!   show <models|loras> <name>  Show one entry with validation detail
//!   install [names...]       Submit an installation for the named entries
//!   jobs                     Print current jobs and history once
//!   watch                    Follow running jobs (5s poll)
//!   pairing [show|save]      Show or save the default pairing
//!
//! Options:
//!   --version, -v            Show version
//!   --config <path>          Use an alternate config file

use std::env;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use modstack::install::InstallBoard;
use modstack::manifest::{format_size, AssetKind};
use modstack::{App, Config};

/// Version string from Cargo.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cadence of the driving loop; the 5 s poll period is enforced by the core.
const TICK_MS: u64 = 500;

/// Safety bound for watch loops.
const MAX_WATCH_ITERATIONS: usize = 1_000_000;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("modstack v{}", VERSION);
        return;
    }

    // Optional --config <path> before the command.
    let mut config_path: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config requires a path");
                    process::exit(2);
                }
            }
        } else {
            rest.push(arg);
        }
    }

    let config = match config_path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = modstack::logging::init(&config.log_config) {
        eprintln!("Warning: logging unavailable: {}", err);
    }

    let mut app = App::new(&config);
    let pretty = atty::is(atty::Stream::Stdout);

    let code = match rest.first().map(String::as_str) {
        Some("list") => cmd_list(&mut app, &rest[1..], pretty),
        Some("show") => cmd_show(&mut app, &rest[1..]),
        Some("install") => cmd_install(&mut app, &rest[1..], pretty),
        Some("jobs") => cmd_jobs(&mut app, pretty),
        Some("watch") => cmd_watch(&mut app, pretty),
        Some("pairing") => cmd_pairing(&mut app, &rest[1..]),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            2
        }
        None => {
            print_usage();
            2
        }
    };

    process::exit(code);
}

fn print_usage() {
    eprintln!(
        "Usage: modstack [--config <path>] <command>\n\n\
         Commands:\n  \
         list [--search <text>] [--tag <tag>]... [--models|--loras]\n  \
         show <models|loras> <name>\n  \
         install [--models <name>...] [--loras <name>...] [--wait]\n  \
         jobs\n  \
         watch\n  \
         pairing [show | save --model <name> [--loras <name>...]]"
    );
}

/// Lists catalog entries passing the requested filters.
fn cmd_list(app: &mut App, args: &[String], pretty: bool) -> i32 {
    if app.load_manifests().is_err() {
        report_panel_error(app.manifest_view().error());
        return 1;
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--search" => {
                if let Some(text) = iter.next() {
                    app.on_search_changed(text);
                }
            }
            "--tag" => {
                if let Some(tag) = iter.next() {
                    app.on_tag_toggled(tag);
                }
            }
            "--models" => app.on_kind_filter(AssetKind::AddOn, false),
            "--loras" => app.on_kind_filter(AssetKind::Model, false),
            other => {
                eprintln!("Unknown list option: {}", other);
                return 2;
            }
        }
    }

    for error in app.catalog().errors() {
        eprintln!("manifest warning: {}", error);
    }

    let visible = app.visible_items();
    if visible.is_empty() {
        println!("No manifest entries match the current filters.");
        return 0;
    }

    if pretty {
        println!("{:<6} {:<28} {:<10} {:>10}  {}", "TYPE", "NAME", "VERSION", "SIZE", "TAGS");
    }
    for item in visible {
        let size = item.size_bytes.map(format_size).unwrap_or_default();
        println!(
            "{:<6} {:<28} {:<10} {:>10}  {}",
            item.kind.label(),
            item.name,
            item.version,
            size,
            item.tags.join(",")
        );
    }

    if pretty {
        let tags = app.available_tags();
        if !tags.is_empty() {
            println!("\nTags: {}", tags.join(", "));
        }
        println!("{}", app.status());
    }
    0
}

/// Shows one catalog entry with its validation detail.
fn cmd_show(app: &mut App, args: &[String]) -> i32 {
    let (Some(kind), Some(key)) = (args.first(), args.get(1)) else {
        eprintln!("Usage: modstack show <models|loras> <name>");
        return 2;
    };
    let Some(kind) = AssetKind::parse(kind) else {
        eprintln!("Unknown asset kind: {}", kind);
        return 2;
    };

    // Catalog load is best-effort here; it only improves slug resolution.
    let _ = app.load_manifests();

    if let Err(err) = app.load_detail(kind, key) {
        eprintln!("{}", err);
        return 1;
    }

    if let Some(detail) = app.detail() {
        let item = &detail.item;
        println!("{} ({})", item.name, detail.kind);
        println!("  version:  {}", item.version);
        println!("  license:  {}", item.license);
        if let Some(bytes) = item.size_bytes {
            println!("  size:     {}", format_size(bytes));
        }
        if !item.checksum.is_empty() {
            println!("  checksum: {}", item.checksum);
        }
        println!("  health:   {}", item.health.label());
        if !item.tags.is_empty() {
            println!("  tags:     {}", item.tags.join(", "));
        }
        if !item.notes.is_empty() {
            println!("  notes:    {}", item.notes);
        }
        for error in &detail.errors {
            println!("  validation: {}", error);
        }
    }
    0
}

/// Selects the named entries and submits an installation.
fn cmd_install(app: &mut App, args: &[String], pretty: bool) -> i32 {
    let mut wait = false;
    let mut kind = AssetKind::Model;
    for arg in args {
        match arg.as_str() {
            "--models" => kind = AssetKind::Model,
            "--loras" => kind = AssetKind::AddOn,
            "--wait" => wait = true,
            name => {
                app.on_toggle_selection(kind, name);
            }
        }
    }

    let ids = match app.on_submit_install() {
        Ok(ids) => ids,
        Err(_) => {
            eprintln!("{}", app.status());
            return 1;
        }
    };
    println!("{}", app.status());

    if !wait {
        return 0;
    }

    // Follow our jobs until none of them is still running.
    let mut iterations = 0;
    loop {
        app.on_refresh_tick();
        thread::sleep(Duration::from_millis(TICK_MS));
        iterations += 1;

        let board = app.board();
        let still_running = board
            .running()
            .iter()
            .any(|job| ids.contains(&job.id));
        if (!still_running && app.installs().has_data() && !app.installs().is_fetching())
            || iterations >= MAX_WATCH_ITERATIONS
        {
            print_board(&board, pretty);
            break;
        }
    }
    0
}

/// Prints the current board once.
fn cmd_jobs(app: &mut App, pretty: bool) -> i32 {
    match app.installs_mut().refresh_blocking() {
        Ok(board) => {
            print_board(&board, pretty);
            0
        }
        Err(err) => {
            eprintln!("Failed to load installers: {}", err);
            1
        }
    }
}

/// Follows running jobs on the fixed poll period.
fn cmd_watch(app: &mut App, pretty: bool) -> i32 {
    if app.installs_mut().refresh_blocking().is_err() {
        eprintln!("Failed to load installers: {}", app.installs().last_error().unwrap_or_default());
        return 1;
    }

    let mut last_shape = (usize::MAX, usize::MAX);
    let mut iterations = 0;
    while iterations < MAX_WATCH_ITERATIONS {
        app.on_refresh_tick();

        let board = app.board();
        let shape = (board.running().len(), board.history.len());
        if shape != last_shape {
            print_board(&board, pretty);
            last_shape = shape;
        }

        thread::sleep(Duration::from_millis(TICK_MS));
        iterations += 1;
    }
    0
}

/// Shows or saves the default pairing.
fn cmd_pairing(app: &mut App, args: &[String]) -> i32 {
    match args.first().map(String::as_str) {
        None | Some("show") => {
            if app.on_load_pairing().is_err() {
                report_panel_error(app.pairing_view().error());
                return 1;
            }
            print_pairing(app);
            0
        }
        Some("save") => {
            let mut kind = AssetKind::Model;
            for arg in &args[1..] {
                match arg.as_str() {
                    "--model" | "--models" => kind = AssetKind::Model,
                    "--loras" | "--lora" => kind = AssetKind::AddOn,
                    name => {
                        app.on_toggle_selection(kind, name);
                    }
                }
            }
            if app.on_save_pairing().is_err() {
                eprintln!("{}", app.status());
                return 1;
            }
            println!("{}", app.status());
            print_pairing(app);
            0
        }
        Some(other) => {
            eprintln!("Unknown pairing subcommand: {}", other);
            2
        }
    }
}

fn print_pairing(app: &App) {
    let Some(selection) = app.pairing_selection() else {
        println!("No pairing saved.");
        return;
    };
    let model = if selection.has_model() {
        selection.model.as_str()
    } else {
        "—"
    };
    let loras = if selection.loras.is_empty() {
        "—".to_string()
    } else {
        selection.loras.join(", ")
    };
    println!("Model: {}", model);
    println!("LoRAs: {}", loras);
}

fn print_board(board: &InstallBoard, pretty: bool) {
    let running = board.running();
    if pretty {
        println!("== Running ==");
    }
    if running.is_empty() {
        println!("No running installers.");
    }
    for job in running {
        println!(
            "[{}] {}  models={:?} loras={:?}",
            job.status.as_str(),
            job.id,
            job.models,
            job.loras
        );
        let tail = job.log_tail.trim();
        if !tail.is_empty() {
            for line in tail.lines() {
                println!("    {}", line);
            }
        }
    }

    if pretty {
        println!("== History ==");
    }
    if board.history.is_empty() {
        println!("No selections recorded yet.");
    }
    for (index, entry) in board.history.iter().enumerate() {
        println!(
            "{:>3}. {} [{}] models={:?} loras={:?}",
            index,
            entry.started_at,
            entry.status.as_str(),
            entry.models,
            entry.loras
        );
    }
}

fn report_panel_error(error: Option<&str>) {
    if let Some(message) = error {
        eprintln!("{}", message);
    } else {
        eprintln!("request failed");
    }
}
