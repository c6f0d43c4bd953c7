//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{ContentArrangement, Table};
use console::style;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Turn debug output on or off for the rest of the process.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a dim debug line to stderr, only in verbose mode.
pub fn debug(msg: &str) {
    if is_verbose() {
        eprintln!("{} {}", style("debug").dim(), style(msg).dim());
    }
}

/// One row of the `status` table.
pub struct StatusRow {
    pub label: &'static str,
    pub value: String,
}

/// Print a two-column table of project status fields.
pub fn print_status_table(rows: &[StatusRow]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    for row in rows {
        table.add_row(vec![row.label.to_string(), row.value.clone()]);
    }

    println!("{table}");
}
