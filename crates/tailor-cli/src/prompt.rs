//! Line prompts with a default answer.
//!
//! On a terminal (and with the `interactive` feature) prompts go through
//! `dialoguer`; otherwise a single line is read from stdin, so answers can be
//! piped in. End of input cancels the run, and so does Ctrl-C while a
//! prompt is waiting.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::error::{CliError, CliResult};

/// Set while a prompt waits for input.
static PROMPTING: AtomicBool = AtomicBool::new(false);

/// Exit status for an interrupt outside a prompt (128 + SIGINT).
const INTERRUPTED_EXIT: i32 = 130;

/// Ask for one value. An empty answer yields `default`.
pub fn ask(prompt: &str, default: &str) -> CliResult<String> {
    install_interrupt_handler();
    let _waiting = Waiting::begin();

    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        ask_interactive(prompt, default)
    } else {
        ask_plain(prompt, default)
    }
}

fn ask_plain(prompt: &str, default: &str) -> CliResult<String> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    ask_from(&mut stdin.lock(), &mut stderr, prompt, default)
}

#[cfg(feature = "interactive")]
fn ask_interactive(prompt: &str, default: &str) -> CliResult<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .allow_empty(true)
        .interact_text()
        .map(|answer| pick(&answer, default))
        .map_err(|e| cancelled_or_io(io::Error::from(e)))
}

#[cfg(not(feature = "interactive"))]
fn ask_interactive(prompt: &str, default: &str) -> CliResult<String> {
    ask_plain(prompt, default)
}

/// Prompt on `out`, read one line from `input`.
fn ask_from(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
    default: &str,
) -> CliResult<String> {
    write!(out, "{prompt} [{default}]: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(cancelled_or_io)?;
    if read == 0 {
        return Err(CliError::Cancelled);
    }
    Ok(pick(&line, default))
}

fn pick(answer: &str, default: &str) -> String {
    let answer = answer.trim();
    if answer.is_empty() {
        default.to_owned()
    } else {
        answer.to_owned()
    }
}

/// Marks a prompt as pending until dropped.
struct Waiting;

impl Waiting {
    fn begin() -> Self {
        PROMPTING.store(true, Ordering::SeqCst);
        Self
    }
}

impl Drop for Waiting {
    fn drop(&mut self) {
        PROMPTING.store(false, Ordering::SeqCst);
    }
}

fn install_interrupt_handler() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if let Err(e) = ctrlc::set_handler(on_interrupt) {
            warn!(error = %e, "Failed to install the interrupt handler");
        }
    });
}

/// Runs on the signal thread. An interrupted prompt ends the run as
/// cancelled; prompts all come before the first write to the tree.
fn on_interrupt() {
    if !PROMPTING.load(Ordering::SeqCst) {
        std::process::exit(INTERRUPTED_EXIT);
    }

    let _ = console::Term::stderr().show_cursor();
    let err = CliError::Cancelled;
    err.log();
    eprint!("{}", err.format_plain(false));
    std::process::exit(i32::from(err.exit_code()));
}

fn cancelled_or_io(err: io::Error) -> CliError {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => CliError::Cancelled,
        _ => err.into(),
    }
}
