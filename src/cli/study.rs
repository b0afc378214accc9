//! Interactive study loop
//!
//! Reads one command per line and drives a study controller. The terminal
//! presenter both draws frames and reads input, so confirmations and
//! commands come from the same stream.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::app::{describe_start_error, Presenter, StudyControls, StudySnapshot};
use crate::display::{format_study_view, STUDY_HELP};
use crate::error::FlashdeckResult;

/// A command typed during a study session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyCommand {
    Flip,
    Next,
    Previous,
    Shuffle,
    Restart,
    Add,
    Open(String),
    Delete,
    Save,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl StudyCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Self::Show,
            "f" | "flip" => Self::Flip,
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "s" | "shuffle" => Self::Shuffle,
            "r" | "restart" => Self::Restart,
            "a" | "add" => Self::Add,
            "o" | "open" if !rest.is_empty() => Self::Open(rest.to_string()),
            "d" | "delete" => Self::Delete,
            "w" | "write" | "save" => Self::Save,
            "?" | "h" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Line-oriented input for the study loop
pub trait CommandSource {
    /// Show `prompt` and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn next_command(&mut self) -> Option<StudyCommand> {
        self.read_line("> ").map(|line| StudyCommand::parse(&line))
    }
}

/// Presenter that writes frames to `output` and reads answers from `input`
pub struct TerminalPresenter<R: BufRead, W: Write> {
    input: R,
    output: W,
    assume_yes: bool,
    show_frames: bool,
}

impl TerminalPresenter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
            show_frames: true,
        }
    }

    /// Answer every confirmation with yes without asking
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Only print messages and questions, not study frames
    pub fn without_frames(mut self) -> Self {
        self.show_frames = false;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            log::debug!("Failed to write to terminal: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> CommandSource for TerminalPresenter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.emit(prompt);

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn render(&mut self, state: &StudySnapshot) {
        if self.show_frames {
            let frame = format_study_view(state);
            self.emit(&format!("\n{}", frame));
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match self.read_line(&format!("{} [y/N] ", question)) {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn notify(&mut self, message: &str) {
        self.emit(&format!("{}\n", message));
    }
}

/// Read a definition: lines up to the first empty one
fn read_definition<S: CommandSource>(source: &mut S) -> String {
    let mut lines = Vec::new();
    let mut prompt = "Definition (end with an empty line): ";

    while let Some(line) = source.read_line(prompt) {
        if line.is_empty() {
            break;
        }
        lines.push(line);
        prompt = "... ";
    }

    lines.join("\n")
}

fn add_interactively<A>(app: &mut A)
where
    A: StudyControls,
    A::Presenter: CommandSource,
{
    let Some(term) = app.presenter_mut().read_line("Term: ") else {
        return;
    };
    let definition = read_definition(app.presenter_mut());

    match app.add_card(&term, &definition) {
        Ok(()) => app
            .presenter_mut()
            .notify(&format!("Added '{}'", term.trim())),
        Err(e) => app.presenter_mut().notify(&format!("Error: {}", e)),
    }
}

/// Run commands until the user quits or input ends
pub fn run_study_loop<A>(app: &mut A) -> FlashdeckResult<()>
where
    A: StudyControls,
    A::Presenter: CommandSource,
{
    app.presenter_mut().notify(STUDY_HELP);

    loop {
        let Some(command) = app.presenter_mut().next_command() else {
            if !app.request_exit() {
                app.presenter_mut()
                    .notify("Input closed; unsaved changes were not written.");
            }
            break;
        };

        match command {
            StudyCommand::Flip => app.flip(),
            StudyCommand::Next => app.next(),
            StudyCommand::Previous => app.previous(),
            StudyCommand::Shuffle => app.shuffle(),
            StudyCommand::Restart => {
                if let Err(e) = app.restart() {
                    app.presenter_mut().notify(&describe_start_error(&e));
                }
            }
            StudyCommand::Add => add_interactively(app),
            StudyCommand::Open(identifier) => {
                if let Err(e) = app.open_source(&identifier) {
                    app.presenter_mut().notify(&format!("Error: {}", e));
                }
            }
            StudyCommand::Delete => {
                if let Err(e) = app.delete_source() {
                    app.presenter_mut().notify(&format!("Error: {}", e));
                }
            }
            StudyCommand::Save => {
                if let Err(e) = app.save() {
                    app.presenter_mut().notify(&format!("Save failed: {}", e));
                }
            }
            StudyCommand::Show => app.render(),
            StudyCommand::Help => app.presenter_mut().notify(STUDY_HELP),
            StudyCommand::Quit => {
                if app.request_exit() {
                    break;
                }
            }
            StudyCommand::Unknown(text) => app
                .presenter_mut()
                .notify(&format!("Unknown command '{}'. Type ? for help.", text)),
        }
    }

    Ok(())
}
