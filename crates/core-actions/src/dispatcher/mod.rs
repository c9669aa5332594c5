//! Top-level action dispatch (spec §4.7/§4.8): routes a resolved
//! `Action` to the sub-dispatcher that owns its mode transition.

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod undo;

use core_config::Config;
use core_keymap::Action;
use core_model::Model;

pub use command::CommandError;
pub use command_parser::ParsedCommand;
pub use mode::ColInsertState;

/// Ephemeral, non-buffer input state: the `:`/`/`/`?` prompt line. None of
/// this belongs on `Buffer` or `Model`, which persist across keystrokes
/// whether or not a prompt happens to be open.
#[derive(Debug, Clone, Default)]
pub enum Prompt {
    #[default]
    None,
    Command(String),
    SearchForward(String),
    SearchBackward(String),
}

/// What a search is continuing from, so `n`/`N` can repeat the last
/// search without re-reading the prompt buffer.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub needle: Option<Vec<char>>,
    pub forward: bool,
}

pub struct EditorContext {
    pub model: Model,
    pub prompt: Prompt,
    pub search: SearchState,
    pub status_message: Option<String>,
    pub command_history: Vec<String>,
    pub col_insert: Option<ColInsertState>,
    pub quit: bool,
    pub config: Config,
}

impl EditorContext {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            prompt: Prompt::None,
            search: SearchState::default(),
            status_message: None,
            command_history: Vec::new(),
            col_insert: None,
            quit: false,
            config: Config::default(),
        }
    }

    /// Apply a loaded `~/.bimrc` (spec §6): the split ratio is the only
    /// rc setting `Model` itself has a field for, so it's pushed in here
    /// rather than read ad hoc by every command that opens a split.
    pub fn with_config(mut self, config: Config) -> Self {
        self.model.split_percent = config.rc.splitpercent;
        self.config = config;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub redraw: bool,
}

impl DispatchOutcome {
    pub fn dirty() -> Self {
        Self { redraw: true }
    }

    pub fn clean() -> Self {
        Self { redraw: false }
    }
}

/// Interpret one resolved `Action` against the editor's current state.
pub fn dispatch(action: Action, ctx: &mut EditorContext) -> DispatchOutcome {
    if !matches!(ctx.prompt, Prompt::None) {
        return command::handle_prompt_action(action, ctx);
    }
    match &action {
        Action::Motion(_)
        | Action::WordForward
        | Action::WordBackward
        | Action::LineStart
        | Action::LineEnd
        | Action::FirstLine
        | Action::LastLine
        | Action::GotoLine(_) => motion::handle_motion(action, ctx),

        Action::InsertBefore
        | Action::InsertAfter
        | Action::OpenLineBelow
        | Action::OpenLineAbove
        | Action::EnterReplace
        | Action::EnterSelection(_)
        | Action::Escape
        | Action::ColInsertBefore
        | Action::ColInsertAfter => mode::handle_mode_change(action, ctx),

        Action::Undo => undo::handle_undo(ctx),
        Action::Redo => undo::handle_redo(ctx),

        Action::CommandPrompt => {
            ctx.prompt = Prompt::Command(String::new());
            DispatchOutcome::dirty()
        }
        Action::SearchForward => {
            ctx.prompt = Prompt::SearchForward(String::new());
            DispatchOutcome::dirty()
        }
        Action::SearchBackward => {
            ctx.prompt = Prompt::SearchBackward(String::new());
            DispatchOutcome::dirty()
        }

        _ => edit::handle_edit(action, ctx),
    }
}
