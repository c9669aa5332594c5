//! `bim` entrypoint (spec §6): argument parsing, startup logging, terminal
//! lifecycle, and the single-threaded blocking main loop that wires
//! `core-input` -> `core-keymap` -> `core-actions` -> `core-render`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use core_actions::{dispatch, EditorContext, Prompt};
use core_keymap::{Action, Keymap, Resolution};
use core_model::Model;
use core_render::{CommandLine, FrameContext, RenderEngine, Writer};
use core_state::{Buffer, Yank};
use core_terminal::{CrosstermBackend, SignalEvent, SignalWatcher, TerminalBackend, TerminalCapabilities};
use core_text::Line;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "bim", version, about = "A small modal text editor", disable_help_flag = true)]
struct Args {
    /// File to open, optionally suffixed with `:LINE`. `-` reads stdin.
    file: Option<String>,

    #[arg(short = 'R')]
    readonly: bool,

    /// Path to the rc file (default `~/.bimrc`).
    #[arg(short = 'u', value_name = "PATH")]
    rc_path: Option<PathBuf>,

    /// Dump FILE to stdout with line numbers and exit.
    #[arg(short = 'c', value_name = "FILE")]
    dump_numbered: Option<PathBuf>,

    /// Dump FILE to stdout without line numbers and exit.
    #[arg(short = 'C', value_name = "FILE")]
    dump_plain: Option<PathBuf>,

    /// Toggle a terminal capability off (or `history` back on).
    #[arg(short = 'O', value_name = "NAME")]
    capability: Vec<String>,

    #[arg(long = "help", short = '?')]
    help: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.help {
        Args::command().print_help()?;
        println!();
        return Ok(());
    }
    if let Some(path) = &args.dump_numbered {
        return dump_file(path, true);
    }
    if let Some(path) = &args.dump_plain {
        return dump_file(path, false);
    }

    let _log_guard = configure_logging();
    install_panic_hook();

    let (requested_path, requested_line) = parse_file_arg(args.file.as_deref());
    let read_stdin = requested_path.as_deref() == Some("-");

    let config = load_config(args.rc_path.as_deref());

    let mut buffer = load_initial_buffer(requested_path.as_deref().filter(|p| *p != "-"), read_stdin, &config)?;
    if args.readonly {
        buffer.readonly = true;
    }
    if let Some(line) = requested_line {
        buffer.line_no = line.clamp(1, buffer.line_count());
    }
    if let Some(path) = buffer.file_name.clone() {
        core_model::annotate_from_head(&mut buffer, Path::new(&path));
    }

    let mut model = Model::new();
    *model.registry.active_mut() = buffer;
    let mut ctx = EditorContext::new(model).with_config(config);

    let mut caps = TerminalCapabilities::detect();
    apply_capability_overrides(&mut caps, &args.capability);

    let mut backend = CrosstermBackend::new();
    backend.set_title("bim")?;
    let _guard = backend.enter_guard()?;

    run_event_loop(&mut ctx, caps)
}

fn dump_file(path: &Path, numbered: bool) -> Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    for (i, line) in text.lines().enumerate() {
        if numbered {
            println!("{:>4}  {line}", i + 1);
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn parse_file_arg(arg: Option<&str>) -> (Option<String>, Option<usize>) {
    let Some(arg) = arg else { return (None, None) };
    if arg == "-" {
        return (Some(arg.to_string()), None);
    }
    match arg.rsplit_once(':') {
        Some((path, line)) if !path.is_empty() => match line.parse::<usize>() {
            Ok(n) => (Some(path.to_string()), Some(n)),
            Err(_) => (Some(arg.to_string()), None),
        },
        _ => (Some(arg.to_string()), None),
    }
}

fn load_config(rc_override: Option<&Path>) -> core_config::Config {
    let Some(home) = dirs::home_dir() else {
        return core_config::Config::default();
    };
    let rc_path = rc_override.map(Path::to_path_buf).unwrap_or_else(|| home.join(".bimrc"));
    core_config::Config::load_from(&rc_path, &home.join(".biminfo"))
}

fn load_initial_buffer(path: Option<&str>, read_stdin: bool, config: &core_config::Config) -> Result<Buffer> {
    if let Some(path) = path {
        return match core_actions::io_ops::open_file_restoring_cursor(path, config) {
            Ok(buffer) => Ok(buffer),
            Err(_) => Ok(Buffer::with_file_name(path)),
        };
    }
    if read_stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let mut buffer = Buffer::new();
        let lines: Vec<Line> = if text.is_empty() {
            vec![Line::new()]
        } else {
            text.lines().map(Line::from_str).collect()
        };
        buffer.lines = core_text::LineStore::from_lines(lines);
        return Ok(buffer);
    }
    Ok(Buffer::new())
}

fn apply_capability_overrides(caps: &mut TerminalCapabilities, overrides: &[String]) {
    for name in overrides {
        match name.as_str() {
            "noaltscreen" => caps.altscreen = false,
            "noscroll" => caps.scroll_region = false,
            "nomouse" => caps.mouse = false,
            "nounicode" => caps.unicode = false,
            "nobright" => caps.bright = false,
            "nohideshow" => caps.hideshow = false,
            "nosyntax" => caps.syntax = false,
            "nohistory" => caps.history = false,
            "notitle" => caps.title = false,
            "nobce" => caps.bce = false,
            "history" => caps.history = true,
            other => tracing::warn!(capability = other, "unrecognized -O capability name"),
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let appender = tracing_appender::rolling::never(log_dir, "bim.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "panic", %info, "editor panicked");
            default_hook(info);
        }));
    });
}

/// Translate a decoded navigation event into the symbolic `Action` the
/// dispatcher understands. Events this editor has no binding for yet
/// (word-move, split-resize, cross-split focus, paging, mouse) are
/// silently dropped rather than guessed at.
fn nav_to_action(nav: core_input::NavEvent) -> Option<Action> {
    use core_input::{Direction as InputDir, NavEvent};
    use core_keymap::Direction as ActionDir;
    match nav {
        NavEvent::Move(InputDir::Up) => Some(Action::Motion(ActionDir::Up)),
        NavEvent::Move(InputDir::Down) => Some(Action::Motion(ActionDir::Down)),
        NavEvent::Move(InputDir::Left) => Some(Action::Motion(ActionDir::Left)),
        NavEvent::Move(InputDir::Right) => Some(Action::Motion(ActionDir::Right)),
        NavEvent::Home => Some(Action::LineStart),
        NavEvent::End => Some(Action::LineEnd),
        _ => None,
    }
}

/// Feed `pending` through the keymap for the active buffer's mode until
/// it either needs another byte or is fully consumed. Returns whether
/// any action was dispatched.
fn drain_pending(keymap: &Keymap, ctx: &mut EditorContext, pending: &mut Vec<char>) -> bool {
    let mut acted = false;
    while !pending.is_empty() {
        let mode = ctx.model.registry.active().mode;
        match keymap.resolve(mode, pending) {
            Resolution::Matched { consumed, action, .. } => {
                pending.drain(0..consumed);
                dispatch(action, ctx);
                acted = true;
            }
            Resolution::NeedMore => break,
            Resolution::FallbackLiteral(c) => {
                pending.remove(0);
                dispatch(Action::Literal(c), ctx);
                acted = true;
            }
        }
    }
    acted
}

fn run_event_loop(ctx: &mut EditorContext, caps: TerminalCapabilities) -> Result<()> {
    use core_input::{InputDecoder, InputEvent};

    let keymap = Keymap::new();
    let engine = RenderEngine::new(caps);
    let mut decoder = InputDecoder::new(0);
    let mut signals = SignalWatcher::new()?;
    let mut pending: Vec<char> = Vec::new();
    let mut stdout = std::io::stdout();

    let (mut term_width, mut term_height) = crossterm::terminal::size().unwrap_or((80, 24));
    full_render(&engine, ctx, term_width, term_height, &mut stdout)?;

    loop {
        for event in signals.poll() {
            if event == SignalEvent::WindowResized {
                if let Ok((w, h)) = crossterm::terminal::size() {
                    term_width = w;
                    term_height = h;
                }
            }
            full_render(&engine, ctx, term_width, term_height, &mut stdout)?;
        }

        let insert_like = ctx.model.registry.active().mode.is_insert_like();
        let timeout = if insert_like {
            core_input::decoder::INSERT_TIMEOUT_MS
        } else {
            core_input::decoder::DEFAULT_TIMEOUT_MS
        };
        let Some(event) = decoder.next_event_with_timeout(timeout)? else {
            continue;
        };

        let prompt_open = !matches!(ctx.prompt, Prompt::None);
        let old_line = ctx.model.registry.active().line_no - 1;

        let acted = match event {
            InputEvent::Char(c) if prompt_open => {
                dispatch(Action::Literal(c), ctx);
                true
            }
            InputEvent::Esc if prompt_open => {
                dispatch(Action::Escape, ctx);
                true
            }
            InputEvent::Char(c) => {
                pending.push(c);
                drain_pending(&keymap, ctx, &mut pending)
            }
            InputEvent::Esc => {
                let had_pending = !pending.is_empty();
                pending.clear();
                dispatch(Action::Escape, ctx);
                had_pending || true
            }
            InputEvent::Nav(nav) if !prompt_open => nav_to_action(nav).map(|a| dispatch(a, ctx)).is_some(),
            InputEvent::Nav(_) | InputEvent::Mouse(_) => false,
        };

        if ctx.quit {
            break;
        }
        if !acted {
            continue;
        }

        let new_line = ctx.model.registry.active().line_no - 1;
        if new_line == old_line {
            let mut writer = Writer::new();
            let frame = frame_context(ctx);
            if engine.render_cursor_move(&mut writer, &ctx.model, term_width, term_height, old_line, new_line, &frame) {
                writer.flush(&mut stdout)?;
                continue;
            }
        }
        full_render(&engine, ctx, term_width, term_height, &mut stdout)?;
    }

    Ok(())
}

fn frame_context(ctx: &EditorContext) -> FrameContext<'_> {
    let command_line = match &ctx.prompt {
        Prompt::None => match &ctx.status_message {
            Some(msg) => CommandLine::Message(msg),
            None => CommandLine::Mode(ctx.model.registry.active().mode),
        },
        Prompt::Command(s) => CommandLine::Prompt(s),
        Prompt::SearchForward(s) | Prompt::SearchBackward(s) => CommandLine::Prompt(s),
    };
    let yank_lines = match ctx.model.registers.get() {
        Some(Yank::Lines(lines)) | Some(Yank::Range(lines)) => lines.len(),
        None => 0,
    };
    FrameContext { command_line, yank_lines }
}

fn full_render(
    engine: &RenderEngine,
    ctx: &EditorContext,
    term_width: u16,
    term_height: u16,
    stdout: &mut impl std::io::Write,
) -> Result<()> {
    let mut writer = Writer::new();
    engine.render_full(&mut writer, &ctx.model, term_width, term_height, &frame_context(ctx));
    writer.flush(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_file_arg_splits_trailing_line_number() {
        assert_eq!(parse_file_arg(Some("foo.rs:42")), (Some("foo.rs".into()), Some(42)));
    }

    #[test]
    fn parse_file_arg_without_line_number() {
        assert_eq!(parse_file_arg(Some("foo.rs")), (Some("foo.rs".into()), None));
    }

    #[test]
    fn parse_file_arg_rejects_non_numeric_suffix_as_part_of_path() {
        assert_eq!(parse_file_arg(Some("foo:bar.rs")), (Some("foo:bar.rs".into()), None));
    }

    #[test]
    fn parse_file_arg_passes_through_stdin_marker() {
        assert_eq!(parse_file_arg(Some("-")), (Some("-".into()), None));
    }

    #[test]
    fn parse_file_arg_none_for_no_argument() {
        assert_eq!(parse_file_arg(None), (None, None));
    }

    #[test]
    fn capability_overrides_disable_named_flags() {
        let mut caps = TerminalCapabilities::default();
        apply_capability_overrides(&mut caps, &["nomouse".to_string(), "nounicode".to_string()]);
        assert!(!caps.mouse);
        assert!(!caps.unicode);
        assert!(caps.altscreen);
    }

    #[test]
    fn capability_override_can_force_history_back_on() {
        let mut caps = TerminalCapabilities::default();
        caps.history = false;
        apply_capability_overrides(&mut caps, &["history".to_string()]);
        assert!(caps.history);
    }

    #[test]
    fn unrecognized_capability_name_is_ignored() {
        let mut caps = TerminalCapabilities::default();
        apply_capability_overrides(&mut caps, &["bogus".to_string()]);
        assert_eq!(caps, TerminalCapabilities::default());
    }
}
