use anyhow::{Context, Result};
use codechat_config::Config;
use codechat_engine::{
    Block as ModelBlock, BlockModel, CommentSyntaxRegistry, EditableView, FsProject, SourceFile,
    SourceLoader, parse_source, reconstruct,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::{RelativePath, RelativePathBuf};
use std::{
    env,
    io::{Stdout, Write, stdout},
    path::PathBuf,
    process,
    sync::Arc,
};

mod languages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tui,
    Check,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: Mode,
    path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut mode = Mode::Tui;
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--check" if mode == Mode::Tui => mode = Mode::Check,
            "--json" if mode == Mode::Tui => mode = Mode::Json,
            "--check" | "--json" => return Err("--check and --json are exclusive".to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ if path.is_some() => return Err("only one path may be given".to_string()),
            p => path = Some(PathBuf::from(p)),
        }
    }
    Ok(Args { mode, path })
}

/// What the command operates on: a project root and the files under it.
struct Target {
    project: FsProject,
    files: Vec<SourceFile>,
    is_dir: bool,
}

impl Target {
    fn open(path: PathBuf, registry: Arc<CommentSyntaxRegistry>) -> Result<Self> {
        if path.is_dir() {
            let project = FsProject::open(path, registry)?;
            let files = project.source_files()?;
            return Ok(Self {
                project,
                files,
                is_dir: true,
            });
        }

        let file_name = path
            .file_name()
            .with_context(|| format!("'{}' is not a file or directory", path.display()))?;
        let relative = RelativePathBuf::from_path(file_name)?;
        let root = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let project = FsProject::open(root, registry)?;
        let file = SourceFile::new(relative, project.registry());
        Ok(Self {
            project,
            files: vec![file],
            is_dir: false,
        })
    }

    fn parse(&self, path: &RelativePath) -> Result<BlockModel> {
        let loaded = self.project.load(path)?;
        Ok(parse_source(
            self.project.registry(),
            &loaded.language,
            &loaded.text,
        ))
    }
}

struct App {
    target: Target,
    file_list_state: ListState,
    block_list_state: ListState,
    files_focused: bool,
    model: Option<BlockModel>,
    status: String,
}

impl App {
    fn new(target: Target) -> Self {
        let files_focused = target.is_dir;
        let mut app = Self {
            target,
            file_list_state: ListState::default(),
            block_list_state: ListState::default(),
            files_focused,
            model: None,
            status: String::new(),
        };

        // Select first item if available
        if !app.target.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selected_file();
        }
        app
    }

    fn load_selected_file(&mut self) {
        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|i| self.target.files.get(i))
        else {
            return;
        };

        match self.target.parse(file.relative_path()) {
            Ok(model) => {
                let docs = model.doc_blocks().count();
                self.status = format!(
                    "{} | {} | {} blocks, {} doc",
                    file.relative_path(),
                    model.language(),
                    model.blocks().len(),
                    docs
                );
                self.block_list_state
                    .select((!model.blocks().is_empty()).then_some(0));
                self.model = Some(model);
            }
            Err(e) => {
                self.status = format!("Error reading {}: {e}", file.relative_path());
                self.model = None;
                self.block_list_state.select(None);
            }
        }
    }

    fn step(&mut self, forward: bool) {
        if self.files_focused {
            if let Some(i) = step_index(
                self.file_list_state.selected(),
                self.target.files.len(),
                forward,
            ) {
                self.file_list_state.select(Some(i));
                self.load_selected_file();
            }
        } else if let Some(model) = &self.model {
            let i = step_index(
                self.block_list_state.selected(),
                model.blocks().len(),
                forward,
            );
            self.block_list_state.select(i);
        }
    }

    fn toggle_focus(&mut self) {
        if self.target.is_dir {
            self.files_focused = !self.files_focused;
        }
    }
}

/// Wrapping step through a list of `len` items.
fn step_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
        None => 0,
    })
}

/// Logging would draw over the TUI, so it is off there unless RUST_LOG asks.
fn default_log_level(mode: Mode) -> log::LevelFilter {
    match mode {
        Mode::Tui => log::LevelFilter::Off,
        Mode::Check | Mode::Json => log::LevelFilter::Info,
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let parsed = match parse_args(&args[1..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {} [--check | --json] [path]", args[0]);
            process::exit(2);
        }
    };

    env_logger::Builder::new()
        .filter_level(default_log_level(parsed.mode))
        .parse_default_env()
        .init();

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let registry = Arc::new(languages::build_registry(config.as_ref()));

    let from_config = parsed.path.is_none();
    let path = match parsed
        .path
        .or_else(|| config.as_ref().and_then(|c| c.project_path.clone()))
    {
        Some(path) => path,
        None => {
            eprintln!("Error: No path provided and no project_path configured");
            eprintln!("Usage: {} [--check | --json] [path]", args[0]);
            eprintln!("Or set project_path in {}", config_path.display());
            process::exit(1);
        }
    };

    if !path.exists() {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!("Error: Path '{}'{} does not exist", path.display(), source);
        process::exit(1);
    }

    let target = Target::open(path, registry)?;

    match parsed.mode {
        Mode::Check => {
            if !run_check(&target, &mut stdout().lock())? {
                process::exit(1);
            }
            Ok(())
        }
        Mode::Json => run_json(&target),
        Mode::Tui => run_tui(target),
    }
}

/// Verifies every file reconstructs to its exact bytes, one verdict row per
/// file. Returns false on any mismatch or unreadable file.
fn run_check(target: &Target, out: &mut impl Write) -> Result<bool> {
    let mut all_ok = true;
    for file in &target.files {
        let path = file.relative_path();
        match check_file(target, path) {
            Ok(true) => writeln!(out, "{:<8} {path}", "ok")?,
            Ok(false) => {
                all_ok = false;
                writeln!(out, "{:<8} {path}", "MISMATCH")?;
            }
            Err(e) => {
                all_ok = false;
                log::warn!("could not check {path}: {e}");
                writeln!(out, "{:<8} {path}: {e}", "ERROR")?;
            }
        }
    }
    log::info!("checked {} files", target.files.len());
    Ok(all_ok)
}

fn check_file(target: &Target, path: &RelativePath) -> Result<bool> {
    let loaded = target.project.load(path)?;
    let model = parse_source(target.project.registry(), &loaded.language, &loaded.text);
    Ok(reconstruct(&model).is_ok_and(|saved| saved == loaded.text))
}

fn run_json(target: &Target) -> Result<()> {
    let [file] = target.files.as_slice() else {
        anyhow::bail!("--json needs a single file, not a directory");
    };
    let model = target.parse(file.relative_path())?;
    let view = EditableView::hydrate(&model);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn run_tui(target: Target) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(target);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.step(true),
                KeyCode::Up | KeyCode::Char('k') => app.step(false),
                KeyCode::Tab => app.toggle_focus(),
                _ => {}
            }
        }
    }
}

/// List items for every block: doc blocks show indent, style and contents,
/// code blocks their text.
fn block_items(model: &BlockModel) -> Vec<ListItem<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let header = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    model
        .blocks()
        .iter()
        .map(|block| {
            let lines = block.lines();
            let mut rows = Vec::new();
            match block {
                ModelBlock::Doc(doc) => {
                    rows.push(Line::from(Span::styled(
                        format!(
                            "doc {}-{}  indent={:?}  style={}",
                            lines.start + 1,
                            lines.end,
                            doc.indent,
                            doc.style.tag()
                        ),
                        header,
                    )));
                    rows.extend(doc.contents.split('\n').map(|l| Line::from(l.to_string())));
                }
                ModelBlock::Code(_) => {
                    rows.push(Line::from(Span::styled(
                        format!("code {}-{}", lines.start + 1, lines.end),
                        header,
                    )));
                    let text = model.raw_text(block);
                    rows.extend(
                        text.lines()
                            .map(|l| Line::from(Span::styled(l.to_string(), dim))),
                    );
                }
            }
            rows.push(Line::default());
            ListItem::new(rows)
        })
        .collect()
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let block_area = if app.target.is_dir {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
            .split(rows[0]);

        // File list panel
        let file_items: Vec<ListItem> = app
            .target
            .files
            .iter()
            .map(|file| ListItem::new(Line::from(file.relative_path().as_str().to_string())))
            .collect();
        let files_list = List::new(file_items)
            .block(Block::default().borders(Borders::ALL).title("Files"))
            .highlight_style(focus_style(app.files_focused));
        f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);
        chunks[1]
    } else {
        rows[0]
    };

    // Blocks panel
    match &app.model {
        Some(model) => {
            let blocks_list = List::new(block_items(model))
                .block(Block::default().borders(Borders::ALL).title("Blocks"))
                .highlight_style(focus_style(!app.files_focused));
            f.render_stateful_widget(blocks_list, block_area, &mut app.block_list_state);
        }
        None => {
            let empty = Paragraph::new("No recognised source file selected")
                .block(Block::default().borders(Borders::ALL).title("Blocks"));
            f.render_widget(empty, block_area);
        }
    }

    // Status and instructions
    let help = Paragraph::new(vec![
        Line::from(app.status.clone()),
        Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("↑/k: Previous | "),
            Span::raw("↓/j: Next | "),
            Span::raw("Tab: Switch pane"),
        ]),
    ]);
    f.render_widget(help, rows[1]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_modes_and_path() {
        assert_eq!(
            parse_args(&args(&[])),
            Ok(Args {
                mode: Mode::Tui,
                path: None
            })
        );
        assert_eq!(
            parse_args(&args(&["--check", "src"])),
            Ok(Args {
                mode: Mode::Check,
                path: Some(PathBuf::from("src"))
            })
        );
        assert_eq!(
            parse_args(&args(&["main.c", "--json"])),
            Ok(Args {
                mode: Mode::Json,
                path: Some(PathBuf::from("main.c"))
            })
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&["--check", "--json"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    fn check_target(files: &[(&str, &[u8])]) -> (tempfile::TempDir, Target) {
        let dir = tempfile::TempDir::new().unwrap();
        for (name, bytes) in files {
            std::fs::write(dir.path().join(name), bytes).unwrap();
        }
        let registry = Arc::new(languages::build_registry(None));
        let target = Target::open(dir.path().to_path_buf(), registry).unwrap();
        (dir, target)
    }

    #[test]
    fn check_reports_every_file() {
        let (_dir, target) = check_target(&[
            ("a.c", &b"// doc\nint a;\n"[..]),
            ("b.py", &b"# doc\r\nx = 1"[..]),
        ]);
        let mut out = Vec::new();

        assert!(run_check(&target, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ok       a.c\nok       b.py\n"
        );
    }

    #[test]
    fn unreadable_file_does_not_stop_the_check() {
        let (_dir, target) = check_target(&[
            ("a.c", &b"// doc\n"[..]),
            ("b.c", &b"// caf\xe9\n"[..]),
            ("c.c", &b"int c;\n"[..]),
        ]);
        let mut out = Vec::new();

        assert!(!run_check(&target, &mut out).unwrap());
        let out = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "ok       a.c");
        assert!(rows[1].starts_with("ERROR    b.c: "), "{}", rows[1]);
        assert_eq!(rows[2], "ok       c.c");
    }

    #[test]
    fn tui_logging_is_off_by_default() {
        assert_eq!(default_log_level(Mode::Tui), log::LevelFilter::Off);
        assert_eq!(default_log_level(Mode::Check), log::LevelFilter::Info);
        assert_eq!(default_log_level(Mode::Json), log::LevelFilter::Info);
    }

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step_index(Some(2), 3, true), Some(0));
        assert_eq!(step_index(Some(0), 3, false), Some(2));
        assert_eq!(step_index(None, 3, false), Some(0));
        assert_eq!(step_index(Some(0), 0, true), None);
    }
}
