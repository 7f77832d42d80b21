//! Demo host for the devbar overlay.
//!
//! Draws a stand-in application and mounts the toolbar over it.  Press `t`
//! to flip the simulated system colour scheme and `q` to quit.
//! Run with `--print-keymap` to dump the default keymap file.

use std::cell::Cell;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};

use devbar::app::event::{spawn_event_reader, AppEvent};
use devbar::ui::content::{info, section, stack, toggle};
use devbar::ui::controls::{ButtonVariant, Control};
use devbar::{
    Action, Ambient, ColorScheme, DevBar, Dimension, Keymap, Position, SystemScheme, Tab,
    ThemeMode, WidgetConfig,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Demo host for the devbar overlay")]
struct Cli {
    /// bottom-right, bottom-left, top-right, top-left or pane.
    #[arg(long, default_value_t = Position::BottomRight)]
    position: Position,

    /// light, dark or auto.
    #[arg(long, default_value_t = ThemeMode::Auto)]
    theme: ThemeMode,

    /// Environment name.  Overrides DEVBAR_ENV / APP_ENV / RUST_ENV.
    #[arg(long)]
    env: Option<String>,

    /// Keep the toolbar visible in production.
    #[arg(long)]
    show_in_production: bool,

    /// Start with the panel open.
    #[arg(long)]
    open: bool,

    #[arg(long, default_value = WidgetConfig::DEFAULT_TITLE)]
    title: String,

    /// Corner panel width, e.g. `48` or `40%`.
    #[arg(long)]
    width: Option<Dimension>,

    /// Corner panel height, e.g. `14` or `30%`.
    #[arg(long)]
    max_height: Option<Dimension>,

    /// Initial pane height, e.g. `16` or `40%`.
    #[arg(long)]
    pane_height: Option<Dimension>,

    /// Keymap file (`action = Key1, Key2` lines).
    #[arg(long)]
    keymap: Option<PathBuf>,

    /// Print the default keymap file and exit.
    #[arg(long = "print-keymap")]
    print_keymap: bool,
}

// ───────────────────────────────────────── demo tabs ─────────

/// Host-side numbers the tabs report on.
struct Stats {
    frames: Cell<u64>,
    started: Instant,
    /// Scheme the widget resolved last frame; tab content follows it.
    scheme: Cell<ColorScheme>,
}

fn build_tabs(stats: &Rc<Stats>, system: &SystemScheme, keymap: &Keymap) -> Vec<Tab> {
    let metrics = {
        let stats = Rc::clone(stats);
        Tab::lazy("metrics", "Metrics", move || {
            let scheme = stats.scheme.get();
            let uptime = stats.started.elapsed().as_secs_f64();
            section(
                Some("Render"),
                vec![
                    info("frames", stats.frames.get(), scheme),
                    info("uptime", format!("{uptime:.1}s"), scheme),
                ],
                scheme,
            )
        })
        .icon("▤")
    };

    let state = {
        let stats = Rc::clone(stats);
        let system = system.clone();
        Tab::lazy("state", "State", move || {
            let scheme = stats.scheme.get();
            stack([
                section(
                    Some("Clock"),
                    vec![info("local", chrono::Local::now().format("%H:%M:%S"), scheme)],
                    scheme,
                ),
                section(
                    Some("Scheme"),
                    vec![
                        info("system", system.current(), scheme),
                        toggle("dark", scheme.is_dark(), scheme),
                    ],
                    scheme,
                ),
            ])
        })
        .icon("◉")
    };

    let reset = {
        let stats = Rc::clone(stats);
        Control::button("reset-frames", "Reset frames", move || stats.frames.set(0))
            .variant(ButtonVariant::Danger)
    };
    let dark = {
        let (read, write) = (system.clone(), system.clone());
        Control::toggle(
            "dark-scheme",
            "dark system scheme",
            move || read.current().is_dark(),
            move |on| write.set(if on { ColorScheme::Dark } else { ColorScheme::Light }),
        )
    };

    let controls = {
        let stats = Rc::clone(stats);
        let keymap = keymap.clone();
        Tab::lazy("controls", "Controls", move || {
            let scheme = stats.scheme.get();
            let widget_keys = Action::ALL
                .iter()
                .map(|&action| info(action.label(), keymap.display_bindings(action), scheme))
                .collect();
            stack([
                section(Some("Toolbar"), widget_keys, scheme),
                section(
                    Some("Host"),
                    vec![info("flip system scheme", "t", scheme), info("quit", "q", scheme)],
                    scheme,
                ),
            ])
        })
        .control(reset)
        .control(dark)
    };

    vec![metrics, state, controls]
}

fn build_config(cli: &Cli, tabs: Vec<Tab>, keymap: Keymap) -> Result<WidgetConfig> {
    let mut builder = WidgetConfig::builder()
        .tabs(tabs)
        .position(cli.position)
        .theme(cli.theme)
        .hide_in_production(!cli.show_in_production)
        .title(cli.title.clone())
        .default_open(cli.open)
        .keymap(keymap);
    if let Some(env) = &cli.env {
        builder = builder.environment(env.clone());
    }
    if let Some(width) = cli.width {
        builder = builder.width(width);
    }
    if let Some(max_height) = cli.max_height {
        builder = builder.max_height(max_height);
    }
    if let Some(pane_height) = cli.pane_height {
        builder = builder.default_pane_height(pane_height);
    }
    builder.build().context("invalid toolbar configuration")
}

fn load_keymap(path: Option<&PathBuf>) -> Result<Keymap> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading keymap file {}", path.display()))?;
            Ok(Keymap::from_config_str(&text))
        }
        None => Ok(Keymap::default()),
    }
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.print_keymap {
        print!("{}", Keymap::default().to_config_string());
        return Ok(());
    }

    let keymap = load_keymap(cli.keymap.as_ref())?;
    let ambient = Ambient::detect();
    let system = ambient.system_scheme.clone();
    let stats = Rc::new(Stats {
        frames: Cell::new(0),
        started: Instant::now(),
        scheme: Cell::new(ColorScheme::default()),
    });
    let tabs = build_tabs(&stats, &system, &keymap);
    let config = build_config(&cli, tabs, keymap)?;
    let mut bar = DevBar::mount(config, ambient)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("enabling raw mode")?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut bar, &stats, &system).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    bar: &mut DevBar,
    stats: &Stats,
    system: &SystemScheme,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut scheme_changes = system.subscribe();
    let mut should_quit = false;

    while !should_quit {
        stats.scheme.set(bar.resolved_theme());
        terminal.draw(|frame| {
            let host = Paragraph::new(host_text(system))
                .wrap(Wrap { trim: false })
                .block(Block::default().title(" host application ").borders(Borders::ALL));
            frame.render_widget(host, frame.area());
            // toolbar last, over everything else
            frame.render_widget(&mut *bar, frame.area());
        })?;
        stats.frames.set(stats.frames.get() + 1);

        tokio::select! {
            biased;

            Some(event) = events.recv() => match event {
                AppEvent::Input(event) => {
                    if !bar.handle_event(&event) {
                        should_quit = handle_host_event(&event, system);
                    }
                }
                AppEvent::Tick => {
                    bar.tick();
                }
            },

            Some(scheme) = scheme_changes.changed() => {
                tracing::debug!(%scheme, "system scheme published");
                bar.tick();
            }

            else => should_quit = true,
        }
    }
    Ok(())
}

/// Keys the widget left alone.  Returns whether to quit.
fn handle_host_event(event: &Event, system: &SystemScheme) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('t') => {
            system.set(system.current().toggled());
            false
        }
        _ => false,
    }
}

fn host_text(system: &SystemScheme) -> Text<'static> {
    Text::from(vec![
        Line::raw("This is the host application.  The toolbar floats above it."),
        Line::raw(""),
        Line::raw("F12 toggles the toolbar, or click its trigger."),
        Line::raw(format!("t  flip system scheme (now {})", system.current())),
        Line::raw("q  quit"),
    ])
}
