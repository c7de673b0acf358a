/// Terminal host for the showcase views
///
/// Mounts the views through [`host::TerminalHost`], drives them from a fixed
/// 30 FPS loop and draws the active one with the ASCII rasterizer.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use vitrine_core::{
    Config, FrameInput, Host, LoadingPhase, LoadingScreen, Pointer, Stage, ThemeSwitch, ViewKey,
};

pub mod host;
pub mod renderer;

pub use host::{TerminalBody, TerminalHost, TerminalMount};
pub use renderer::AsciiRenderer;

/// Pixels scrolled per arrow key or wheel notch
const SCROLL_STEP: f32 = 40.0;

/// Host-side input state, snapshotted once per frame
#[derive(Debug, Default, Clone, Copy)]
struct InputState {
    scroll_y: f32,
    pointer: Pointer,
}

impl InputState {
    fn snapshot(&self, time: f64) -> FrameInput {
        FrameInput::at(time).with_scroll(self.scroll_y).with_pointer(self.pointer)
    }

    fn scroll(&mut self, delta: f32) {
        self.scroll_y = (self.scroll_y + delta).max(0.0);
    }
}

/// Normalize a terminal cell against the drawing area below the status line
fn pointer_in_area(column: u16, row: u16, (width, height): (f32, f32)) -> Pointer {
    let row = row.saturating_sub(host::STATUS_ROWS);
    Pointer::from_client(f32::from(column), f32::from(row), width, height)
}

/// Main application struct for the terminal showcase
pub struct TerminalApp {
    host: TerminalHost,
    stage: Stage<TerminalHost>,
    body: TerminalBody,
    theme: ThemeSwitch,
    loading: LoadingScreen,
    input: InputState,
    active: usize,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Mount the views; `only` restricts the host to a single view's mount
    pub fn new(config: &Config, only: Option<ViewKey>, fallback_seed: u64) -> Result<Self> {
        let (columns, rows) = terminal::size().context("Failed to query terminal size")?;
        let mounts = only.map(|key| vec![config.mounts.for_view(key).to_string()]);
        let mut host = TerminalHost::new(columns, rows, mounts);
        let stage = Stage::bootstrap(&mut host, config, fallback_seed);
        if stage.is_empty() {
            anyhow::bail!("No views mounted");
        }

        let mut body = TerminalBody::default();
        let theme = ThemeSwitch::new(config.theme, &mut body);
        let now = Instant::now();

        Ok(Self {
            host,
            stage,
            body,
            theme,
            loading: LoadingScreen::new(&config.loading),
            input: InputState::default(),
            active: 0,
            started: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30);

        while self.stage.is_running() {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            let input = self.input.snapshot(self.started.elapsed().as_secs_f64());
            if !self.stage.tick(&input) {
                break;
            }
            self.draw()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        info!("Render loop exited");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.stage.stop(),
                KeyCode::Tab => self.cycle_view(),
                KeyCode::Char('t') => {
                    self.theme.toggle(&mut self.body);
                }
                KeyCode::Down | KeyCode::Char('j') => self.input.scroll(SCROLL_STEP),
                KeyCode::Up | KeyCode::Char('k') => self.input.scroll(-SCROLL_STEP),
                KeyCode::PageDown => self.input.scroll(SCROLL_STEP * 10.0),
                KeyCode::PageUp => self.input.scroll(-SCROLL_STEP * 10.0),
                _ => {}
            },
            Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    self.input.pointer = pointer_in_area(column, row, self.host_area());
                }
                MouseEventKind::ScrollDown => self.input.scroll(SCROLL_STEP),
                MouseEventKind::ScrollUp => self.input.scroll(-SCROLL_STEP),
                _ => {}
            },
            Event::Resize(columns, rows) => {
                debug!(columns, rows, "Terminal resized");
                self.host.set_terminal_size(columns, rows);
                self.stage.resize(&self.host);
            }
            _ => {}
        }
    }

    fn host_area(&self) -> (f32, f32) {
        let (width, height) = self.host.viewport_size();
        (width as f32, height as f32)
    }

    fn active_key(&self) -> Option<ViewKey> {
        self.stage.keys().nth(self.active)
    }

    fn cycle_view(&mut self) {
        self.active = (self.active + 1) % self.stage.len().max(1);
        if let Some(key) = self.active_key() {
            info!(view = %key, "Active view changed");
        }
    }

    fn draw(&self) -> Result<()> {
        let mut stdout = stdout();
        let elapsed_ms = self.started.elapsed().as_millis() as u64;

        match self.loading.phase(elapsed_ms) {
            LoadingPhase::Visible => return self.draw_splash(&mut stdout, self.body.foreground),
            LoadingPhase::FadingOut => return self.draw_splash(&mut stdout, Color::DarkGrey),
            LoadingPhase::Hidden => {}
        }

        if let Some(renderer) = self.active_key().and_then(|key| self.stage.renderer(key)) {
            renderer.draw(&mut stdout, host::STATUS_ROWS, self.body.background)?;
        }

        let view = self.active_key().map(|key| key.as_str()).unwrap_or("-");
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(self.body.background),
            SetForegroundColor(self.body.foreground),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "Vitrine | {} [{}/{}] | {:?} | scroll {:.0} | FPS: {:.1} | Tab=View Up/Down=Scroll T=Theme Q=Quit",
                view,
                self.active + 1,
                self.stage.len(),
                self.theme.current(),
                self.input.scroll_y,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn draw_splash<W: Write>(&self, out: &mut W, color: Color) -> Result<()> {
        let (width, height) = self.host_area();
        let message = "Loading Vitrine...";
        let column = ((width as usize).saturating_sub(message.len()) / 2) as u16;
        let row = (height / 2.0) as u16;
        queue!(
            out,
            SetBackgroundColor(self.body.background),
            terminal::Clear(ClearType::All),
            cursor::MoveTo(column, row),
            SetForegroundColor(color),
            Print(message),
            ResetColor
        )?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_never_negative() {
        let mut input = InputState::default();
        input.scroll(-SCROLL_STEP);
        assert_eq!(input.scroll_y, 0.0);
        input.scroll(SCROLL_STEP * 2.0);
        input.scroll(-SCROLL_STEP);
        assert_eq!(input.scroll_y, SCROLL_STEP);
    }

    #[test]
    fn test_snapshot_carries_state() {
        let input = InputState {
            scroll_y: 120.0,
            pointer: Pointer::new(0.5, -0.5),
        };
        let frame = input.snapshot(2.5);
        assert_eq!(frame.time, 2.5);
        assert_eq!(frame.scroll_y, 120.0);
        assert_eq!(frame.pointer, Pointer::new(0.5, -0.5));
    }

    #[test]
    fn test_pointer_skips_status_line() {
        let area = (80.0, 20.0);
        assert_eq!(pointer_in_area(0, host::STATUS_ROWS, area), Pointer::new(-1.0, 1.0));
        assert_eq!(pointer_in_area(40, 0, area).y, 1.0);
        assert_eq!(pointer_in_area(40, 10 + host::STATUS_ROWS, area), Pointer::new(0.0, 0.0));
    }

    #[test]
    fn test_stage_drives_ascii_renderers() {
        let mut host = TerminalHost::new(60, 21, None);
        let mut stage = Stage::bootstrap(&mut host, &Config::default(), 5);
        assert_eq!(stage.len(), ViewKey::ALL.len());

        assert!(stage.tick(&FrameInput::at(1.0)));
        let renderer = stage.renderer(ViewKey::Hero).unwrap();
        assert_eq!(renderer.size(), (60, 20));
        assert!(renderer.filled_cells() > 0);

        host.set_terminal_size(30, 11);
        stage.resize(&host);
        assert_eq!(stage.renderer(ViewKey::Tech).unwrap().size(), (30, 10));
    }
}
