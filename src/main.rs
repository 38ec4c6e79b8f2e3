//! goto-demo
//!
//! A read-only document viewer drawn with raw ANSI escape sequences. Ctrl+G
//! opens the Go To Line dialog and jumps to the chosen line.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use clap::Parser;
use goto_dialog::input::InputEvent;
use goto_dialog::screen::Screen;
use goto_dialog::terminal::Terminal;
use goto_dialog::ui::{Rect, Theme};
use goto_dialog::{logging, Feedback, GoToDialog, ModalHost, Result, Strings, TextDirection};

#[derive(Parser)]
#[command(name = "goto-demo")]
#[command(about = "Document viewer hosting the Go To Line dialog")]
#[command(version)]
struct Args {
    /// Number of synthetic lines to show
    #[arg(long, default_value_t = 200, conflicts_with = "file")]
    lines: usize,

    /// View a real file instead of synthetic lines
    #[arg(long)]
    file: Option<PathBuf>,

    /// TOML string table for the dialog
    #[arg(long)]
    strings: Option<PathBuf>,

    /// Title of the out-of-range error popup
    #[arg(long)]
    error_title: Option<String>,

    /// Text the line field starts with (digits only)
    #[arg(long)]
    initial: Option<String>,

    /// Lay the dialog out right-to-left
    #[arg(long)]
    rtl: bool,

    /// Write tracing events here (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The document being viewed
struct Viewer {
    title: String,
    lines: Vec<String>,
    /// Current line (0-based)
    cursor_line: usize,
    /// First visible line (0-based)
    top: usize,
    status: String,
}

impl Viewer {
    fn new(title: String, mut lines: Vec<String>) -> Self {
        // An empty document still has one line
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            title,
            lines,
            cursor_line: 0,
            top: 0,
            status: "Ctrl+G Go to line   Ctrl+Q Quit".to_string(),
        }
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text rows available between the frame and the status bar
    fn page_height(screen: &Screen) -> usize {
        screen.size().1.saturating_sub(3).max(1) as usize
    }

    fn move_to(&mut self, line: usize, page: usize) {
        self.cursor_line = line.min(self.line_count() - 1);
        if self.cursor_line < self.top {
            self.top = self.cursor_line;
        } else if self.cursor_line >= self.top + page {
            self.top = self.cursor_line + 1 - page;
        }
    }

    /// Jump to a 1-based line, placing it mid-page
    fn jump_to(&mut self, line: usize, page: usize) {
        self.cursor_line = line.saturating_sub(1).min(self.line_count() - 1);
        self.top = self.cursor_line.saturating_sub(page / 2);
        self.status = format!("Jumped to line {}", line);
    }

    fn draw(&self, screen: &mut Screen, theme: &Theme) {
        let (width, height) = screen.size();
        screen.clear_with(theme.editor_fg, theme.editor_bg);

        let frame = Rect::new(1, 1, width, height.saturating_sub(1));
        screen.draw_box(frame, theme.editor_border_fg, theme.editor_bg);
        let title = format!(" {} ", self.title);
        let title_x = 1 + width.saturating_sub(title.chars().count() as u16) / 2;
        screen.write_str(1, title_x, &title, theme.editor_bg, theme.editor_fg);

        let gutter = self.line_count().to_string().len() as u16 + 1;
        let text_width = width.saturating_sub(gutter + 3) as usize;
        let page = Self::page_height(screen);

        for (row, index) in (self.top..self.line_count()).take(page).enumerate() {
            let y = 2 + row as u16;
            let current = index == self.cursor_line;
            let (fg, bg) = if current {
                (theme.editor_current_line_fg, theme.editor_current_line_bg)
            } else {
                (theme.editor_fg, theme.editor_bg)
            };
            let number = format!("{:>w$} ", index + 1, w = gutter as usize - 1);
            screen.write_str(y, 2, &number, theme.editor_line_number_fg, theme.editor_bg);
            let text: String = self.lines[index].chars().take(text_width).collect();
            let padded = format!("{:<w$}", text, w = text_width);
            screen.write_str(y, 2 + gutter, &padded, fg, bg);
        }

        let position = format!("Line {}/{} ", self.cursor_line + 1, self.line_count());
        let status = format!(" {:<w$}", self.status, w = (width as usize).saturating_sub(position.len() + 1));
        screen.write_str(height, 1, &status, theme.statusbar_fg, theme.statusbar_bg);
        screen.write_str(
            height,
            width.saturating_sub(position.len() as u16) + 1,
            &position,
            theme.statusbar_fg,
            theme.statusbar_bg,
        );
        screen.set_cursor(None);
    }
}

/// Read the next key as an input event, turning Ctrl+V into a clipboard paste
fn poll_event(terminal: &mut Terminal, clipboard: &mut Option<arboard::Clipboard>) -> io::Result<Option<InputEvent>> {
    let Some(key) = terminal.read_key()? else {
        return Ok(None);
    };
    let event = InputEvent::from(key);
    if event == InputEvent::CtrlV {
        let text = clipboard.as_mut().and_then(|c| c.get_text().ok());
        return Ok(text.map(InputEvent::Paste));
    }
    Ok(Some(event))
}

/// Runs the dialog's modal loop on the real terminal, over the viewer
struct TerminalHost<'a> {
    terminal: &'a mut Terminal,
    screen: &'a mut Screen,
    viewer: &'a Viewer,
    theme: &'a Theme,
    clipboard: &'a mut Option<arboard::Clipboard>,
}

impl Feedback for TerminalHost<'_> {
    fn invalid_input(&mut self) {
        if let Err(err) = self.terminal.bell() {
            tracing::warn!(%err, "failed to ring bell");
        }
    }
}

impl ModalHost for TerminalHost<'_> {
    fn owner_bounds(&self) -> Rect {
        let (width, height) = self.screen.size();
        Rect::new(1, 1, width, height)
    }

    fn begin_frame(&mut self) -> &mut Screen {
        self.viewer.draw(self.screen, self.theme);
        &mut *self.screen
    }

    fn end_frame(&mut self) -> io::Result<()> {
        self.screen.flush(&mut *self.terminal)
    }

    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            if let Some(event) = poll_event(&mut *self.terminal, &mut *self.clipboard)? {
                return Ok(Some(event));
            }
            if resize_screen(self.terminal, self.screen) {
                // Redraw at the new size
                return Ok(Some(InputEvent::Unknown));
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

/// Track terminal size changes; true if the screen was resized
fn resize_screen(terminal: &mut Terminal, screen: &mut Screen) -> bool {
    terminal.update_size();
    let size = terminal.size();
    if size == screen.size() {
        return false;
    }
    screen.resize(size.0, size.1);
    screen.invalidate();
    true
}

/// Main application
struct App {
    terminal: Terminal,
    screen: Screen,
    theme: Theme,
    viewer: Viewer,
    dialog: GoToDialog,
    clipboard: Option<arboard::Clipboard>,
}

impl App {
    fn new(viewer: Viewer, dialog: GoToDialog) -> io::Result<Self> {
        let terminal = Terminal::new()?;
        let (width, height) = terminal.size();
        Ok(Self {
            terminal,
            screen: Screen::new(width, height),
            theme: Theme::classic_blue(),
            viewer,
            dialog,
            clipboard: arboard::Clipboard::new().ok(),
        })
    }

    fn run(&mut self) -> Result<()> {
        loop {
            resize_screen(&mut self.terminal, &mut self.screen);
            self.viewer.draw(&mut self.screen, &self.theme);
            self.screen.flush(&mut self.terminal)?;

            let Some(event) = poll_event(&mut self.terminal, &mut self.clipboard)? else {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            };

            let page = Viewer::page_height(&self.screen);
            let line = self.viewer.cursor_line;
            match event {
                InputEvent::CtrlQ | InputEvent::Escape => break,
                InputEvent::CtrlG => self.go_to_line()?,
                InputEvent::CursorUp | InputEvent::ScrollUp { .. } => {
                    self.viewer.move_to(line.saturating_sub(1), page)
                }
                InputEvent::CursorDown | InputEvent::ScrollDown { .. } => self.viewer.move_to(line + 1, page),
                InputEvent::PageUp => self.viewer.move_to(line.saturating_sub(page), page),
                InputEvent::PageDown => self.viewer.move_to(line + page, page),
                InputEvent::Home => self.viewer.move_to(0, page),
                InputEvent::End => self.viewer.move_to(usize::MAX, page),
                _ => {}
            }
        }
        Ok(())
    }

    fn go_to_line(&mut self) -> Result<()> {
        self.dialog.set_max_line_number_allowed(self.viewer.line_count());
        let mut host = TerminalHost {
            terminal: &mut self.terminal,
            screen: &mut self.screen,
            viewer: &self.viewer,
            theme: &self.theme,
            clipboard: &mut self.clipboard,
        };
        let picked = self.dialog.show(&mut host)?;

        let page = Viewer::page_height(&self.screen);
        match picked {
            Some(line) => self.viewer.jump_to(line, page),
            None => self.viewer.status = "Go to line cancelled".to_string(),
        }
        Ok(())
    }
}

fn load_document(args: &Args) -> Result<Viewer> {
    let viewer = match &args.file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let lines = text.lines().map(str::to_string).collect();
            Viewer::new(path.display().to_string(), lines)
        }
        None => {
            let lines = (1..=args.lines).map(|n| format!("This is line {} of the document.", n)).collect();
            Viewer::new("Untitled".to_string(), lines)
        }
    };
    Ok(viewer)
}

fn build_dialog(args: &Args) -> Result<GoToDialog> {
    let mut strings = match &args.strings {
        Some(path) => Strings::load(path)?,
        None => Strings::default(),
    };
    if args.rtl {
        strings.direction = TextDirection::RightToLeft;
    }

    let mut dialog = GoToDialog::new(strings);
    dialog.set_error_dialog_title(args.error_title.clone());
    if let Some(initial) = &args.initial {
        dialog.set_initial_text(initial);
    }
    Ok(dialog)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }

    let viewer = load_document(&args)?;
    let dialog = build_dialog(&args)?;

    let mut app = App::new(viewer, dialog)?;
    app.run()
}
