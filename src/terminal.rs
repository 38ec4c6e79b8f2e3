//! Terminal handling with raw ANSI escape sequences
//! No external TUI libraries - just raw escape codes

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;

/// DOS color palette (16 colors)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// RGB values of the DOS text-mode palette
    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0x00, 0x00, 0x00),
            Color::Blue => (0x00, 0x00, 0xAA),
            Color::Green => (0x00, 0xAA, 0x00),
            Color::Cyan => (0x00, 0xAA, 0xAA),
            Color::Red => (0xAA, 0x00, 0x00),
            Color::Magenta => (0xAA, 0x00, 0xAA),
            Color::Brown => (0xAA, 0x55, 0x00),
            Color::LightGray => (0xAA, 0xAA, 0xAA),
            Color::DarkGray => (0x55, 0x55, 0x55),
            Color::LightBlue => (0x55, 0x55, 0xFF),
            Color::LightGreen => (0x55, 0xFF, 0x55),
            Color::LightCyan => (0x55, 0xFF, 0xFF),
            Color::LightRed => (0xFF, 0x55, 0x55),
            Color::LightMagenta => (0xFF, 0x55, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x55),
            Color::White => (0xFF, 0xFF, 0xFF),
        }
    }

    /// ANSI SGR foreground code (true color)
    pub fn to_fg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("38;2;{};{};{}", r, g, b)
    }

    /// ANSI SGR background code (true color)
    pub fn to_bg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("48;2;{};{};{}", r, g, b)
    }
}

/// Mouse button
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    None, // motion without a button
}

/// Mouse event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub row: u16,
    pub col: u16,
    pub pressed: bool,
    pub motion: bool,
}

/// Key events including special keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    ShiftLeft,
    ShiftRight,
    ShiftHome,
    ShiftEnd,
    CtrlLeft,
    CtrlRight,
    Alt(char),
    Ctrl(char),
    Mouse(MouseEvent),
    /// Bracketed paste contents
    Paste(String),
    Unknown(Vec<u8>),
}

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Terminal state manager
pub struct Terminal {
    stdout: io::Stdout,
    width: u16,
    height: u16,
    /// Settings captured before entering raw mode
    original: Option<libc::termios>,
    /// Keys decoded from an earlier read that held several
    pending: VecDeque<Key>,
}

impl Terminal {
    /// Initialize terminal in raw mode
    pub fn new() -> io::Result<Self> {
        let mut term = Self {
            stdout: io::stdout(),
            width: 80,
            height: 25,
            original: None,
            pending: VecDeque::new(),
        };

        term.update_size();
        term.enable_raw_mode()?;

        term.write_raw("\x1b[?1049h")?; // Alternate screen
        term.write_raw("\x1b[?25l")?; // Hide cursor
        term.write_raw("\x1b[?1002h")?; // Button-event mouse tracking
        term.write_raw("\x1b[?1006h")?; // SGR extended mouse mode
        term.write_raw("\x1b[?2004h")?; // Bracketed paste
        term.write_raw("\x1b[2J\x1b[H")?;
        term.flush()?;
        tracing::info!(width = term.width, height = term.height, "terminal raw mode enabled");

        Ok(term)
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Update terminal size from ioctl
    pub fn update_size(&mut self) {
        // SAFETY: winsize is plain data and TIOCGWINSZ only writes into it.
        unsafe {
            let mut ws: libc::winsize = std::mem::zeroed();
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) == 0 && ws.ws_col > 0 {
                self.width = ws.ws_col;
                self.height = ws.ws_row;
            }
        }
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let fd = io::stdin().as_raw_fd();
        // SAFETY: termios is plain data, filled by tcgetattr before use.
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            self.original = Some(termios);

            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;

            // VMIN=0, VTIME=0: non-blocking read
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(orig) = self.original.take() {
            let fd = io::stdin().as_raw_fd();
            // SAFETY: restores the settings captured in enable_raw_mode.
            if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &orig) } != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    /// Write raw bytes to terminal
    pub fn write_raw(&mut self, s: &str) -> io::Result<()> {
        self.stdout.write_all(s.as_bytes())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    /// Move cursor to position (1-based, like ANSI)
    pub fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}H", row, col)
    }

    /// Set foreground and background colors
    pub fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}m", fg.to_fg_sgr(), bg.to_bg_sgr())
    }

    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        write!(self.stdout, "{}", c)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25h")
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25l")
    }

    /// Ring the terminal bell (invalid input feedback)
    pub fn bell(&mut self) -> io::Result<()> {
        self.write_raw("\x07")?;
        self.flush()
    }

    /// Read a key from input (non-blocking)
    ///
    /// One read can carry several keys when typing outpaces the loop; those
    /// are queued and handed out one per call.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }

        let mut buf = [0u8; 256];
        let mut stdin = io::stdin();

        let n = stdin.read(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        let mut bytes = buf[..n].to_vec();

        // A lone ESC may be the start of a sequence split across reads
        if bytes == [0x1b] {
            std::thread::sleep(std::time::Duration::from_millis(10));
            let more = stdin.read(&mut buf)?;
            bytes.extend_from_slice(&buf[..more]);
        }

        // Bracketed paste can span many reads
        if contains(&bytes, PASTE_START) {
            let mut idle = 0;
            while !contains(&bytes, PASTE_END) && idle < 50 {
                let more = stdin.read(&mut buf)?;
                if more == 0 {
                    idle += 1;
                    std::thread::sleep(std::time::Duration::from_millis(2));
                } else {
                    bytes.extend_from_slice(&buf[..more]);
                }
            }
        }

        self.pending.extend(parse_keys(&bytes));
        Ok(self.pending.pop_front())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Split one read into the keys it carries and decode each
pub fn parse_keys(buf: &[u8]) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut rest = buf;
    while !rest.is_empty() {
        let len = key_len(rest);
        keys.push(parse_key(&rest[..len]));
        rest = &rest[len..];
    }
    keys
}

/// Byte length of the first key in `buf` (never zero for non-empty input)
fn key_len(buf: &[u8]) -> usize {
    if buf.starts_with(PASTE_START) {
        return buf
            .windows(PASTE_END.len())
            .position(|w| w == PASTE_END)
            .map_or(buf.len(), |end| end + PASTE_END.len());
    }

    match buf {
        // CSI: parameters run up to a final byte in 0x40..=0x7e
        [0x1b, b'[', tail @ ..] => tail
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(buf.len(), |end| end + 3),
        [0x1b, b'O', c, ..] if c.is_ascii_uppercase() => 3,
        [0x1b, c, ..] if c.is_ascii_graphic() => 2,
        [0x1b, ..] => 1,
        [lead, ..] if *lead >= 0xc0 => {
            let width = match lead {
                0xc0..=0xdf => 2,
                0xe0..=0xef => 3,
                _ => 4,
            };
            width.min(buf.len())
        }
        _ => 1,
    }
}

/// Parse the bytes of a single key
pub fn parse_key(buf: &[u8]) -> Key {
    if let Some(body) = buf.strip_prefix(PASTE_START) {
        let end = body
            .windows(PASTE_END.len())
            .position(|w| w == PASTE_END)
            .unwrap_or(body.len());
        return Key::Paste(String::from_utf8_lossy(&body[..end]).into_owned());
    }

    if buf.len() >= 6 && buf.starts_with(b"\x1b[<") {
        if let Some(mouse) = parse_sgr_mouse(buf) {
            return Key::Mouse(mouse);
        }
    }

    match buf {
        [b'\r'] | [b'\n'] => Key::Enter,
        [0x1b] => Key::Escape,
        [0x7f] | [0x08] => Key::Backspace,
        [b'\t'] => Key::Tab,

        // Ctrl+letter (0x01-0x1a)
        [c] if *c >= 1 && *c <= 26 => Key::Ctrl((b'a' + c - 1) as char),

        [c] if *c >= 32 && *c < 127 => Key::Char(*c as char),

        [0x1b, b'[', b'Z'] => Key::ShiftTab,
        [0x1b, b'[', b'A'] => Key::Up,
        [0x1b, b'[', b'B'] => Key::Down,
        [0x1b, b'[', b'C'] => Key::Right,
        [0x1b, b'[', b'D'] => Key::Left,
        [0x1b, b'[', b'H'] | [0x1b, b'[', b'1', b'~'] => Key::Home,
        [0x1b, b'[', b'F'] | [0x1b, b'[', b'4', b'~'] => Key::End,
        [0x1b, b'[', b'3', b'~'] => Key::Delete,
        [0x1b, b'[', b'5', b'~'] => Key::PageUp,
        [0x1b, b'[', b'6', b'~'] => Key::PageDown,

        [0x1b, b'[', b'1', b';', b'2', b'C'] => Key::ShiftRight,
        [0x1b, b'[', b'1', b';', b'2', b'D'] => Key::ShiftLeft,
        [0x1b, b'[', b'1', b';', b'2', b'H'] => Key::ShiftHome,
        [0x1b, b'[', b'1', b';', b'2', b'F'] => Key::ShiftEnd,
        [0x1b, b'[', b'1', b';', b'5', b'C'] => Key::CtrlRight,
        [0x1b, b'[', b'1', b';', b'5', b'D'] => Key::CtrlLeft,

        // Alt+letter (ESC followed by letter)
        [0x1b, c] if c.is_ascii_alphabetic() => Key::Alt((*c as char).to_ascii_lowercase()),

        [0x1b, b'O', b'A'] => Key::Up,
        [0x1b, b'O', b'B'] => Key::Down,
        [0x1b, b'O', b'C'] => Key::Right,
        [0x1b, b'O', b'D'] => Key::Left,
        [0x1b, b'O', b'H'] => Key::Home,
        [0x1b, b'O', b'F'] => Key::End,

        _ if buf.first().is_some_and(|b| *b >= 0x80) => match std::str::from_utf8(buf) {
            Ok(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown(buf.to_vec()),
                }
            }
            Err(_) => Key::Unknown(buf.to_vec()),
        },

        _ => Key::Unknown(buf.to_vec()),
    }
}

/// Parse SGR extended mouse format: \x1b[<Cb;Cx;CyM or \x1b[<Cb;Cx;Cym
fn parse_sgr_mouse(buf: &[u8]) -> Option<MouseEvent> {
    let s = std::str::from_utf8(buf).ok()?;
    let content = s.strip_prefix("\x1b[<")?;
    let pressed = content.ends_with('M');
    let content = content.trim_end_matches(|c| c == 'M' || c == 'm');

    let mut parts = content.split(';');
    let cb: u8 = parts.next()?.parse().ok()?;
    let col: u16 = parts.next()?.parse().ok()?;
    let row: u16 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let button = if cb & 64 != 0 {
        if cb & 1 != 0 { MouseButton::WheelDown } else { MouseButton::WheelUp }
    } else {
        match cb & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::None,
        }
    };

    Some(MouseEvent {
        button,
        row,
        col,
        pressed,
        motion: cb & 32 != 0,
    })
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.write_raw("\x1b[?2004l");
        let _ = self.write_raw("\x1b[?1006l");
        let _ = self.write_raw("\x1b[?1002l");
        let _ = self.write_raw("\x1b[0m");
        let _ = self.show_cursor();
        let _ = self.write_raw("\x1b[?1049l");
        let _ = self.flush();
        let _ = self.disable_raw_mode();
        tracing::info!("terminal raw mode disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_keys() {
        assert_eq!(parse_key(b"7"), Key::Char('7'));
        assert_eq!(parse_key(b"\r"), Key::Enter);
        assert_eq!(parse_key(b"\x1b"), Key::Escape);
        assert_eq!(parse_key(b"\x07"), Key::Ctrl('g'));
        assert_eq!(parse_key(b"\x1bo"), Key::Alt('o'));
        assert_eq!(parse_key(b"\x1b[1;2D"), Key::ShiftLeft);
    }

    #[test]
    fn test_parse_bracketed_paste() {
        assert_eq!(parse_key(b"\x1b[200~12a3\x1b[201~"), Key::Paste("12a3".to_string()));
    }

    #[test]
    fn test_multibyte_char_is_one_key() {
        assert_eq!(parse_key("é".as_bytes()), Key::Char('é'));
        assert_eq!(parse_keys("7é".as_bytes()), vec![Key::Char('7'), Key::Char('é')]);
    }

    #[test]
    fn test_coalesced_typing_splits_into_keys() {
        assert_eq!(parse_keys(b"50\r"), vec![Key::Char('5'), Key::Char('0'), Key::Enter]);
        assert_eq!(parse_keys(b"5\x1b"), vec![Key::Char('5'), Key::Escape]);
        assert_eq!(
            parse_keys(b"12a3b"),
            vec![Key::Char('1'), Key::Char('2'), Key::Char('a'), Key::Char('3'), Key::Char('b')]
        );
    }

    #[test]
    fn test_escape_sequences_inside_a_burst() {
        assert_eq!(
            parse_keys(b"4\x1b[D\x1bo\x1b[1;5C\x7f"),
            vec![Key::Char('4'), Key::Left, Key::Alt('o'), Key::CtrlRight, Key::Backspace]
        );
        assert_eq!(parse_keys(b"\x1bOA\t"), vec![Key::Up, Key::Tab]);
        assert_eq!(parse_keys(b"\x1b\x1b"), vec![Key::Escape, Key::Escape]);
    }

    #[test]
    fn test_paste_then_enter_in_one_read() {
        assert_eq!(
            parse_keys(b"\x1b[200~4\r2\x1b[201~\r"),
            vec![Key::Paste("4\r2".to_string()), Key::Enter]
        );
    }

    #[test]
    fn test_mouse_click_followed_by_key() {
        let keys = parse_keys(b"\x1b[<0;12;5M\x1b[<0;12;5m9");
        assert_eq!(keys.len(), 3);
        assert!(matches!(keys[0], Key::Mouse(MouseEvent { pressed: true, .. })));
        assert!(matches!(keys[1], Key::Mouse(MouseEvent { pressed: false, .. })));
        assert_eq!(keys[2], Key::Char('9'));
    }

    #[test]
    fn test_parse_sgr_mouse_click() {
        let key = parse_key(b"\x1b[<0;12;5M");
        assert_eq!(
            key,
            Key::Mouse(MouseEvent {
                button: MouseButton::Left,
                row: 5,
                col: 12,
                pressed: true,
                motion: false,
            })
        );
    }
}
