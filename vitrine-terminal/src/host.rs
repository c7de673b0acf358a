/// Terminal implementations of the core host seams
use crate::renderer::AsciiRenderer;
use crossterm::style::Color;
use std::cell::Cell;
use std::rc::Rc;
use vitrine_core::{Host, Mount, ThemeTarget};

/// Rows reserved for the status line
pub const STATUS_ROWS: u16 = 1;

/// Every view gets the full drawing area below the status line
#[derive(Clone)]
pub struct TerminalMount {
    area: Rc<Cell<(u32, u32)>>,
}

impl Mount for TerminalMount {
    fn size(&self) -> (u32, u32) {
        self.area.get()
    }
}

pub struct TerminalHost {
    area: Rc<Cell<(u32, u32)>>,
    /// Mount ids present on this host; `None` exposes every id
    mounts: Option<Vec<String>>,
}

impl TerminalHost {
    pub fn new(columns: u16, rows: u16, mounts: Option<Vec<String>>) -> Self {
        Self {
            area: Rc::new(Cell::new(drawing_area(columns, rows))),
            mounts,
        }
    }

    /// Record a new terminal size; mounts see it on the next resize pass
    pub fn set_terminal_size(&mut self, columns: u16, rows: u16) {
        self.area.set(drawing_area(columns, rows));
    }
}

fn drawing_area(columns: u16, rows: u16) -> (u32, u32) {
    (u32::from(columns), u32::from(rows.saturating_sub(STATUS_ROWS)))
}

impl Host for TerminalHost {
    type Mount = TerminalMount;
    type Renderer = AsciiRenderer;

    fn find_mount(&self, id: &str) -> Option<TerminalMount> {
        let present = match &self.mounts {
            Some(ids) => ids.iter().any(|m| m == id),
            None => true,
        };
        present.then(|| TerminalMount {
            area: self.area.clone(),
        })
    }

    fn create_renderer(&mut self, mount: &TerminalMount) -> AsciiRenderer {
        let (width, height) = mount.size();
        AsciiRenderer::new(width as usize, height as usize)
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.area.get()
    }
}

/// Terminal colors standing in for the page body styling
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalBody {
    pub classes: Vec<String>,
    pub background: Color,
    pub foreground: Color,
}

impl Default for TerminalBody {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            background: Color::Reset,
            foreground: Color::Reset,
        }
    }
}

impl TerminalBody {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl ThemeTarget for TerminalBody {
    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_background(&mut self, value: &str) {
        if let Some(color) = parse_css_hex(value) {
            self.background = color;
        }
    }

    fn set_color(&mut self, value: &str) {
        if let Some(color) = parse_css_hex(value) {
            self.foreground = color;
        }
    }
}

/// Parse `#rgb` or `#rrggbb`
pub fn parse_css_hex(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut rgb = digits.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::Rgb {
                r: rgb.next()??,
                g: rgb.next()??,
                b: rgb.next()??,
            })
        }
        6 => Some(Color::Rgb {
            r: channel(&digits[0..2])?,
            g: channel(&digits[2..4])?,
            b: channel(&digits[4..6])?,
        }),
        _ => None,
    }
}
