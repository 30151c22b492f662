/// A terminal color: one of the basic named colors or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse either a color name (`"green"`, `"dark-gray"`) or a hex string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s)
        }
    }

    /// Parse a basic terminal color name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase().replace(['-', '_', ' '], "");
        let color = match name.as_str() {
            "black"                => Self::Black,
            "red"                  => Self::Red,
            "green"                => Self::Green,
            "yellow"               => Self::Yellow,
            "blue"                 => Self::Blue,
            "magenta"              => Self::Magenta,
            "cyan"                 => Self::Cyan,
            "white"                => Self::White,
            "gray" | "grey"        => Self::Gray,
            "darkgray" | "darkgrey" => Self::DarkGray,
            _ => return None,
        };
        Some(color)
    }

    /// Parse a CSS-style hex color string (`#RRGGBB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        Some(Self::Rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        ))
    }

    /// Upper-case name used in the chart legend, e.g. `GREEN` or `#A6E3A1`.
    pub fn legend_name(self) -> String {
        match self {
            Self::Black    => "BLACK".into(),
            Self::Red      => "RED".into(),
            Self::Green    => "GREEN".into(),
            Self::Yellow   => "YELLOW".into(),
            Self::Blue     => "BLUE".into(),
            Self::Magenta  => "MAGENTA".into(),
            Self::Cyan     => "CYAN".into(),
            Self::White    => "WHITE".into(),
            Self::Gray     => "GRAY".into(),
            Self::DarkGray => "DARKGRAY".into(),
            Self::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        }
    }

    /// Convert to a [`ratatui::style::Color`] for painting.
    #[inline]
    pub fn to_ratatui(self) -> ratatui::style::Color {
        use ratatui::style::Color as Tui;
        match self {
            Self::Black    => Tui::Black,
            Self::Red      => Tui::Red,
            Self::Green    => Tui::Green,
            Self::Yellow   => Tui::Yellow,
            Self::Blue     => Tui::Blue,
            Self::Magenta  => Tui::Magenta,
            Self::Cyan     => Tui::Cyan,
            Self::White    => Tui::White,
            Self::Gray     => Tui::Gray,
            Self::DarkGray => Tui::DarkGray,
            Self::Rgb(r, g, b) => Tui::Rgb(r, g, b),
        }
    }
}
