use ratatui::style::Color;

/// Gruvbox Material (dark) palette
pub struct GruvboxMaterial;

impl GruvboxMaterial {
    // Background colors
    pub const BG0: Color = Color::Rgb(0x28, 0x28, 0x28);
    pub const BG1: Color = Color::Rgb(0x32, 0x30, 0x2f);
    pub const BG2: Color = Color::Rgb(0x45, 0x40, 0x3d);

    // Foreground colors
    pub const FG0: Color = Color::Rgb(0xd4, 0xbe, 0x98);
    pub const GREY0: Color = Color::Rgb(0x7c, 0x6f, 0x64);
    pub const GREY2: Color = Color::Rgb(0xa8, 0x99, 0x84);

    // Semantic colors
    pub const ACCENT: Color = Color::Rgb(0x89, 0xb4, 0x82);
    pub const WARNING: Color = Color::Rgb(0xe7, 0x8a, 0x4e);
}
