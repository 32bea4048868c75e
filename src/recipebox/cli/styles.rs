use console::Style;
use once_cell::sync::Lazy;

pub struct Theme {
    pub id: Style,
    pub title: Style,
    pub meta: Style,
    pub time: Style,
    pub heading: Style,
    pub favorite: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

pub static THEME: Lazy<Theme> = Lazy::new(|| Theme {
    id: Style::new().yellow(),
    title: Style::new().bold(),
    meta: Style::new().color256(246),
    time: Style::new().color256(246).italic(),
    heading: Style::new().bold().underlined(),
    favorite: Style::new().red(),
    info: Style::new().dim(),
    success: Style::new().green(),
    warning: Style::new().yellow(),
    error: Style::new().red(),
});
