use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const NOTE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightYellow);

pub(crate) const TITLE_STYLE: Style = NOTE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = NOTE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WORK_WEEK_STYLE: Style = NOTE_STYLE.fg(Color::Blue);

pub(crate) const OTHER_MONTH_STYLE: Style = NOTE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = NOTE_STYLE
    .bg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub(crate) const CAPTION_STYLE: Style = NOTE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const BUTTON_STYLE: Style = NOTE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
