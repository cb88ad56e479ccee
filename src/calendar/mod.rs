mod grid;
mod view;
mod widget;
pub(crate) use self::grid::MonthGrid;
pub(crate) use self::view::{NoteTarget, NoteView};
pub(crate) use self::widget::Note;
