use super::grid::MonthGrid;
use crate::workweek::Anchor;
use ratatui::layout::{Position, Rect};
use thiserror::Error;
use time::{util::days_in_month, Date};

/// Everything about the note that changes while the program runs: which
/// month is shown, what day it is, and where the note has been moved to
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NoteView {
    today: Date,
    // Always the first day of a month
    shown: Date,
    anchor: Anchor,
    offset: (i32, i32),
    drag: Option<Position>,
    pub(super) hits: NoteHits,
}

impl NoteView {
    pub(crate) fn new(today: Date, anchor: Anchor) -> Self {
        NoteView {
            today,
            shown: first_of_month(today),
            anchor,
            offset: (0, 0),
            drag: None,
            hits: NoteHits::default(),
        }
    }

    pub(crate) fn start_month(mut self, date: Date) -> Self {
        self.shown = first_of_month(date);
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    /// The first day of the month being displayed
    pub(crate) fn shown(&self) -> Date {
        self.shown
    }

    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.shown, self.anchor)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let prev = self.shown.previous_day().ok_or(OutOfTimeError)?;
        self.shown = first_of_month(prev);
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let length = days_in_month(self.shown.month(), self.shown.year());
        self.shown = self
            .shown
            .replace_day(length)
            .ok()
            .and_then(Date::next_day)
            .ok_or(OutOfTimeError)?;
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.shown = first_of_month(self.today);
    }

    pub(crate) fn jump_to_date(&mut self, date: Date) {
        self.shown = first_of_month(date);
    }

    /// Updates the current date.  If the note was showing the old date's
    /// month, it moves along to the new date's month.
    pub(crate) fn set_today(&mut self, today: Date) {
        if self.shown == first_of_month(self.today) {
            self.shown = first_of_month(today);
        }
        self.today = today;
    }

    pub(crate) fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub(super) fn set_offset(&mut self, offset: (i32, i32)) {
        self.offset = offset;
    }

    pub(crate) fn nudge(&mut self, dx: i32, dy: i32) {
        self.offset = (
            self.offset.0.saturating_add(dx),
            self.offset.1.saturating_add(dy),
        );
    }

    pub(crate) fn start_drag(&mut self, column: u16, row: u16) {
        self.drag = Some(Position::new(column, row));
    }

    /// Moves the note by however far the pointer has moved since the last
    /// call to `start_drag()` or `drag_to()`.  Returns `false` if no drag is
    /// in progress.
    pub(crate) fn drag_to(&mut self, column: u16, row: u16) -> bool {
        let Some(from) = self.drag else {
            return false;
        };
        self.nudge(
            i32::from(column) - i32::from(from.x),
            i32::from(row) - i32::from(from.y),
        );
        self.drag = Some(Position::new(column, row));
        true
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Determines which part of the note, as last rendered, is at the given
    /// terminal cell
    pub(crate) fn hit(&self, column: u16, row: u16) -> Option<NoteTarget> {
        self.hits.target_at(Position::new(column, row))
    }
}

/// Screen areas of the note's clickable parts, recorded at render time
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct NoteHits {
    pub(super) title_bar: Rect,
    pub(super) close: Rect,
    pub(super) previous: Rect,
    pub(super) today: Rect,
    pub(super) next: Rect,
}

impl NoteHits {
    fn target_at(&self, pos: Position) -> Option<NoteTarget> {
        [
            (self.close, NoteTarget::Close),
            (self.title_bar, NoteTarget::TitleBar),
            (self.previous, NoteTarget::Previous),
            (self.today, NoteTarget::Today),
            (self.next, NoteTarget::Next),
        ]
        .into_iter()
        .find_map(|(rect, target)| rect.contains(pos).then_some(target))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NoteTarget {
    TitleBar,
    Close,
    Previous,
    Today,
    Next,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}
