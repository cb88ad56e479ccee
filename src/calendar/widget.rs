use super::grid::{GridDay, GridWeek, WeekdayExt};
use super::view::{NoteHits, NoteView};
use crate::theme::{
    BUTTON_STYLE, CAPTION_STYLE, NOTE_STYLE, OTHER_MONTH_STYLE, TITLE_STYLE, TODAY_STYLE,
    WEEKDAY_STYLE, WORK_WEEK_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static HEADER: &str = "WW   Mon Tue Wed Thu Fri Sat Sun ";

static TITLE: &str = " Work Week Calendar ";

static CLOSE_MARK: &str = " × ";

const CLOSE_WIDTH: u16 = 3;

static PREVIOUS_BUTTON: &str = " ◀ ";

static TODAY_BUTTON: &str = "Today";

static NEXT_BUTTON: &str = " ▶ ";

const ARROW_BUTTON_WIDTH: u16 = 3;

const TODAY_BUTTON_WIDTH: u16 = 5;

/// Number of columns at the start of each row in which the work week is
/// written
const LABEL_WIDTH: u16 = 5;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the grid, including the work-week column
const MAIN_WIDTH: u16 = LABEL_WIDTH + DAY_WIDTH * 7;

/// Blank columns between each side border and the grid
const PADDING: u16 = 1;

pub(crate) const NOTE_WIDTH: u16 = MAIN_WIDTH + 2 * (PADDING + 1);

const HEADER_LINES: u16 = 1;

/// Rows reserved for weeks; months span four to six
const GRID_ROWS: u16 = 6;

const CAPTION_LINE: u16 = HEADER_LINES + GRID_ROWS + 1;

const NAV_LINE: u16 = CAPTION_LINE + 1;

pub(crate) const NOTE_HEIGHT: u16 = NAV_LINE + 1 + 2;

/// Gap kept between the note's default position and the top & right edges of
/// the screen
const MARGIN: u16 = 1;

/// The calendar note.  Its position, the displayed month, and the current
/// date all come from the `NoteView` state, which also receives the screen
/// areas of the note's buttons.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Note;

impl StatefulWidget for Note {
    type State = NoteView;

    /*
     * ┌ Work Week Calendar ──────────── × ┐
     * │ WW   Mon Tue Wed Thu Fri Sat Sun  │
     * │ WW1   30  31   1   2   3   4   5  │
     * │   ...                             │
     * │                                   │
     * │           January 2025            │
     * │  ◀            Today            ▶  │
     * └───────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let note = place(area, state);
        Clear.render(note, buf);
        Block::bordered()
            .title_top(Line::styled(TITLE, TITLE_STYLE))
            .title_top(Line::raw(CLOSE_MARK).right_aligned())
            .style(NOTE_STYLE)
            .render(note, buf);
        let inner = note.inner(Margin::new(PADDING + 1, 1));
        state.hits = NoteHits {
            title_bar: Rect { height: 1, ..note }.intersection(note),
            close: Rect::new(
                note.right().saturating_sub(CLOSE_WIDTH + 1),
                note.y,
                CLOSE_WIDTH,
                1,
            )
            .intersection(note),
            previous: button_area(inner, 0, ARROW_BUTTON_WIDTH),
            today: button_area(inner, today_column(), TODAY_BUTTON_WIDTH),
            next: button_area(inner, MAIN_WIDTH - ARROW_BUTTON_WIDTH, ARROW_BUTTON_WIDTH),
        };
        let grid = state.grid();
        let today = state.today();
        let mut canvas = BufferCanvas::new(inner, buf);
        canvas.draw_header();
        for (i, week) in std::iter::zip(0u16.., grid.weeks()) {
            canvas.draw_week(i, week, today);
        }
        canvas.draw_caption(&format!("{} {}", grid.month(), grid.year()));
        canvas.draw_nav();
    }
}

// Positions the note at its home in the top-right corner, shifted by the
// view's offset but kept on screen.  The offset is then corrected to match
// where the note actually ended up.
fn place(area: Rect, state: &mut NoteView) -> Rect {
    let width = NOTE_WIDTH.min(area.width);
    let height = NOTE_HEIGHT.min(area.height);
    let max_x = area.right() - width;
    let max_y = area.bottom() - height;
    let home_x = area.right().saturating_sub(width + MARGIN).max(area.x);
    let home_y = (area.y + MARGIN).min(max_y);
    let (dx, dy) = state.offset();
    let x = clamp_coord(i32::from(home_x).saturating_add(dx), area.x, max_x);
    let y = clamp_coord(i32::from(home_y).saturating_add(dy), area.y, max_y);
    state.set_offset((
        i32::from(x) - i32::from(home_x),
        i32::from(y) - i32::from(home_y),
    ));
    Rect::new(x, y, width, height)
}

fn clamp_coord(value: i32, low: u16, high: u16) -> u16 {
    u16::try_from(value.clamp(i32::from(low), i32::from(high)))
        .expect("clamped coordinate should fit in a u16")
}

fn today_column() -> u16 {
    (MAIN_WIDTH - TODAY_BUTTON_WIDTH) / 2
}

fn button_area(inner: Rect, column: u16, width: u16) -> Rect {
    Rect::new(
        inner.x.saturating_add(column),
        inner.y.saturating_add(NAV_LINE),
        width,
        1,
    )
    .intersection(inner)
}

fn show_day(day: GridDay, today: Date) -> Span<'static> {
    if day.in_month && day.date == today {
        Span::styled(format!("[{:2}]", day.day()), TODAY_STYLE)
    } else if day.in_month {
        Span::styled(format!(" {:2} ", day.day()), NOTE_STYLE)
    } else {
        Span::styled(format!(" {:2} ", day.day()), OTHER_MONTH_STYLE)
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_header(&mut self) {
        self.mvprint(0, 0, HEADER, WEEKDAY_STYLE);
    }

    fn draw_week(&mut self, week_no: u16, week: &GridWeek, today: Date) {
        let y = HEADER_LINES + week_no;
        self.mvprint(y, 0, week.work_week().to_string(), WORK_WEEK_STYLE);
        for day in week.days() {
            let s = show_day(day, today);
            self.mvprint(
                y,
                LABEL_WIDTH + DAY_WIDTH * day.weekday().index0(),
                s.content,
                s.style,
            );
        }
    }

    fn draw_caption(&mut self, caption: &str) {
        let width = u16::try_from(Span::raw(caption).width()).unwrap_or(MAIN_WIDTH);
        self.mvprint(
            CAPTION_LINE,
            MAIN_WIDTH.saturating_sub(width) / 2,
            caption,
            CAPTION_STYLE,
        );
    }

    fn draw_nav(&mut self) {
        self.mvprint(NAV_LINE, 0, PREVIOUS_BUTTON, BUTTON_STYLE);
        self.mvprint(NAV_LINE, today_column(), TODAY_BUTTON, BUTTON_STYLE);
        self.mvprint(
            NAV_LINE,
            MAIN_WIDTH - ARROW_BUTTON_WIDTH,
            NEXT_BUTTON,
            BUTTON_STYLE,
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // note's area, though we need to be sure that the Rect passed to
            // the Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
