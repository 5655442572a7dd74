use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Vertical split of the whole frame: tabs, disclaimer, body, status bar.
pub fn root_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Command panel body: task list, input box, output log.
pub fn commands_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(8),
        ])
        .split(area)
}

/// Upload panel body: file tree, progress gauge, completion banner.
pub fn upload_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Bookmark panel body: source columns above the sync log.
pub fn bookmarks_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(area)
}

/// Equal-width columns, one per bookmark source.
pub fn source_columns(area: Rect, count: usize) -> Rc<[Rect]> {
    let count = count.max(1) as u32;
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Ratio(1, count))
        .collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
}
