use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use opsdeck_core::{AppViewModel, FileNode, Panel, RunState, SyncPhase, TaskStatus};

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel, editing: bool) {
    let chunks = layout::root_chunks(frame.area());
    render_tabs(frame, chunks[0], view.panel);
    render_note(frame, chunks[1], view.panel);
    match view.panel {
        Panel::Commands => render_commands(frame, chunks[2], view, editing),
        Panel::Upload => render_upload(frame, chunks[2], view),
        Panel::Bookmarks => render_bookmarks(frame, chunks[2], view),
    }
    render_status(frame, chunks[3], view, editing);
}

fn render_tabs(frame: &mut Frame, area: Rect, panel: Panel) {
    let selected = match panel {
        Panel::Commands => 0,
        Panel::Upload => 1,
        Panel::Bookmarks => 2,
    };
    let tabs = Tabs::new(vec![TAB_COMMANDS, TAB_UPLOAD, TAB_BOOKMARKS])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(APP_TITLE));
    frame.render_widget(tabs, area);
}

fn render_note(frame: &mut Frame, area: Rect, panel: Panel) {
    let note = match panel {
        Panel::Commands => NOTE_COMMANDS,
        Panel::Upload => NOTE_UPLOAD,
        Panel::Bookmarks => NOTE_BOOKMARKS,
    };
    let paragraph = Paragraph::new(note).style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, area);
}

fn render_commands(frame: &mut Frame, area: Rect, view: &AppViewModel, editing: bool) {
    let chunks = layout::commands_chunks(area);

    let items: Vec<ListItem> = view
        .tasks
        .iter()
        .map(|task| {
            let text_style = if task.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                status_badge(task.status),
                Span::raw(" "),
                Span::styled(task.text.clone(), text_style),
            ]))
        })
        .collect();
    let tasks = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Tasks ({})", view.tasks.len())),
    );
    frame.render_widget(tasks, chunks[0]);

    let (input_title, input_style) = if editing {
        ("New task (editing)", Style::default().fg(Color::Yellow))
    } else {
        ("New task (a to edit)", Style::default())
    };
    let input_text = if editing {
        format!("{}_", view.task_input)
    } else {
        view.task_input.clone()
    };
    let input = Paragraph::new(input_text).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(input_title),
    );
    frame.render_widget(input, chunks[1]);

    let output = if view.output_log.is_empty() {
        OUTPUT_PLACEHOLDER.to_owned()
    } else {
        view.output_log.join("\n")
    };
    let output = Paragraph::new(output)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Output Log"));
    frame.render_widget(output, chunks[2]);
}

fn render_upload(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    if !view.folder_selected {
        let prompt = Paragraph::new(FOLDER_PROMPT)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Local Folder"));
        frame.render_widget(prompt, area);
        return;
    }

    let chunks = layout::upload_chunks(area);

    let mut items = Vec::new();
    push_tree_items(&view.file_tree, 0, &mut items);
    let tree = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Selected Directory Structure"),
    );
    frame.render_widget(tree, chunks[0]);

    let gauge = Gauge::default()
        .percent(u16::from(view.upload.percent))
        .gauge_style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Upload"));
    frame.render_widget(gauge, chunks[1]);

    let banner = if view.upload.complete_visible {
        Span::styled(
            UPLOAD_COMPLETE,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else if view.upload.running {
        Span::styled("Uploading...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(banner)), chunks[2]);
}

fn render_bookmarks(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let chunks = layout::bookmarks_chunks(area);

    let columns = layout::source_columns(chunks[0], view.sources.len());
    for (source, column) in view.sources.iter().zip(columns.iter()) {
        let items: Vec<ListItem> = source
            .records
            .iter()
            .map(|record| {
                ListItem::new(Line::from(vec![
                    Span::styled(record.title.clone(), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!(" ({})", record.location),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", source.name, source.records.len())),
        );
        frame.render_widget(list, *column);
    }

    let log = Paragraph::new(view.sync_log.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Sync Log"));
    frame.render_widget(log, chunks[1]);
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel, editing: bool) {
    let run = match view.run_state {
        RunState::Idle => "idle",
        RunState::Running => "running",
    };
    let sync = match view.sync_phase {
        SyncPhase::Idle => "idle",
        SyncPhase::Merging | SyncPhase::Settling => "syncing",
    };
    let hint = match (view.panel, editing) {
        (Panel::Commands, true) => HINT_COMMANDS_EDITING,
        (Panel::Commands, false) => HINT_COMMANDS,
        (Panel::Upload, _) => HINT_UPLOAD,
        (Panel::Bookmarks, _) => HINT_BOOKMARKS,
    };
    let status = format!(
        "tasks: {} ({run}) | sync: {sync} | upload: {}%   {hint}",
        view.tasks.len(),
        view.upload.percent
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn status_badge(status: TaskStatus) -> Span<'static> {
    match status {
        TaskStatus::Pending => Span::styled("[pend]", Style::default().fg(Color::DarkGray)),
        TaskStatus::Running => Span::styled("[run ]", Style::default().fg(Color::Cyan)),
        TaskStatus::Success => Span::styled("[ ok ]", Style::default().fg(Color::Green)),
        TaskStatus::Error => Span::styled("[fail]", Style::default().fg(Color::Red)),
    }
}

fn push_tree_items(node: &FileNode, depth: usize, items: &mut Vec<ListItem<'static>>) {
    let indent = "  ".repeat(depth);
    match node {
        FileNode::Folder { name, children } => {
            items.push(ListItem::new(format!("{indent}{name}/")));
            for child in children {
                push_tree_items(child, depth + 1, items);
            }
        }
        FileNode::File { name } => {
            items.push(ListItem::new(format!("{indent}{name}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdeck_core::{update, AppState, FileNode, Msg, Panel, Record, Source};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn seeded_state() -> AppState {
        let msg = Msg::FixturesLoaded {
            tasks: vec!["git status".to_owned(), "cargo check".to_owned()],
            sources: vec![Source {
                name: "Browser A".to_owned(),
                records: vec![Record {
                    id: 1,
                    title: "Docs".to_owned(),
                    location: "docs.example.com".to_owned(),
                }],
            }],
            tree: FileNode::Folder {
                name: "project".to_owned(),
                children: vec![FileNode::File {
                    name: "README.md".to_owned(),
                }],
            },
        };
        let (state, _) = update(AppState::new(), msg);
        state
    }

    fn rendered_text(view: &opsdeck_core::AppViewModel) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, view, false)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.content[buffer.index_of(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn commands_panel_shows_tasks_and_placeholder() {
        let state = seeded_state();
        let text = rendered_text(&state.view());
        assert!(text.contains("Command Runner"));
        assert!(text.contains("git status"));
        assert!(text.contains("[pend]"));
        assert!(text.contains(OUTPUT_PLACEHOLDER));
    }

    #[test]
    fn upload_panel_prompts_until_folder_selected() {
        let state = seeded_state();
        let (state, _) = update(state, Msg::PanelSelected(Panel::Upload));
        let text = rendered_text(&state.view());
        assert!(text.contains(FOLDER_PROMPT));

        let (state, _) = update(state, Msg::SelectFolderClicked);
        let text = rendered_text(&state.view());
        assert!(text.contains("project/"));
        assert!(text.contains("README.md"));
    }

    #[test]
    fn bookmarks_panel_lists_sources() {
        let state = seeded_state();
        let (state, _) = update(state, Msg::PanelSelected(Panel::Bookmarks));
        let text = rendered_text(&state.view());
        assert!(text.contains("Browser A (1)"));
        assert!(text.contains("Docs"));
    }
}
