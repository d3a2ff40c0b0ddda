//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct, which owns the task store, turns
//! key presses into store operations and renders whatever the store exposes.
//! It never keeps its own copy of the visible tasks; every frame asks the
//! store again.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::fields::{FilterMode, IdStrategy, Theme};
use crate::store::{format_items_left, TaskListStore};
use crate::tui::{
    colors::{palette, Palette},
    enums::{AppState, Focus},
    input::InputField,
    utils::centered_rect,
};

const PLACEHOLDER: &str = "Create a new todo…";
const MARK_DONE: &str = "(✓)";
const MARK_OPEN: &str = "( )";

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskListStore,
    theme: Theme,
    focus: Focus,
    draft: InputField,
    task_list_state: TableState,
    status_message: String,
}

impl App {
    /// Create an App with an empty list, focused on the draft input.
    pub fn new(id_strategy: IdStrategy, theme: Theme) -> Self {
        App {
            state: AppState::TaskList,
            store: TaskListStore::new(id_strategy),
            theme,
            focus: Focus::Draft,
            draft: InputField::new(),
            task_list_state: TableState::default(),
            status_message: String::new(),
        }
    }

    fn palette(&self) -> Palette {
        palette(self.theme)
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Id of the task under the selection cursor, if any.
    fn selected_task_id(&self) -> Option<u64> {
        let idx = self.task_list_state.selected()?;
        self.store.visible_tasks().get(idx).map(|t| t.id)
    }

    /// Re-point the selection after the visible set changed.
    ///
    /// Keeps `keep` selected when it is still visible, otherwise clamps the
    /// old row index into range.
    fn sync_selection(&mut self, keep: Option<u64>) {
        let visible: Vec<u64> = self.store.visible_tasks().iter().map(|t| t.id).collect();
        if visible.is_empty() {
            self.task_list_state.select(None);
            return;
        }
        if let Some(idx) = keep.and_then(|id| visible.iter().position(|&v| v == id)) {
            self.task_list_state.select(Some(idx));
            return;
        }
        let idx = self
            .task_list_state
            .selected()
            .unwrap_or(0)
            .min(visible.len() - 1);
        self.task_list_state.select(Some(idx));
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.set_status_message(format!("Theme: {}", self.theme.label()));
    }

    fn toggle_pending_flag(&mut self) {
        self.store.toggle_draft_completion_flag();
        let msg = if self.store.pending_completion() {
            "Next task will be added as completed"
        } else {
            "Next task will be added as active"
        };
        self.set_status_message(msg.to_string());
    }

    fn set_filter(&mut self, mode: FilterMode) {
        let keep = self.selected_task_id();
        self.store.set_filter(mode);
        self.sync_selection(keep);
        self.set_status_message(format!(
            "Showing {} ({})",
            mode.label(),
            self.store.visible_tasks().len()
        ));
    }

    /// Push the edited draft into the store.
    fn sync_draft(&mut self) {
        self.store.set_draft_text(self.draft.value.as_str());
    }

    fn submit_draft(&mut self) {
        if let Some(id) = self.store.add_task() {
            self.draft.clear();
            self.sync_selection(Some(id));
            self.set_status_message(format!("Added task {id}"));
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_task_completion(id);
            if let Some(task) = self.store.get(id) {
                let verb = if task.completed { "Completed" } else { "Reopened" };
                self.status_message = format!("{verb} '{}'", task.name);
            }
            self.sync_selection(Some(id));
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.delete_task(id);
            self.sync_selection(None);
            self.set_status_message(format!("Deleted task {id}"));
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.store.visible_tasks().len();
        if len == 0 {
            self.task_list_state.select(None);
            return;
        }
        let next = match (self.task_list_state.selected(), down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(len - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.task_list_state.select(Some(next));
    }

    /// Keys shared by both focus modes. Returns true when the key was used.
    fn handle_global_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::F(1) => self.state = AppState::Help,
            KeyCode::F(2) => self.toggle_pending_flag(),
            KeyCode::F(3) => self.toggle_theme(),
            _ => return false,
        }
        true
    }

    /// Handle keyboard input while the draft has focus.
    fn handle_draft_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Tab | KeyCode::Esc | KeyCode::Down => {
                self.focus = Focus::List;
                self.sync_selection(self.selected_task_id());
            }
            KeyCode::Backspace => {
                self.draft.handle_backspace();
                self.sync_draft();
            }
            KeyCode::Delete => {
                self.draft.handle_delete();
                self.sync_draft();
            }
            KeyCode::Left => self.draft.move_cursor_left(),
            KeyCode::Right => self.draft.move_cursor_right(),
            KeyCode::Home => self.draft.move_home(),
            KeyCode::End => self.draft.move_end(),
            KeyCode::Char(c) => {
                self.draft.handle_char(c);
                self.sync_draft();
            }
            _ => {}
        }
    }

    /// Handle keyboard input while the list has focus.
    ///
    /// Returns true if the application should quit.
    fn handle_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('x') => {
                if self.store.is_empty() {
                    self.set_status_message("Nothing to clear".to_string());
                } else {
                    self.state = AppState::ConfirmClear;
                }
            }
            KeyCode::Char('1') => self.set_filter(FilterMode::All),
            KeyCode::Char('2') => self.set_filter(FilterMode::Active),
            KeyCode::Char('3') => self.set_filter(FilterMode::Completed),
            KeyCode::Char('f') => self.set_filter(self.store.filter().next()),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('p') => self.toggle_pending_flag(),
            KeyCode::Char('h') => self.state = AppState::Help,
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => self.focus = Focus::Draft,
            _ => {}
        }
        false
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let removed = self.store.len();
                self.store.clear_all_tasks();
                self.sync_selection(None);
                self.set_status_message(format!("Cleared {removed} task(s)"));
            }
            _ => self.set_status_message("Clear cancelled".to_string()),
        }
        self.state = AppState::TaskList;
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::F(1)
        ) {
            self.state = AppState::TaskList;
        }
    }

    /// Dispatch one key event. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();

        match self.state {
            AppState::Help => self.handle_help_input(key.code),
            AppState::ConfirmClear => self.handle_confirm_input(key.code),
            AppState::TaskList => {
                if self.handle_global_key(key.code) {
                    return false;
                }
                match self.focus {
                    Focus::Draft => self.handle_draft_input(key.code),
                    Focus::List => return self.handle_list_input(key.code),
                }
            }
        }
        false
    }

    /// Poll for a key event and handle it.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let theme_hint = match self.theme {
            Theme::Light => "☾ dark [F3]",
            Theme::Dark => "☀ light [F3]",
        };
        let line = Line::from(vec![
            Span::styled(
                "T O D O",
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(theme_hint, Style::default().fg(p.muted)),
        ]);
        let header = Paragraph::new(line)
            .style(Style::default().bg(p.background))
            .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(p.border)))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_draft(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let focused = self.focus == Focus::Draft && self.state == AppState::TaskList;
        let border = if focused { p.accent } else { p.border };

        let marker = if self.store.pending_completion() {
            Span::styled(MARK_DONE, Style::default().fg(p.check).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(MARK_OPEN, Style::default().fg(p.border))
        };
        let text = if self.draft.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(p.muted).add_modifier(Modifier::ITALIC))
        } else {
            Span::styled(self.draft.value.as_str(), Style::default().fg(p.text))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("New task (F2 mark done)");
        let inner = block.inner(area);
        let paragraph = Paragraph::new(Line::from(vec![marker, Span::raw(" "), text]))
            .style(Style::default().bg(p.surface))
            .block(block);
        f.render_widget(paragraph, area);

        if focused {
            let offset = (MARK_OPEN.width() + 1 + self.draft.display_offset()) as u16;
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            f.set_cursor_position((x, inner.y));
        }
    }

    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let visible = self.store.visible_tasks();

        let rows: Vec<Row> = visible
            .iter()
            .map(|task| {
                let (mark, name_style) = if task.completed {
                    (
                        Cell::from(MARK_DONE).style(Style::default().fg(p.check)),
                        Style::default().fg(p.done).add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    (
                        Cell::from(MARK_OPEN).style(Style::default().fg(p.border)),
                        Style::default().fg(p.text),
                    )
                };
                Row::new(vec![
                    Cell::from(task.id.to_string()).style(Style::default().fg(p.muted)),
                    mark,
                    Cell::from(task.name.clone()).style(name_style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4), // ID
            Constraint::Length(4), // Mark
            Constraint::Min(10),   // Name
        ];

        let focused = self.focus == Focus::List;
        let title = format!(
            "Tasks ({}/{}) - {}",
            visible.len(),
            self.store.len(),
            self.store.filter().label()
        );
        let highlight = if focused {
            Style::default().bg(p.accent).fg(p.surface)
        } else {
            Style::default().fg(p.accent)
        };

        let table = Table::new(rows, widths)
            .style(Style::default().bg(p.surface))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if focused { p.accent } else { p.border }))
                    .title(title),
            )
            .row_highlight_style(highlight)
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let mut spans = vec![
            Span::styled(
                format_items_left(self.store.remaining_count()),
                Style::default().fg(p.muted),
            ),
            Span::raw("   "),
        ];
        for mode in FilterMode::ALL {
            let style = if mode == self.store.filter() {
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.muted)
            };
            spans.push(Span::styled(mode.label(), style));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled("Clear Tasks [x]", Style::default().fg(p.muted)));

        let footer = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(p.surface))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)))
            .alignment(Alignment::Center);
        f.render_widget(footer, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Draft
                Constraint::Min(3),    // Tasks
                Constraint::Length(3), // Footer
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_draft(f, chunks[1]);
        self.render_task_table(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("To-do Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Anywhere:", bold)),
            Line::from("  F1           Show this help"),
            Line::from("  F2           Toggle 'add as completed' for the next task"),
            Line::from("  F3           Toggle light/dark theme"),
            Line::from("  Ctrl+C       Quit"),
            Line::from(""),
            Line::from(Span::styled("New task input:", bold)),
            Line::from("  Enter        Add task (blank input is ignored)"),
            Line::from("  ←/→ Home/End Move cursor"),
            Line::from("  Tab/Esc/↓    Move to the list"),
            Line::from(""),
            Line::from(Span::styled("Task list:", bold)),
            Line::from("  ↑/k, ↓/j     Move selection"),
            Line::from("  Space/c      Toggle completed"),
            Line::from("  d/Delete     Delete task"),
            Line::from("  x            Clear all tasks"),
            Line::from("  1/2/3        Show All / Active / Completed"),
            Line::from("  f            Cycle filter"),
            Line::from("  t            Toggle theme"),
            Line::from("  p            Toggle 'add as completed'"),
            Line::from("  a/i/Tab      Back to the input"),
            Line::from("  q/Esc        Quit"),
        ];

        let paragraph = Paragraph::new(help_text)
            .style(Style::default().bg(p.surface).fg(p.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Esc to return"),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let block = Block::default()
            .title("Clear Tasks")
            .borders(Borders::ALL)
            .style(Style::default().bg(p.surface).fg(p.text))
            .border_style(Style::default().fg(p.accent));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Delete all {} task(s)?", self.store.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press 'y' to confirm, any other key to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let p = self.palette();
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.state, self.focus) {
                (AppState::Help, _) => "Help".to_string(),
                (AppState::ConfirmClear, _) => "Confirm clear".to_string(),
                (AppState::TaskList, Focus::Draft) => {
                    "Type a task and press Enter | Tab for list | F1 help".to_string()
                }
                (AppState::TaskList, Focus::List) => {
                    "Space toggle | d delete | f filter | a add | F1 help".to_string()
                }
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(p.border).fg(p.text))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the current screen.
    pub fn render(&mut self, f: &mut Frame) {
        let p = self.palette();
        f.render_widget(Block::default().style(Style::default().bg(p.background)), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::ConfirmClear => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        info!(tasks = self.store.len(), "leaving event loop");
        Ok(())
    }
}
