use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};

use crate::board::{Status, TaskPos};
use crate::config::ThemeConfig;
use crate::drag::{Deferred, DragController};
use crate::storage::Persistence;

use super::board::BoardState;
use super::input::{InputMode, TextInput};
use super::layout::{BoardLayout, CardLayout, Hit};

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current UI state
fn build_footer_text(input_mode: InputMode, dragging: bool) -> String {
    if dragging {
        return " Drop on a column to place the task  [Esc] drop here ".to_string();
    }
    match input_mode {
        InputMode::Normal => {
            " [i] new  [hjkl] select  [H/L] move column  [J/K] reorder  [x] del  [q] quit  (drag cards with the mouse) ".to_string()
        }
        InputMode::Editing => " Type a task... [Enter] add  [Esc] back to board ".to_string(),
    }
}

/// Shorten `text` to at most `max_width` terminal cells, ending in "..." when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if Line::from(text).width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut shown = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = Span::raw(c.to_string()).width();
        if width + w > budget {
            break;
        }
        width += w;
        shown.push(c);
    }
    format!("{}...", shown)
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Application state (separate from terminal for borrow checker)
struct AppState {
    should_quit: bool,
    board: BoardState,
    drag: DragController,
    persistence: Persistence,
    input_mode: InputMode,
    input: TextInput,
    // Card pressed with the left button; a drag starts from it on the first movement
    pending_press: Option<TaskPos>,
    // Follow-ups scheduled during this turn, run on the next one
    deferred: Vec<Deferred>,
    // Geometry of the last drawn frame
    layout: BoardLayout,
    theme: ThemeConfig,
    store_label: String,
    status_message: Option<String>,
}

pub struct App {
    terminal: Terminal,
    state: AppState,
}

impl App {
    /// Load the board from `persistence` and take over the terminal
    pub fn new(persistence: Persistence, theme: ThemeConfig, store_label: impl Into<String>) -> Result<Self> {
        let state = AppState::new(persistence, theme, store_label.into());

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, state })
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.draw()?;

            // Follow-ups from the previous turn run only after a frame has been drawn
            self.state.run_deferred();

            if event::poll(std::time::Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.state.handle_key(key),
                    Event::Mouse(mouse) => self.state.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let mut drawn = None;
        self.terminal.draw(|frame| {
            let layout = BoardLayout::compute(frame.area(), &state.board.board);
            Self::draw_board(state, &layout, frame);
            drawn = Some(layout);
        })?;

        if let Some(layout) = drawn {
            self.state.layout = layout;
        }
        Ok(())
    }

    fn draw_board(state: &AppState, layout: &BoardLayout, frame: &mut Frame) {
        let theme = &state.theme;
        let editing = state.input_mode == InputMode::Editing;

        // Input field
        let (before_cursor, after_cursor) = state.input.split_at_cursor();
        let input_text = if editing {
            format!("{}█{}", before_cursor, after_cursor)
        } else if state.input.text().is_empty() {
            "Press [i] or click here to add a task".to_string()
        } else {
            state.input.text().to_string()
        };
        let input_style = if editing {
            Style::default().fg(hex_to_color(&theme.color_text))
        } else {
            Style::default().fg(hex_to_color(&theme.color_dimmed))
        };
        let input_border = if editing {
            hex_to_color(&theme.color_selected)
        } else {
            hex_to_color(&theme.color_normal)
        };
        let input = Paragraph::new(input_text).style(input_style).block(
            Block::default()
                .title(" New Task ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(input_border)),
        );
        frame.render_widget(input, layout.input);

        let add_button = Paragraph::new("[ Add ]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(hex_to_color(&theme.color_selected)).bold())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(hex_to_color(&theme.color_normal))),
            );
        frame.render_widget(add_button, layout.add_button);

        // Columns
        let dragged = state.drag.dragged();
        for column in &layout.columns {
            let tasks = state.board.board.column(column.status);
            let is_selected_column = !editing && state.board.selected_status() == column.status;

            let title = format!(" {} ({}) ", column.status.title(), tasks.len());
            let (border_style, title_style) = if is_selected_column {
                (
                    Style::default().fg(hex_to_color(&theme.color_selected)),
                    Style::default().fg(hex_to_color(&theme.color_selected)),
                )
            } else {
                (
                    Style::default().fg(hex_to_color(&theme.color_normal)),
                    Style::default().fg(hex_to_color(&theme.color_column_header)),
                )
            };

            let column_block = Block::default()
                .title(title)
                .title_style(title_style)
                .borders(Borders::ALL)
                .border_style(border_style);
            frame.render_widget(column_block, column.area);

            for card in &column.cards {
                let Some(task) = state.board.board.task(card.pos) else {
                    continue;
                };
                let look = if dragged == Some(card.pos) {
                    if state.drag.is_styled() {
                        CardLook::Dragging
                    } else {
                        CardLook::Selected
                    }
                } else if is_selected_column && state.board.selected_row == card.pos.index {
                    CardLook::Selected
                } else {
                    CardLook::Normal
                };
                Self::draw_task_card(frame, task.text(), card, look, theme);
            }

            let hidden = tasks.len().saturating_sub(column.cards.len());
            if hidden > 0 {
                let more = Paragraph::new(format!("+{} more", hidden))
                    .alignment(Alignment::Right)
                    .style(Style::default().fg(hex_to_color(&theme.color_dimmed)));
                let bottom = Rect {
                    x: column.area.x + 1,
                    y: (column.area.y + column.area.height).saturating_sub(1),
                    width: column.area.width.saturating_sub(2),
                    height: 1,
                };
                frame.render_widget(more, bottom);
            }
        }

        // Footer with help and the last status message
        let footer_text = match &state.status_message {
            Some(msg) => format!(" {} |{}", msg, build_footer_text(state.input_mode, state.drag.is_dragging())),
            None => build_footer_text(state.input_mode, state.drag.is_dragging()),
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(hex_to_color(&theme.color_dimmed)))
            .block(
                Block::default()
                    .title(format!(" {} ", state.store_label))
                    .borders(Borders::ALL),
            );
        frame.render_widget(footer, layout.footer);
    }

    fn draw_task_card(frame: &mut Frame, text: &str, card: &CardLayout, look: CardLook, theme: &ThemeConfig) {
        let (border_color, border_type) = match look {
            CardLook::Normal => (hex_to_color(&theme.color_normal), BorderType::Plain),
            CardLook::Selected => (hex_to_color(&theme.color_selected), BorderType::Thick),
            CardLook::Dragging => (hex_to_color(&theme.color_dragging), BorderType::Double),
        };
        let text_style = match look {
            CardLook::Dragging => Style::default().fg(hex_to_color(&theme.color_dimmed)).italic(),
            _ => Style::default().fg(hex_to_color(&theme.color_text)),
        };

        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .border_type(border_type);
        let inner = card_block.inner(card.area);
        frame.render_widget(card_block, card.area);

        // Text stays left of the delete affordance
        let max_len = inner.width.saturating_sub(card.delete.width + 1) as usize;
        let shown = truncate_to_width(text, max_len);
        let text_area = Rect {
            height: 1,
            width: max_len as u16,
            ..inner
        };
        frame.render_widget(Paragraph::new(shown).style(text_style), text_area);

        let delete = Paragraph::new("[x]").style(Style::default().fg(hex_to_color(&theme.color_delete)));
        frame.render_widget(delete, card.delete);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardLook {
    Normal,
    Selected,
    Dragging,
}

impl AppState {
    fn new(persistence: Persistence, theme: ThemeConfig, store_label: String) -> Self {
        let board = persistence.load();
        Self {
            should_quit: false,
            board: BoardState::new(board),
            drag: DragController::new(),
            persistence,
            input_mode: InputMode::Normal,
            input: TextInput::new(),
            pending_press: None,
            deferred: Vec::new(),
            layout: BoardLayout::default(),
            theme,
            store_label,
            status_message: None,
        }
    }

    /// Snapshot the board after a mutation. Failures are reported, not fatal.
    fn persist(&mut self) {
        match self.persistence.save(&self.board.board) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                tracing::error!(error = %e, "failed to save board");
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn run_deferred(&mut self) {
        for action in std::mem::take(&mut self.deferred) {
            self.drag.apply(action);
        }
    }

    // === Board actions ===

    /// Add the input field's text as a new todo task. Blank input is ignored.
    fn add_task(&mut self) {
        let Some(pos) = self.board.board.add_task(self.input.text()) else {
            return;
        };
        tracing::debug!(index = pos.index, "task added");
        self.input.clear();
        if self.input_mode == InputMode::Normal {
            self.board.select(pos);
        }
        self.persist();
    }

    fn delete_task(&mut self, pos: TaskPos) {
        if self.drag.is_dragging() {
            return;
        }
        if self.board.board.delete_task(pos).is_some() {
            tracing::debug!(status = pos.status.as_str(), index = pos.index, "task deleted");
            self.board.clamp_row();
            self.persist();
        }
    }

    /// Move the selected task to the neighbouring column, appended at the bottom
    fn move_selected_to_column(&mut self, forward: bool) {
        let Some(pos) = self.board.selected_pos() else {
            return;
        };
        let target = if forward {
            Status::from_index(pos.status.index() + 1)
        } else {
            pos.status.index().checked_sub(1).and_then(Status::from_index)
        };
        let Some(target) = target else {
            return;
        };
        if let Some(moved) = self.board.board.move_task(pos, target, None) {
            self.board.select(moved);
            self.persist();
        }
    }

    /// Swap the selected task with its neighbour above or below
    fn reorder_selected(&mut self, up: bool) {
        let Some(pos) = self.board.selected_pos() else {
            return;
        };
        let len = self.board.board.column(pos.status).len();
        let before = if up {
            pos.index.checked_sub(1)
        } else if pos.index + 1 < len {
            Some(pos.index + 1)
        } else {
            None
        };
        let Some(before) = before else {
            return;
        };
        if let Some(moved) = self.board.board.move_task(pos, pos.status, Some(before)) {
            self.board.select(moved);
            self.persist();
        }
    }

    // === Drag and drop ===

    fn begin_drag(&mut self, pos: TaskPos) {
        if self.board.board.task(pos).is_none() {
            return;
        }
        let follow_up = self.drag.begin(pos);
        self.deferred.push(follow_up);
    }

    fn drag_over(&mut self, status: Status, row: u16) {
        let midpoints = self.layout.midpoints(status, self.drag.dragged());
        let pointer_y = f64::from(row) + 0.5;
        if let Some(pos) = self
            .drag
            .drag_over(&mut self.board.board, status, &midpoints, pointer_y)
        {
            self.board.select(pos);
        }
    }

    fn finish_drag(&mut self) {
        if let Some(pos) = self.drag.end() {
            self.board.select(pos);
            self.persist();
        }
    }

    // === Input handling ===

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let hit = self.layout.hit_test(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pending_press = None;
                match hit {
                    // The delete affordance consumes the press; no drag can start from it
                    Hit::Delete(pos) => self.delete_task(pos),
                    Hit::Card(pos) => {
                        self.input_mode = InputMode::Normal;
                        self.board.select(pos);
                        self.pending_press = Some(pos);
                    }
                    Hit::Column(status) => {
                        self.input_mode = InputMode::Normal;
                        self.board.select_column(status);
                    }
                    Hit::Input => self.input_mode = InputMode::Editing,
                    Hit::AddButton => self.add_task(),
                    Hit::None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.drag.is_dragging() {
                    if let Some(pos) = self.pending_press.take() {
                        self.begin_drag(pos);
                    }
                }
                if self.drag.is_dragging() {
                    if let Some(status) = hit.column() {
                        self.drag_over(status, mouse.row);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pending_press = None;
                self.finish_drag();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // A press only turns into a drag if the board is unchanged when the pointer moves
        self.pending_press = None;

        if self.drag.is_dragging() {
            if key.code == KeyCode::Esc {
                self.finish_drag();
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::Editing => self.handle_input_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Left => self.board.move_left(),
            KeyCode::Char('l') | KeyCode::Right => self.board.move_right(),
            KeyCode::Char('j') | KeyCode::Down => self.board.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.board.move_up(),
            KeyCode::Char('H') => self.move_selected_to_column(false),
            KeyCode::Char('L') => self.move_selected_to_column(true),
            KeyCode::Char('K') => self.reorder_selected(true),
            KeyCode::Char('J') => self.reorder_selected(false),
            KeyCode::Char('i') | KeyCode::Char('o') => self.input_mode = InputMode::Editing,
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(pos) = self.board.selected_pos() {
                    self.delete_task(pos);
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.add_task(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Char(c) => self.input.insert(c),
            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
