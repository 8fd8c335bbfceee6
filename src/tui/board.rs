use crate::board::{Board, Status, Task, TaskPos};

/// State for the kanban board view: the model plus the keyboard selection
#[derive(Debug)]
pub struct BoardState {
    pub board: Board,
    pub selected_column: usize,
    pub selected_row: usize,
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            selected_column: 0,
            selected_row: 0,
        }
    }

    pub fn selected_status(&self) -> Status {
        Status::from_index(self.selected_column).unwrap_or(Status::Todo)
    }

    /// Position of the selected task, if the selected column has one there
    pub fn selected_pos(&self) -> Option<TaskPos> {
        let pos = TaskPos::new(self.selected_status(), self.selected_row);
        self.board.task(pos).map(|_| pos)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_pos().and_then(|pos| self.board.task(pos))
    }

    /// Point the selection at `pos`
    pub fn select(&mut self, pos: TaskPos) {
        self.selected_column = pos.status.index();
        self.selected_row = pos.index;
        self.clamp_row();
    }

    /// Select a column, keeping the row within bounds
    pub fn select_column(&mut self, status: Status) {
        self.selected_column = status.index();
        self.clamp_row();
    }

    /// Move selection left
    pub fn move_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.clamp_row();
        }
    }

    /// Move selection right
    pub fn move_right(&mut self) {
        if self.selected_column < Status::columns().len() - 1 {
            self.selected_column += 1;
            self.clamp_row();
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        let column_count = self.board.column(self.selected_status()).len();
        if self.selected_row < column_count.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    /// Ensure selected_row is valid for current column
    pub fn clamp_row(&mut self) {
        let column_count = self.board.column(self.selected_status()).len();
        if column_count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= column_count {
            self.selected_row = column_count - 1;
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(Board::new())
    }
}
