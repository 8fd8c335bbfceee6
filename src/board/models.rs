use serde::{Deserialize, Serialize};

/// Column status on the task board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Status::Todo),
            "doing" => Some(Status::Doing),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    /// Fixed display order, left to right
    pub fn columns() -> &'static [Status] {
        &[Status::Todo, Status::Doing, Status::Done]
    }

    /// Position of this status in [`Status::columns`]
    pub fn index(&self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Doing => 1,
            Status::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::columns().get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::Doing => "Doing",
            Status::Done => "Done",
        }
    }
}

/// A single task card. Only the text is tracked; position in its column is the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    text: String,
}

impl Task {
    /// Build a task from user text. Returns `None` when the text is blank after trimming.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Location of a task on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPos {
    pub status: Status,
    pub index: usize,
}

impl TaskPos {
    pub fn new(status: Status, index: usize) -> Self {
        Self { status, index }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    status: Status,
    tasks: Vec<Task>,
}

impl Column {
    fn new(status: Status) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task texts in top-to-bottom order
    pub fn texts(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.text.clone()).collect()
    }
}

/// The full set of fixed columns.
///
/// Every task lives in exactly one column; [`Board::move_task`] removes and re-inserts in one
/// call so a task is never duplicated or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            columns: Status::columns().iter().map(|s| Column::new(*s)).collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &Column {
        &self.columns[status.index()]
    }

    fn column_mut(&mut self, status: Status) -> &mut Column {
        &mut self.columns[status.index()]
    }

    pub fn task(&self, pos: TaskPos) -> Option<&Task> {
        self.column(pos.status).tasks.get(pos.index)
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a new task to the bottom of the todo column.
    /// Blank text is rejected and leaves the board untouched.
    pub fn add_task(&mut self, text: &str) -> Option<TaskPos> {
        let task = Task::new(text)?;
        Some(self.push_task(Status::Todo, task))
    }

    /// Append an already-built task to the bottom of a column
    pub fn push_task(&mut self, status: Status, task: Task) -> TaskPos {
        let column = self.column_mut(status);
        column.tasks.push(task);
        TaskPos::new(status, column.tasks.len() - 1)
    }

    pub fn delete_task(&mut self, pos: TaskPos) -> Option<Task> {
        let column = self.column_mut(pos.status);
        if pos.index >= column.tasks.len() {
            return None;
        }
        Some(column.tasks.remove(pos.index))
    }

    /// Move a task to `to`, inserting before index `before` of the destination as it looks
    /// after the task has been taken out. `None` or an out-of-range index appends.
    pub fn move_task(&mut self, from: TaskPos, to: Status, before: Option<usize>) -> Option<TaskPos> {
        let task = self.delete_task(from)?;
        let column = self.column_mut(to);
        let index = match before {
            Some(i) if i <= column.tasks.len() => i,
            _ => column.tasks.len(),
        };
        column.tasks.insert(index, task);
        Some(TaskPos::new(to, index))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
