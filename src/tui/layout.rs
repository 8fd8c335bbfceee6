//! Screen geometry computed from the model, used both for drawing and for mouse hit testing.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::board::{Board, Status, TaskPos};

/// Rows per task card, borders included
pub const CARD_HEIGHT: u16 = 3;
/// Width of the `[x]` delete affordance
pub const DELETE_WIDTH: u16 = 3;
/// Width of the `[ Add ]` button
const ADD_BUTTON_WIDTH: u16 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub pos: TaskPos,
    pub area: Rect,
    pub delete: Rect,
}

impl CardLayout {
    /// Vertical midpoint of the card in terminal rows
    pub fn midpoint(&self) -> f64 {
        f64::from(self.area.y) + f64::from(self.area.height) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub status: Status,
    pub area: Rect,
    pub cards: Vec<CardLayout>,
}

/// What sits under a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Delete(TaskPos),
    Card(TaskPos),
    Column(Status),
    Input,
    AddButton,
    None,
}

impl Hit {
    /// The column a hit falls in, for drop targeting
    pub fn column(&self) -> Option<Status> {
        match self {
            Hit::Delete(pos) | Hit::Card(pos) => Some(pos.status),
            Hit::Column(status) => Some(*status),
            Hit::Input | Hit::AddButton | Hit::None => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub input: Rect,
    pub add_button: Rect,
    pub columns: Vec<ColumnLayout>,
    pub footer: Rect,
}

impl BoardLayout {
    /// Lay out the input row, one column per status, and the footer.
    /// Cards that do not fit in their column are left out.
    pub fn compute(area: Rect, board: &Board) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(ADD_BUTTON_WIDTH + 2)])
            .split(rows[0]);

        let column_count = Status::columns().len() as u32;
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(Status::columns().iter().map(|_| Constraint::Ratio(1, column_count)))
            .split(rows[1]);

        let columns = Status::columns()
            .iter()
            .zip(column_areas.iter())
            .map(|(status, col_area)| Self::layout_column(*status, *col_area, board))
            .collect();

        Self {
            input: header[0],
            add_button: header[1],
            columns,
            footer: rows[2],
        }
    }

    fn layout_column(status: Status, area: Rect, board: &Board) -> ColumnLayout {
        // Inside the column border
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let max_cards = (inner.height / CARD_HEIGHT) as usize;
        let cards = (0..board.column(status).len())
            .take(max_cards)
            .map(|index| {
                let card = Rect {
                    x: inner.x,
                    y: inner.y + index as u16 * CARD_HEIGHT,
                    width: inner.width,
                    height: CARD_HEIGHT,
                };
                // `[x]` sits on the text row, flush against the right border
                let delete = Rect {
                    x: (card.x + card.width).saturating_sub(DELETE_WIDTH + 1),
                    y: card.y + 1,
                    width: DELETE_WIDTH.min(card.width.saturating_sub(2)),
                    height: 1,
                };
                CardLayout {
                    pos: TaskPos::new(status, index),
                    area: card,
                    delete,
                }
            })
            .collect();

        ColumnLayout {
            status,
            area,
            cards,
        }
    }

    pub fn column(&self, status: Status) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.status == status)
    }

    /// Resolve a terminal cell to the element drawn there
    pub fn hit_test(&self, x: u16, y: u16) -> Hit {
        let point = Position::new(x, y);

        for column in &self.columns {
            if !column.area.contains(point) {
                continue;
            }
            for card in &column.cards {
                if card.delete.contains(point) {
                    return Hit::Delete(card.pos);
                }
                if card.area.contains(point) {
                    return Hit::Card(card.pos);
                }
            }
            return Hit::Column(column.status);
        }

        if self.add_button.contains(point) {
            Hit::AddButton
        } else if self.input.contains(point) {
            Hit::Input
        } else {
            Hit::None
        }
    }

    /// Midpoints of the cards laid out in `status`, top to bottom, skipping `excluding`
    pub fn midpoints(&self, status: Status, excluding: Option<TaskPos>) -> Vec<f64> {
        self.column(status)
            .map(|column| {
                column
                    .cards
                    .iter()
                    .filter(|card| Some(card.pos) != excluding)
                    .map(CardLayout::midpoint)
                    .collect()
            })
            .unwrap_or_default()
    }
}
