use taskboard::board::{Board, Status, Task, TaskPos};
use taskboard::drag::{closest_below, Deferred, DragController, DragState};

fn board_with(columns: &[(Status, &[&str])]) -> Board {
    let mut board = Board::new();
    for (status, texts) in columns {
        for text in *texts {
            board.push_task(*status, Task::new(text).unwrap());
        }
    }
    board
}

fn occurrences(board: &Board, text: &str) -> usize {
    board
        .columns()
        .iter()
        .flat_map(|c| c.tasks())
        .filter(|t| t.text() == text)
        .count()
}

// === Insertion point ===

#[test]
fn test_closest_below_picks_nearest_card_under_pointer() {
    assert_eq!(closest_below(&[10.0, 50.0, 90.0], 45.0), Some(1));
}

#[test]
fn test_closest_below_above_all_cards() {
    assert_eq!(closest_below(&[10.0, 50.0, 90.0], 0.0), Some(0));
}

#[test]
fn test_closest_below_pointer_below_all_cards() {
    assert_eq!(closest_below(&[10.0, 50.0, 90.0], 95.0), None);
}

#[test]
fn test_closest_below_empty_column() {
    assert_eq!(closest_below(&[], 12.0), None);
}

#[test]
fn test_closest_below_exactly_on_midpoint_is_not_below() {
    // Offset of zero does not count as "below the pointer"
    assert_eq!(closest_below(&[10.0, 50.0], 50.0), None);
    assert_eq!(closest_below(&[10.0, 50.0], 10.0), Some(1));
}

#[test]
fn test_closest_below_tie_keeps_earlier_card() {
    assert_eq!(closest_below(&[20.0, 20.0, 40.0], 15.0), Some(0));
}

#[test]
fn test_closest_below_unordered_midpoints() {
    // Not assumed sorted: the strictly closest candidate wins wherever it is
    assert_eq!(closest_below(&[90.0, 50.0, 10.0], 45.0), Some(1));
}

// === State machine ===

#[test]
fn test_controller_starts_idle() {
    let drag = DragController::new();

    assert_eq!(drag.state(), DragState::Idle);
    assert!(!drag.is_dragging());
    assert!(drag.dragged().is_none());
    assert!(!drag.is_styled());
}

#[test]
fn test_begin_defers_dragging_style() {
    let mut drag = DragController::new();
    let pos = TaskPos::new(Status::Todo, 0);

    let follow_up = drag.begin(pos);

    assert!(drag.is_dragging());
    assert_eq!(drag.dragged(), Some(pos));
    assert!(!drag.is_styled());

    drag.apply(follow_up);
    assert!(drag.is_styled());
}

#[test]
fn test_stale_follow_up_is_ignored() {
    let mut drag = DragController::new();

    let first = drag.begin(TaskPos::new(Status::Todo, 0));
    drag.end();
    drag.apply(first);
    assert!(!drag.is_styled());

    // A new gesture does not pick up the old gesture's follow-up
    let second = drag.begin(TaskPos::new(Status::Todo, 0));
    assert_ne!(first, second);
    drag.apply(first);
    assert!(!drag.is_styled());
    drag.apply(second);
    assert!(drag.is_styled());
}

#[test]
fn test_follow_up_carries_gesture_number() {
    let mut drag = DragController::new();

    let Deferred::MarkDragging { gesture: a } = drag.begin(TaskPos::new(Status::Todo, 0));
    drag.end();
    let Deferred::MarkDragging { gesture: b } = drag.begin(TaskPos::new(Status::Todo, 0));

    assert!(b > a);
}

#[test]
fn test_drag_over_when_idle_does_nothing() {
    let mut drag = DragController::new();
    let mut board = board_with(&[(Status::Todo, &["A"])]);

    assert!(drag.drag_over(&mut board, Status::Done, &[], 3.0).is_none());
    assert_eq!(board.column(Status::Todo).texts(), vec!["A"]);
}

#[test]
fn test_drag_todo_to_done_above_existing_task() {
    let mut drag = DragController::new();
    let mut board = board_with(&[(Status::Todo, &["A", "B"]), (Status::Done, &["X", "Y"])]);

    drag.begin(TaskPos::new(Status::Todo, 0));
    // X at 10, Y at 50; pointer between them
    let pos = drag
        .drag_over(&mut board, Status::Done, &[10.0, 50.0], 30.0)
        .unwrap();
    let dropped = drag.end().unwrap();

    assert_eq!(pos, TaskPos::new(Status::Done, 1));
    assert_eq!(dropped, pos);
    assert_eq!(board.column(Status::Todo).texts(), vec!["B"]);
    assert_eq!(board.column(Status::Done).texts(), vec!["X", "A", "Y"]);
    assert_eq!(occurrences(&board, "A"), 1);
}

#[test]
fn test_drag_over_tracks_task_across_moves() {
    let mut drag = DragController::new();
    let mut board = board_with(&[(Status::Todo, &["A"]), (Status::Doing, &["X"])]);

    drag.begin(TaskPos::new(Status::Todo, 0));
    drag.drag_over(&mut board, Status::Doing, &[10.0], 20.0);
    assert_eq!(drag.dragged(), Some(TaskPos::new(Status::Doing, 1)));

    drag.drag_over(&mut board, Status::Done, &[], 5.0);
    assert_eq!(drag.dragged(), Some(TaskPos::new(Status::Done, 0)));

    drag.drag_over(&mut board, Status::Doing, &[10.0], 2.0);
    assert_eq!(drag.dragged(), Some(TaskPos::new(Status::Doing, 0)));

    assert_eq!(board.column(Status::Doing).texts(), vec!["A", "X"]);
    assert!(board.column(Status::Done).is_empty());
    assert!(board.column(Status::Todo).is_empty());
    assert_eq!(occurrences(&board, "A"), 1);
}

#[test]
fn test_drag_over_keeps_style_flag() {
    let mut drag = DragController::new();
    let mut board = board_with(&[(Status::Todo, &["A"])]);

    let follow_up = drag.begin(TaskPos::new(Status::Todo, 0));
    drag.apply(follow_up);
    drag.drag_over(&mut board, Status::Done, &[], 1.0);

    assert!(drag.is_styled());
}

#[test]
fn test_end_returns_to_idle() {
    let mut drag = DragController::new();

    drag.begin(TaskPos::new(Status::Doing, 2));
    assert_eq!(drag.end(), Some(TaskPos::new(Status::Doing, 2)));
    assert_eq!(drag.state(), DragState::Idle);
    assert_eq!(drag.end(), None);
}
