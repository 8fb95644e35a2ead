//! Column-by-column projection of a board and its task list.

use crate::board::domain::{Board, Column, ColumnId};
use crate::task::domain::Task;

/// One column with the tasks filed in it, in task-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    /// The column.
    pub column: &'a Column,
    /// Tasks whose column is this column.
    pub tasks: Vec<&'a Task>,
}

/// A board laid out as columns of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    /// The projected board.
    pub board: &'a Board,
    /// Columns in order-index order.
    pub columns: Vec<ColumnView<'a>>,
    /// Tasks of the board whose column the board does not have.
    pub orphans: Vec<&'a Task>,
}

impl<'a> BoardView<'a> {
    /// Projects `tasks` onto the columns of `board`.
    ///
    /// Tasks filed on other boards are skipped.
    #[must_use]
    pub fn project(board: &'a Board, tasks: &'a [Task]) -> Self {
        let on_board = || {
            tasks
                .iter()
                .filter(move |task| task.board_id() == board.id())
        };
        let columns = board
            .ordered_columns()
            .into_iter()
            .map(|column| ColumnView {
                column,
                tasks: on_board()
                    .filter(|task| *task.column_id() == column.id)
                    .collect(),
            })
            .collect();
        let orphans = on_board()
            .filter(|task| !board.has_column(task.column_id()))
            .collect();
        Self {
            board,
            columns,
            orphans,
        }
    }

    /// Returns the view of a column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView<'a>> {
        self.columns.iter().find(|view| view.column.id == *id)
    }

    /// Returns the number of tasks placed in columns.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.columns.iter().map(|view| view.tasks.len()).sum()
    }
}
