//! Case-insensitive substring matching shared by list queries.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

/// `LOWER(col) LIKE '%term%'` for each column, OR-ed together.
///
/// Returns `None` for a blank term so callers can skip the filter.
pub(crate) fn any_contains<C: ColumnTrait>(columns: &[C], term: Option<&str>) -> Option<Condition> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    Some(
        columns
            .iter()
            .fold(Condition::any(), |cond, col| cond.add(lower_like(*col, &pattern))),
    )
}

fn lower_like<C: ColumnTrait>(col: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(pattern)
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
