use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func, LikeExpr},
};

/// Case-insensitive substring match across several columns, OR-ed together.
///
/// `%`, `_` and `\` in the term match literally. Folding relies on the backend's
/// `LOWER`: Postgres folds Unicode, SQLite folds ASCII only, so on SQLite a
/// non-ASCII letter matches only in the case it was stored with.
pub trait ContainsAnyInsensitive {
    fn contains_any_insensitive<C>(self, columns: &[C], term: &str) -> Self
    where
        C: ColumnTrait;
}

impl<E> ContainsAnyInsensitive for Select<E>
where
    E: EntityTrait,
{
    fn contains_any_insensitive<C>(self, columns: &[C], term: &str) -> Self
    where
        C: ColumnTrait,
    {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let condition = columns.iter().fold(Condition::any(), |cond, col| {
            cond.add(
                Expr::expr(Func::lower(Expr::col(*col)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
        });
        self.filter(condition)
    }
}

/// Escape `LIKE` wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
