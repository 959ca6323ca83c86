//! Per-cell, per-action tables.
mod base;
mod eligibility;
mod row;
mod value;
pub use eligibility::EligibilityTable;
pub use row::ActionRow;
pub use value::ActionValueTable;

/// Applies the SARSA(λ) sweep to every entry of the tables.
///
/// For every cell and action, `q += scale * e` and then `e *= decay`.
///
/// # Panics
///
/// Panics if the tables have different shapes.
pub(crate) fn sweep(q: &mut ActionValueTable, e: &mut EligibilityTable, scale: f32, decay: f32) {
    assert_eq!(
        (q.width(), q.height()),
        (e.width(), e.height()),
        "value and eligibility tables differ in shape"
    );

    for (q_row, e_row) in q.rows_mut().iter_mut().zip(e.rows_mut().iter_mut()) {
        for (qv, ev) in q_row.values_mut().iter_mut().zip(e_row.values_mut().iter_mut()) {
            *qv += scale * *ev;
            *ev *= decay;
        }
    }
}
