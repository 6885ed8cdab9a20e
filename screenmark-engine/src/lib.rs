//! Box reconciliation: merges icon-detector boxes with OCR text boxes into
//! one de-duplicated, indexed detection set.

mod reconcile;
mod sanitize;
mod suppress;

pub use reconcile::reconcile;
pub use sanitize::sanitize;
pub use suppress::suppress;
