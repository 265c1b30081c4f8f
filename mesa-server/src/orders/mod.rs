//! Order workflow layer.
//!
//! Every state transition (open table, add items, settle, split, merge)
//! lives in its own file under `actions/`, runs inside one SQLite
//! transaction, and enforces the lifecycle rules before touching rows.
//! Money arithmetic goes through `money` so totals never accumulate
//! floating-point drift.

pub mod actions;
pub mod money;
pub mod totals;
