// The structured query representation produced by the host's visual query builder.
// The builder edits these values, the connectors compile them into literal SQL.

mod expr;
mod query;

pub use expr::*;
pub use query::*;
