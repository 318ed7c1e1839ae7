pub mod explain;
pub mod schema;
pub mod solve;
pub mod validate;
