pub mod filter;
pub mod intent;
pub mod table;
pub mod value;

pub use filter::{CombineMode, CompareOp, FilterSet, FilterSpec, Operator};
pub use intent::IntentTag;
pub use table::{Row, Table};
pub use value::Value;
