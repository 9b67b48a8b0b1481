pub mod datetime;
pub mod error;
pub mod expand;
pub mod expr;
pub mod grammar;
pub mod mapper;
pub mod output;
pub mod path;
pub mod pointer;
pub mod value;
pub mod value_map;

pub use error::MapError;
pub use expr::{Comparator, ExprKind};
pub use grammar::Grammar;
pub use mapper::{enforce_arrays, structure_map, translate_paths};
pub use output::{from_json, strip_missing, to_json};
pub use value::Value;
pub use value_map::value_map;
