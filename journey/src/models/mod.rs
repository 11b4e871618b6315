mod conversation;
mod intervention;
mod member;
mod metric;
mod week;

pub use conversation::*;
pub use intervention::*;
pub use member::*;
pub use metric::*;
pub use week::*;
