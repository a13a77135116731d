mod performer;

pub use enigo::{InputError, InputResult, NewConError};
pub use performer::{MouseButton, Performer};
