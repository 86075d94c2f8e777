pub mod money;

pub use money::{Paise, DEFAULT_CONVENIENCE_FEE};
