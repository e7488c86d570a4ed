mod error;
pub mod mealplan;
mod store;
pub mod user;

pub use error::*;
pub use store::*;
