mod ballot;
mod command;
mod finalize;
mod query;
mod shopping_list;
mod tally;
mod transaction;

pub use ballot::*;
pub use command::*;
pub use finalize::*;
pub use query::*;
pub use shopping_list::*;
pub use tally::*;
pub use transaction::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::*;
    }
}
