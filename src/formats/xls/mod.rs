mod cell;
mod sheet;
mod table;
mod util;

#[cfg(test)] pub mod testing;

pub use self::cell::*;
pub use self::sheet::*;
pub use self::table::*;
pub use self::util::*;
