mod account;
mod favorite;
mod money;
mod payment;

pub use account::*;
pub use favorite::*;
pub use money::*;
pub use payment::*;
