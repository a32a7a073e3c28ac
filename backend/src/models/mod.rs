pub mod climate;
pub mod identification;
pub mod observation;
pub mod region;

pub use climate::*;
pub use identification::*;
pub use observation::*;
pub use region::*;
