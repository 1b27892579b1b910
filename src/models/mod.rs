pub mod crop;
pub mod inputs;
pub mod month;
pub mod recommendation;
pub mod soil;

pub use crop::*;
pub use inputs::*;
pub use month::Month;
pub use recommendation::*;
pub use soil::SoilType;
