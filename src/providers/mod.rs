pub mod cbr;
pub mod xml;

pub use cbr::CbrProvider;
