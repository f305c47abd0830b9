//! INA219 bus power monitor driver

mod driver;
pub mod registers;

pub use driver::Ina219;
