pub mod ids;
pub mod price;
pub mod source;
