pub mod category;
pub mod principal;
pub mod product;
