pub mod category_repository;
pub mod product_repository;
