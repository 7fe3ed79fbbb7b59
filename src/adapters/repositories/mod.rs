mod pg_category_repository;
mod pg_product_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_product_repository::PgProductRepository;
