pub mod health_controller;
pub mod product_controller;
