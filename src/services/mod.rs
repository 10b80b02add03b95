pub mod category_service;
pub mod enrichment;
pub mod image_service;
pub mod product_service;
pub mod shop_service;
