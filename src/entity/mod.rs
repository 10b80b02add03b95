pub mod categories;
pub mod product_images;
pub mod sellers;

pub use categories::Entity as Categories;
pub use product_images::Entity as ProductImages;
pub use sellers::Entity as Sellers;
