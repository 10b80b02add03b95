pub mod composer;
pub mod params;

pub use composer::{ComposedQuery, SqlArg, compose};
pub use params::{
    Availability, ProductQueryParams, ProductSort, ProductType, Recommendation, SortOrder,
};
