//! Tabs, facet selection and filtering.

mod engine;
mod page;
mod param;
mod scope;
mod state;

pub use engine::filter_products;
pub use page::{Page, PAGE_SIZE};
pub use param::resolve_category_param;
pub use scope::TabScope;
pub use state::{FilterAction, FilterState, Tab, ALL_ITEMS};
