//! Application views, one per presentation mode.

mod descriptions;
mod query_form;
mod table;

pub use descriptions::render_descriptions;
pub use query_form::{QueryFormAction, QueryFormView};
pub use table::{TableAction, TableContext, TableView};
