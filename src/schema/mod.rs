//! Schema registry for issue fields.
//!
//! One declarative list of field descriptors drives every view: which
//! columns the table shows, which inputs the query form offers, which rows
//! the descriptions panel lists, and how each value is interpreted.

mod descriptor;
mod registry;
mod render;

pub use descriptor::{FieldDescriptor, FieldKey, StatusKind};
pub use registry::Schema;
pub use render::{render_value, MenuItem, RenderedValue, RowAction};

#[cfg(test)]
pub use descriptor::RenderMode;
#[cfg(test)]
pub use render::Tag;
