mod column;
mod envelope;
mod error;
pub mod locale;
mod path;
mod render;
mod schema;

pub use column::{Column, ColumnFormat, SortDirection, cell_text, compare_values, sort_records};
pub use envelope::{
    LIST_KEYS, Payload, Record, normalize, normalize_list, normalize_record, normalize_value,
};
pub use error::NormalizeError;
pub use path::FieldPath;
pub use render::{
    DisplayValue, RenderOptions, Tone, ValueKind, format_time_only, is_date_like, render_cell,
    render_cell_with,
};
pub use schema::{
    DEFAULT_SCHEMA, EXCLUDED_PATHS, PREFERRED_ORDER, Titles, build_columns, build_field_paths,
    humanize, order_paths,
};
