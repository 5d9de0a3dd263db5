//! SVG markup normalization for inline data URIs.

mod transform;

pub use transform::{
    DATA_URI_PREFIX, css_url, data_uri, remove_line_breaks, strip_root_dimensions,
    transform_markup,
};
