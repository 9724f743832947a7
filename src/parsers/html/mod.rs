//! HTML parsing and querying

pub mod dom;
pub mod utils;

pub use dom::{
    extract_attr, extract_content_until, extract_value, extract_values, get_by_id,
    get_node_attr, get_node_name, get_node_text, get_single, html_to_dom, merge_spaces,
    node_has_class, select, Matcher, QueryError, Step,
};
pub use utils::WHITESPACES;
