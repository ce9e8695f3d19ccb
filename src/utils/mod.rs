//! Shared utilities: typed value parsers.

pub mod value;

pub use value::{
    parse_bounded_int, parse_cc_algo, parse_connection_id, parse_decimal, parse_path,
    parse_text, parse_u64, MAX_BOUNDED_INT,
};
