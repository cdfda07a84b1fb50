//! Small shared helpers: input validation and sample data.

pub mod alias;
pub mod sample;
pub mod url_check;

pub use alias::validate_custom_alias;
pub use url_check::validate_original_url;
