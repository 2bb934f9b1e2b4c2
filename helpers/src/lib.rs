pub use numbers::{strict_parse_float, strict_parse_int};
pub use propercase::{PropercaseOptions, propercase, propercase_with};
pub use roman::roman_to_number;

mod numbers;
mod propercase;
mod roman;
