//! Value objects - immutable types that represent domain concepts

mod locale;
mod snowflake;

pub use locale::{Locale, LocaleParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
