pub mod footer;
pub mod snowflake;
