pub mod rgb_hex;
pub mod time;

pub use self::time::{footer::footer as footer_time, snowflake::snowflake_unix};
