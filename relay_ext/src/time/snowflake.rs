use std::time::Duration;

/// Milliseconds between the unix epoch and the first second of 2015, which Discord counts from.
pub const DISCORD_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// The time a snowflake was minted, as a duration since the unix epoch.
#[must_use]
pub const fn snowflake_unix(snowflake: u64) -> Duration {
    Duration::from_millis((snowflake >> 22) + DISCORD_EPOCH_MILLIS)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rstest::rstest;

    #[rstest]
    #[case(0, Duration::from_millis(crate::time::snowflake::DISCORD_EPOCH_MILLIS))]
    #[case(4_194_304_000, Duration::from_millis(1_420_070_401_000))]
    #[case(175_928_847_299_117_063, Duration::from_millis(1_462_015_105_796))]
    fn snowflake_unix(#[case] input: u64, #[case] expected: Duration) {
        assert_eq!(super::snowflake_unix(input), expected);
    }
}
