pub mod discord {
    pub const MAX_EMBEDS: usize = 10;
    pub const COMPONENT_TYPE_TEXT_SELECT_MENU: u8 = 3;
}

pub mod misc {
    use std::time::Duration;

    pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(120);
    pub const RESULT_NOTICE_LIFETIME: Duration = Duration::from_secs(10);
    pub const PROMPT_CUSTOM_ID_PREFIX: &str = "relay:prompt:";
    pub const PROMPT_CUSTOM_ID_SUFFIX_LEN: usize = 12;
}

pub mod colours {
    use relay_ext::rgb_hex::rgb_to_hex;

    pub const GREEN: u32 = rgb_to_hex([46, 204, 113]);
    pub const RED: u32 = rgb_to_hex([231, 76, 60]);
    pub const ORANGE: u32 = rgb_to_hex([230, 126, 34]);
    pub const GREYPLE: u32 = rgb_to_hex([153, 170, 181]);
}

pub mod text {
    pub const PROMPT_TITLE: &str = "Confirmation Needed";
    pub const CONFIRMED: &str = "Confirmed: ✅";
    pub const DENIED: &str = "Not Confirmed: ❌";
    pub const EXPIRED: &str = "Not Confirmed: Took too long";
    pub const CANCELED: &str = "Not Confirmed: Canceled";
    pub const TOOK_TOO_LONG: &str = "Took too long";
    pub const WAIT_FAILED: &str = "An error occurred, please try again.";
    pub const SUCCESS_TITLE: &str = "Success!";
    pub const ERROR_TITLE: &str = "Error!";
}

pub mod emoji {
    pub const YES: &str = "✔️";
    pub const NO: &str = "✖️";
}
