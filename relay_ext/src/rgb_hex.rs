#[must_use]
pub const fn rgb_to_hex(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | (rgb[2] as u32)
}

#[must_use]
pub const fn hex_to_rgb(hex: u32) -> [u8; 3] {
    [
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    #[rstest]
    #[case([0  , 0  , 0  ], 0x00_00_00)]
    #[case([255, 255, 255], 0xFF_FF_FF)]
    #[case([46 , 204, 113], 0x2E_CC_71)]
    #[case([231, 76 , 60 ], 0xE7_4C_3C)]
    #[case([230, 126, 34 ], 0xE6_7E_22)]
    #[case([153, 170, 181], 0x99_AA_B5)]
    fn rgb_to_hex(#[case] input: [u8; 3], #[case] expected: u32) {
        assert_eq!(super::rgb_to_hex(input), expected);
    }

    #[rstest]
    #[case(0x00_00_00, [0  , 0  , 0  ])]
    #[case(0xFF_FF_FF, [255, 255, 255])]
    #[case(0x58_65_F2, [88 , 101, 242])]
    #[case(0xE6_7E_22, [230, 126, 34 ])]
    fn hex_to_rgb(#[case] input: u32, #[case] expected: [u8; 3]) {
        assert_eq!(super::hex_to_rgb(input), expected);
    }

    #[rstest]
    #[case(0x2E_CC_71)]
    #[case(0x99_AA_B5)]
    #[case(0x7B_2D_43)]
    fn hex_to_rgb_to_hex(#[case] input: u32) {
        assert_eq!(super::rgb_to_hex(super::hex_to_rgb(input)), input);
    }
}
