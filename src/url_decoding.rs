//! Lenient percent-decoding for `application/x-www-form-urlencoded` values.
//!
//! Invalid escapes are never an error. A `%` that isn't followed by two hex digits is copied
//! through verbatim and scanning carries on after it.

const INVALID: u8 = 0xFF;

/// Maps every byte to its hex digit value, or `INVALID` if it isn't one of `0-9a-fA-F`.
pub const HEX_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;

    while i < 256 {
        let byte = i as u8;

        table[i] = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => INVALID,
        };

        i += 1;
    }

    table
};

/// Looks up the value of a single hex digit.
#[inline]
pub const fn hex_value(byte: u8) -> Option<u8> {
    match HEX_TABLE[byte as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Combines two hex digits into the byte they encode. Returns `None` if either isn't a hex digit.
#[inline]
pub const fn hex_to_byte(hi: u8, lo: u8) -> Option<u8> {
    let Some(high) = hex_value(hi) else {
        return None;
    };

    let Some(low) = hex_value(lo) else {
        return None;
    };

    Some((high << 4) | low)
}

/// Decodes a single value fragment.
///
/// Every `+` becomes a space first, then each valid `%XX` escape is replaced with the character
/// whose scalar value is the escaped byte. A `+` produced by `%2B` is therefore kept as is.
///
/// Each escape yields exactly one character, so `%C3%A9` decodes to `"Ã©"` rather than `"é"`.
pub fn decode(fragment: &str) -> String {
    let plain = fragment.replace('+', " ");

    // Too short to hold an escape
    if plain.chars().count() <= 2 {
        return plain;
    }

    let bytes = plain.as_bytes();
    let mut decoded = String::with_capacity(plain.len());

    // Start of the literal run not yet copied into `decoded`
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        // Truncated escape, nothing after this can decode
        if i + 2 >= bytes.len() {
            break;
        }

        match hex_to_byte(bytes[i + 1], bytes[i + 2]) {
            Some(byte) => {
                decoded.push_str(&plain[start..i]);
                decoded.push(char::from(byte));

                i += 3;
                start = i;
            }

            None => {
                log::trace!("leaving invalid escape at offset {i} undecoded");

                i += 1;
            }
        }
    }

    decoded.push_str(&plain[start..]);

    decoded
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_classifies_hex_digits() {
        for (i, value) in HEX_TABLE.iter().enumerate() {
            let byte = i as u8;

            if byte.is_ascii_hexdigit() {
                assert_eq!(
                    Some(*value as u32),
                    (byte as char).to_digit(16),
                    "byte {byte:#04x}"
                );
            } else {
                assert_eq!(*value, INVALID, "byte {byte:#04x}");
            }
        }
    }

    #[test]
    fn every_escape_decodes_to_its_byte() {
        let digits = b"0123456789abcdefABCDEF";

        for &hi in digits {
            for &lo in digits {
                let encoded = format!("%{}{}", hi as char, lo as char);

                let expected = (hi as char).to_digit(16).unwrap() * 16
                    + (lo as char).to_digit(16).unwrap();

                let decoded = decode(&encoded);
                let mut chars = decoded.chars();

                assert_eq!(chars.next().map(u32::from), Some(expected), "{encoded}");
                assert_eq!(chars.next(), None, "{encoded}");
            }
        }
    }

    #[test]
    fn plus_and_escaped_plus() {
        assert_eq!(decode("a+b"), "a b");
        assert_eq!(decode("a%2Bb"), "a+b");
        assert_eq!(decode("+%2B+"), " + ");
    }

    #[test]
    fn short_fragments() {
        assert_eq!(decode(""), "");
        assert_eq!(decode("+"), " ");
        assert_eq!(decode("++"), "  ");
        assert_eq!(decode("ab"), "ab");
    }

    #[test]
    fn truncated_escape_is_untouched() {
        assert_eq!(decode("%"), "%");
        assert_eq!(decode("%4"), "%4");
        assert_eq!(decode("ab%"), "ab%");
        assert_eq!(decode("ab%4"), "ab%4");
        assert_eq!(decode("%41%4"), "A%4");
    }

    #[test]
    fn invalid_escape_is_skipped() {
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%zz%41"), "%zzA");
        assert_eq!(decode("%4z%41"), "%4zA");
        assert_eq!(decode("%%41"), "%A");
        assert_eq!(decode("100%"), "100%");
    }

    #[test]
    fn decodes_exactly_once() {
        let once = decode("%2525");
        assert_eq!(once, "%25");

        let twice = decode(&once);
        assert_eq!(twice, "%");
    }

    #[test]
    fn escape_is_one_character() {
        assert_eq!(decode("%C3%A9"), "\u{c3}\u{a9}");
        assert_eq!(decode("caf%E9"), "café");
    }

    #[test]
    fn multibyte_text_is_kept() {
        assert_eq!(decode("héllo+wörld%21"), "héllo wörld!");
        assert_eq!(decode("%é"), "%é");
        assert_eq!(decode("日本%20語"), "日本 語");
    }
}
