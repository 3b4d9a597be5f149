// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{collections::HashMap, sync::Arc};

use regex::Regex;

use crate::{
    phonenumberutil::helper_functions::create_extn_pattern,
    phonenumberutil::helper_constants::{
        CAPTURE_UP_TO_SECOND_NUMBER_START, DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, PLUS_SIGN,
        RFC3966_VISUAL_SEPARATOR, STAR_SIGN, VALID_ALPHA, VALID_ALPHA_INCL_UPPERCASE,
        VALID_PUNCTUATION,
    },
    regexp_cache::RegexCache,
};

/// Fixed expressions and character tables used while parsing and formatting.
/// Metadata patterns are not stored here; they live in `regexp_cache`.
pub(crate) struct PhoneNumberRegExpsAndMappings {
    /// Compiled metadata patterns, shared with the matcher.
    pub regexp_cache: Arc<RegexCache>,

    /// Keypad letters (upper case) and ASCII digits mapped to digits.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Regular expression of viable phone numbers. This is location independent.
    /// Checks we have at least three leading digits, and only valid punctuation,
    /// alpha characters and digits in the phone number. The symbol 'x' is
    /// allowed here as valid punctuation since it is often used as a
    /// placeholder for carrier codes, for example in Brazilian phone numbers.
    /// We also allow multiple plus-signs at the start, and an extension at
    /// the end.
    ///
    /// The two-digit alternative lets short numbers such as "15" through, but
    /// only without punctuation.
    pub valid_phone_number_pattern: Regex,

    /// An extension at the end of the input. The first capturing group that
    /// matched holds its digits.
    pub extn_pattern: Regex,

    /// Matches when the number has at least three letters in it; such numbers
    /// are treated as vanity numbers whose letters stand for digits.
    pub valid_alpha_phone_pattern: Regex,

    /// Regular expression of acceptable characters that may start a phone number
    /// for the purposes of parsing: digits and plus signs.
    pub valid_start_char_pattern: Regex,

    pub capture_up_to_second_number_start_pattern: Regex,

    /// Trailing characters that are neither alphanumeric nor '#'.
    pub unwanted_end_char_pattern: Regex,

    /// Regular expression of groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// The first group reference of a format template. `\d` is used instead of
    /// `1` because some templates do not start with the first group.
    pub first_group_capturing_pattern: Regex,

    pub carrier_code_pattern: Regex,

    pub plus_chars_pattern: Regex,

    pub capturing_digit_pattern: Regex,

    /// Matches an international prefix that is a single literal prefix (e.g.
    /// 011 in the US, possibly with a tilde for the dial tone) rather than a
    /// pattern of alternatives.
    pub single_international_prefix: Regex,

    /// Global-number-digits of the phone-context parameter, RFC3966 syntax.
    pub rfc3966_global_number_digits_pattern: Regex,

    /// Domainname of the phone-context parameter, RFC3966 syntax.
    pub rfc3966_domainname_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn alpha_phone_mappings() -> HashMap<char, char> {
        const KEYPAD: [(&str, char); 8] = [
            ("ABC", '2'),
            ("DEF", '3'),
            ("GHI", '4'),
            ("JKL", '5'),
            ("MNO", '6'),
            ("PQRS", '7'),
            ("TUV", '8'),
            ("WXYZ", '9'),
        ];
        // IMPORTANT: only uppercase letters, callers upper-case before lookup
        let mut mappings = HashMap::with_capacity(36);
        for (letters, digit) in KEYPAD {
            for letter in letters.chars() {
                mappings.insert(letter, digit);
            }
        }
        for digit in '0'..='9' {
            mappings.insert(digit, digit);
        }
        mappings
    }

    pub fn new(regexp_cache: Arc<RegexCache>) -> Self {
        let alphanum = fast_cat::concat_str!(VALID_ALPHA_INCL_UPPERCASE, DIGITS);
        // it'll be initialized only once, so we can use slow format!
        let valid_phone_number = format!(
            "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*",
            PLUS_CHARS,
            VALID_PUNCTUATION, STAR_SIGN, DIGITS,
            VALID_PUNCTUATION, STAR_SIGN, DIGITS, VALID_ALPHA,
        );
        let extn_pattern = create_extn_pattern();
        let rfc3966_phone_digit = format!("({}|{})", DIGITS, RFC3966_VISUAL_SEPARATOR);
        let rfc3966_domainlabel = format!("[{}]+((\\-)*[{}])*", alphanum, alphanum);
        let rfc3966_toplabel = format!("[{}]+((\\-)*[{}])*", VALID_ALPHA_INCL_UPPERCASE, alphanum);

        Self {
            regexp_cache,
            alpha_phone_mappings: Self::alpha_phone_mappings(),
            // moved 2-digits pattern to an end for match full number first
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{}(?:{})?|{}{{{}}})$",
                valid_phone_number, extn_pattern, DIGITS, MIN_LENGTH_FOR_NSN
            )).unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", extn_pattern)).unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            capture_up_to_second_number_start_pattern: Regex::new(CAPTURE_UP_TO_SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            carrier_code_pattern: Regex::new("\\$CC").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            capturing_digit_pattern: Regex::new(&format!("([{}])", DIGITS)).unwrap(),
            single_international_prefix: Regex::new(
                "^[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?$",
            ).unwrap(),
            rfc3966_global_number_digits_pattern: Regex::new(&format!(
                "^\\{}{}*{}{}*$",
                PLUS_SIGN, rfc3966_phone_digit, DIGITS, rfc3966_phone_digit
            )).unwrap(),
            rfc3966_domainname_pattern: Regex::new(&format!(
                "^({}\\.)*{}\\.?$",
                rfc3966_domainlabel, rfc3966_toplabel
            )).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::regexp_cache::RegexCache;

    use super::PhoneNumberRegExpsAndMappings;

    #[test]
    fn check_regexps_are_compiling() {
        PhoneNumberRegExpsAndMappings::new(Arc::new(RegexCache::new()));
    }

    #[test]
    fn single_international_prefix_rejects_alternatives() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new(Arc::new(RegexCache::new()));
        assert!(reg_exps.single_international_prefix.is_match("011"));
        assert!(reg_exps.single_international_prefix.is_match("8~10"));
        assert!(!reg_exps.single_international_prefix.is_match("00(?:1[245])"));
    }

    #[test]
    fn valid_phone_number_pattern_allows_punctuation_and_short_digits() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new(Arc::new(RegexCache::new()));
        assert!(reg_exps.valid_phone_number_pattern.is_match("+1 (650) 253-0000"));
        assert!(reg_exps.valid_phone_number_pattern.is_match("15"));
        assert!(!reg_exps.valid_phone_number_pattern.is_match("1-5"));
        assert!(!reg_exps.valid_phone_number_pattern.is_match("abc"));
        assert!(reg_exps.valid_phone_number_pattern.is_match("650 253 0000 ext. 123"));
        assert!(reg_exps.valid_phone_number_pattern.is_match("650 253 0000;ext=123"));
    }

    #[test]
    fn extn_pattern_captures_extension_digits() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new(Arc::new(RegexCache::new()));
        let extension = |number: &str| {
            reg_exps.extn_pattern.captures(number).and_then(|captures| {
                captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .find(|group| !group.is_empty())
                    .map(|group| group.as_str().to_owned())
            })
        };
        assert_eq!(Some("302".to_owned()), extension("530) 583-6985 x302"));
        assert_eq!(Some("123".to_owned()), extension("650 253 0000 ext. 123"));
        assert_eq!(Some("1234".to_owned()), extension("650 253 0000;ext=1234"));
        assert_eq!(Some("7246433".to_owned()), extension("2034567890,,7246433"));
        assert_eq!(Some("503".to_owned()), extension("650 253 0000 - 503#"));
        assert_eq!(Some("55".to_owned()), extension("1234 5678 Ext 55"));
        // Ambiguous labels take at most nine digits.
        assert_eq!(None, extension("650 253 0000 x1234567890"));
        assert_eq!(None, extension("650 253 0000"));
    }
}
