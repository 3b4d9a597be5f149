// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::{
    generated::metadata::{METADATA, SHORT_METADATA},
    metadata::{self, PhoneMetadata},
    proto_gen::phonemetadata::PhoneMetadataCollection,
};

use super::{
    NumberLengthType, PhoneNumberFormat, PhoneNumberType,
    errors::{MetadataError, ValidationError},
    helper_constants::{
        DIGITS, OPTIONAL_EXT_SUFFIX, PLUS_SIGN, POSSIBLE_CHARS_AFTER_EXT_LABEL,
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
    },
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};

/// Loads metadata from the embedded regular-number dataset.
pub(crate) fn load_compiled_metadata() -> Result<PhoneMetadataCollection, MetadataError> {
    metadata::parse_collection(METADATA)
}

/// Loads metadata from the embedded short-number dataset.
pub(crate) fn load_compiled_short_metadata() -> Result<PhoneMetadataCollection, MetadataError> {
    metadata::parse_collection(SHORT_METADATA)
}

/// A helper function that is used by format and format_out_of_country_calling_number.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    // we anyway allocate a new string in concatenation, so we'l do it once
    // with capacity of resulting string
    let new_str = match number_format {
        PhoneNumberFormat::National => return,
        PhoneNumberFormat::E164 => {
            fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, &*formatted_number)
        }
        PhoneNumberFormat::International => {
            fast_cat::concat_str!(PLUS_SIGN, country_calling_code_str, " ", &*formatted_number)
        }
        PhoneNumberFormat::RFC3966 => fast_cat::concat_str!(
            RFC3966_PREFIX,
            PLUS_SIGN,
            country_calling_code_str,
            "-",
            &*formatted_number
        ),
    };
    *formatted_number = new_str;
}

/// Capturing group of one to `max_length` digits of an extension.
fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    fast_cat::concat_str!("([", DIGITS, "]{1,", buf.format(max_length), "})")
}

/// Builds the pattern of extensions written after a number, such as
/// ";ext=123", " ext. 123", " x123", ",,123" or "- 503#".
///
/// The only capturing groups are the ones around the extension digits, so
/// the extension is the first group that matched.
pub(super) fn create_extn_pattern() -> String {
    // Labels that are less likely to be an extension allow fewer digits, so
    // two numbers written side by side are not read as number and extension.
    let ext_limit_after_explicit_label = 20;
    let ext_limit_after_likely_label = 15;
    let ext_limit_after_ambiguous_char = 9;
    let ext_limit_when_not_sure = 6;

    // "o" followed by a combining acute accent is accepted as well as the
    // precomposed "ó".
    let explicit_ext_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo)";
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";
    let ambiguous_separator = "[- ]+";
    // ",," auto-dials the extension once connected, and ";" pops up a dial
    // button on phones.
    let auto_dialling_and_ext_labels_found = "(?:,{2}|;)";
    // Commas may be part of the label here, so they are not separators.
    let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\\t]*";

    let rfc_extn = fast_cat::concat_str!(RFC3966_EXTN_PREFIX, &extn_digits(ext_limit_after_explicit_label));
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_explicit_label),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );
    // American numbers sometimes end the extension with a hash, as in "- 503#".
    let american_style_extn_with_suffix =
        fast_cat::concat_str!(ambiguous_separator, &extn_digits(ext_limit_when_not_sure), "#");
    let auto_dialling_extn = fast_cat::concat_str!(
        possible_separators_number_ext_label_no_comma,
        auto_dialling_and_ext_labels_found,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_likely_label),
        OPTIONAL_EXT_SUFFIX
    );
    let only_commas_extn = fast_cat::concat_str!(
        possible_separators_number_ext_label_no_comma,
        "(?:,)+",
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );

    fast_cat::concat_str!(
        &rfc_extn,
        "|",
        &explicit_extn,
        "|",
        &ambiguous_extn,
        "|",
        &american_style_extn_with_suffix,
        "|",
        &auto_dialling_extn,
        "|",
        &only_commas_extn
    )
}

/// Cuts the part of `phone_number` that may be a phone number: from the first
/// digit or plus sign, without trailing punctuation and without a second
/// number introduced by "/x".
pub(crate) fn extract_possible_number<'a>(
    reg_exps: &PhoneNumberRegExpsAndMappings,
    phone_number: &'a str,
) -> &'a str {
    let Some(start) = reg_exps.valid_start_char_pattern.find(phone_number) else {
        return "";
    };
    let mut possible_number = &phone_number[start.start()..];
    // Remove trailing non-alpha non-numerical characters.
    if let Some(trailing) = reg_exps.unwanted_end_char_pattern.find(possible_number) {
        if trailing.start() > 0 {
            possible_number = &possible_number[..trailing.start()];
        }
    }
    // Check for extra numbers at the end.
    if let Some(first_number) = reg_exps
        .capture_up_to_second_number_start_pattern
        .captures(possible_number)
        .and_then(|captures| captures.get(1))
    {
        possible_number = first_number.as_str();
    }
    possible_number
}

/// Normalizes a string of characters representing a phone number by replacing
/// all characters found in the accompanying map with the values therein, and
/// stripping all other characters if remove_non_matches is true.
///
/// Lookups are done with the upper-case form of each character, so the map
/// only needs upper-case letters.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) = normalization_replacements.get(&phone_char.to_ascii_uppercase()) {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }
    normalized_number
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(metadata: &PhoneMetadata) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Never return FIXED_LINE_OR_MOBILE (it is a convenience type, and
        // represents that a particular number type can't be
        // determined) or UNKNOWN (the non-type).
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| metadata.desc_for_type(*number_type).is_some())
        .collect()
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(crate) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    let Some(desc_for_type) = phone_metadata.desc_for_type(phone_number_type) else {
        if phone_number_type == PhoneNumberType::FixedLineOrMobile {
            // The rare case has been encountered where no fixedLine data is available
            // (true for some non-geographical entities), so we just check mobile.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        }
        // The type is not supported at all.
        return Err(ValidationError::InvalidLength);
    };
    let mut possible_lengths = desc_for_type.possible_lengths().to_vec();
    let mut local_lengths = desc_for_type.local_only_lengths().to_vec();

    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        if let Some(mobile_desc) = phone_metadata.mobile() {
            // The lists are tiny, so merging and re-sorting is cheap.
            possible_lengths.extend_from_slice(mobile_desc.possible_lengths());
            possible_lengths.sort_unstable();
            possible_lengths.dedup();
            local_lengths.extend_from_slice(mobile_desc.local_only_lengths());
            local_lengths.sort_unstable();
        }
    }

    let actual_length = phone_number.len();
    // There is never an overlap between the possible lengths and the local-only
    // lengths of well-formed data.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    // Lengths of a validated NumberDesc are never empty.
    let (Some(&minimum_length), Some(&maximum_length)) =
        (possible_lengths.first(), possible_lengths.last())
    else {
        return Err(ValidationError::InvalidLength);
    };
    if minimum_length > actual_length {
        Err(ValidationError::TooShort)
    } else if maximum_length < actual_length {
        Err(ValidationError::TooLong)
    } else if possible_lengths.binary_search(&actual_length).is_ok() {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Helper method to check a number against possible lengths for this region,
/// based on the metadata being passed in, and determine whether it matches, or
/// is too short or too long.
pub(crate) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}
