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

use std::{collections::HashSet, sync::Arc};

use log::{error, trace, warn};
use regex::Regex;

use super::{
    Classification, CountryCodeSource, NumberLengthType, PhoneNumber, PhoneNumberFormat,
    PhoneNumberType,
    errors::{GetExampleNumberError, MetadataError, NotANumberError, ParseError, ValidationError},
    helper_constants::{
        MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        DEFAULT_EXTN_PREFIX, NANPA_COUNTRY_CODE, PLUS_SIGN, RFC3966_EXTN_PREFIX,
        RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    },
    helper_functions::{
        extract_possible_number, get_supported_types_for_metadata, load_compiled_metadata, normalize_helper,
        prefix_number_with_country_calling_code, test_number_length, test_number_length_with_unknown_type,
    },
    helper_types::{ExtractedCountryCode, PhoneNumberWithCountryCodeSource, StrippedNationalNumber},
    number_classifier::NumberClassifier,
    number_formatter::{FormatOptions, NumberFormatter},
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    i18n::RegionCode,
    macros::owned_from_cow_or,
    metadata::{MetadataRepository, NumberFormat, PhoneMetadata},
    proto_gen::phonemetadata::PhoneMetadataCollection,
    regex_util::RegexConsume,
    regexp_cache::{InvalidRegexError, RegexCache},
};

pub struct PhoneNumberUtil {
    /// Helper class holding useful regular expressions and character mappings.
    reg_exps: Arc<PhoneNumberRegExpsAndMappings>,

    /// Validated records indexed by region and calling code.
    repository: MetadataRepository,

    classifier: NumberClassifier,

    formatter: NumberFormatter,
}

impl PhoneNumberUtil {
    /// Builds the utility from the embedded dataset. A broken dataset is a
    /// build defect, so this logs and panics instead of returning an error.
    pub(super) fn new() -> Self {
        let built = load_compiled_metadata().and_then(Self::new_for_metadata);
        match built {
            Ok(instance) => instance,
            Err(err) => {
                let err_message = format!("Could not load compiled-in metadata: {:?}", err);
                error!("{}", err_message);
                panic!("{}", err_message);
            }
        }
    }

    /// Builds the utility from any metadata collection. Every record is
    /// validated and every pattern compiled before this returns.
    pub fn new_for_metadata(metadata_collection: PhoneMetadataCollection) -> Result<Self, MetadataError> {
        let regexp_cache = Arc::new(RegexCache::with_capacity(128));
        let repository = MetadataRepository::load_all(metadata_collection, &regexp_cache)?;
        let reg_exps = Arc::new(PhoneNumberRegExpsAndMappings::new(regexp_cache.clone()));
        Ok(Self {
            classifier: NumberClassifier::with_regex_cache(regexp_cache),
            formatter: NumberFormatter::new(reg_exps.clone()),
            reg_exps,
            repository,
        })
    }

    pub fn metadata(&self) -> &MetadataRepository {
        &self.repository
    }

    pub fn classifier(&self) -> &NumberClassifier {
        &self.classifier
    }

    pub fn formatter(&self) -> &NumberFormatter {
        &self.formatter
    }

    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.repository.supported_regions().collect()
    }

    pub fn get_supported_global_network_calling_codes(&self) -> HashSet<i32> {
        self.repository.supported_global_network_calling_codes().collect()
    }

    pub fn get_supported_calling_codes(&self) -> HashSet<i32> {
        self.repository.supported_calling_codes().collect()
    }

    pub fn get_supported_types_for_region(&self, region_code: &str) -> Option<HashSet<PhoneNumberType>> {
        self.repository
            .by_region(region_code)
            .map(get_supported_types_for_metadata)
            .or_else(|| {
                warn!("Invalid or unknown region code provided: {}", region_code);
                None
            })
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        self.repository
            .by_non_geographic_code(country_calling_code)
            .map(get_supported_types_for_metadata)
            .or_else(|| {
                warn!(
                    "Unknown country calling code for a non-geographical entity provided: {}",
                    country_calling_code
                );
                None
            })
    }

    /// Parses free-form input into a [`PhoneNumber`].
    ///
    /// `default_region` is used when the number is not written in
    /// international format. It may be `None` (or unknown) only when the
    /// number starts with a plus sign.
    pub fn parse(&self, number_to_parse: &str, default_region: Option<&str>) -> Result<PhoneNumber, ParseError> {
        let number_to_parse = number_to_parse.trim();
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(NotANumberError::InputTooLong.into());
        }
        let national_number = self.build_national_number_for_parsing(number_to_parse)?;
        if Self::normalize_digits_only(&national_number).is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if !self.is_viable_phone_number(&national_number) {
            trace!("'{}' did not seem to be a phone number", national_number);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        // Check the region supplied is valid, or that the extracted number starts
        // with some sort of + sign so the number's region can be determined.
        let default_metadata = self.check_region_for_parsing(&national_number, default_region)?;

        let (national_number, extension) = self.maybe_strip_extension(&national_number);

        let extracted = match self.maybe_extract_country_code(national_number, default_metadata) {
            Ok(extracted) => extracted,
            Err(ParseError::InvalidCountryCode) => {
                // Strip the plus-char, and try again.
                let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(national_number) else {
                    return Err(ParseError::InvalidCountryCode);
                };
                let extracted = self.maybe_extract_country_code(after_plus, default_metadata)?;
                if extracted.country_code.is_none() {
                    trace!("Could not interpret numbers after plus-sign in '{}'", national_number);
                    return Err(ParseError::InvalidCountryCode);
                }
                extracted
            }
            Err(err) => return Err(err),
        };

        let (country_code, region_metadata) = match extracted.country_code {
            Some(country_code) => (country_code, self.repository.by_calling_code(country_code).ok()),
            // No calling code in the number: the default region applies, and it
            // was checked to exist above.
            None => {
                let metadata = default_metadata.ok_or(ParseError::UnrecognizedRegion)?;
                (metadata.country_code(), Some(metadata))
            }
        };

        let mut normalized_national_number = extracted.national_number;
        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        let mut carrier_code = None;
        if let Some(metadata) = region_metadata {
            if let Some(stripped) =
                self.maybe_strip_national_prefix_and_carrier_code(&normalized_national_number, metadata)
            {
                // We require that the NSN remaining after stripping the national prefix and
                // carrier code be long enough to be a possible length for the region.
                // Otherwise, we don't do the stripping, since the original number could be
                // a valid short number.
                match test_number_length_with_unknown_type(&stripped.national_number, metadata) {
                    Err(ValidationError::TooShort)
                    | Err(ValidationError::InvalidLength)
                    | Ok(NumberLengthType::IsPossibleLocalOnly) => {
                        trace!("Keeping national prefix of '{}'", normalized_national_number);
                    }
                    _ => {
                        normalized_national_number = stripped.national_number;
                        carrier_code = stripped.carrier_code;
                    }
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLongNsn);
        }
        Ok(PhoneNumber::new(country_code, normalized_national_number)
            .with_country_code_source(extracted.country_code_source)
            .with_preferred_domestic_carrier_code(carrier_code)
            .with_extension(extension))
    }

    /// Converts number_to_parse to a form that we can parse: the digits of an
    /// RFC3966 URI (phone-context prefix included), or the possible number
    /// found in free text.
    fn build_national_number_for_parsing(&self, number_to_parse: &str) -> Result<String, ParseError> {
        let mut national_number = String::with_capacity(number_to_parse.len());
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context = Self::extract_phone_context(number_to_parse, index_of_phone_context);
            if !self.is_phone_context_valid(phone_context) {
                return Err(NotANumberError::InvalidPhoneContext.into());
            }
            // If the phone context contains a phone number prefix, we need to capture
            // it, whereas domains will be ignored.
            if phone_context.starts_with(PLUS_SIGN) {
                national_number.push_str(phone_context);
            }
            // Now append everything between the "tel:" prefix and the phone-context.
            // Note we also handle the case when "tel:" is missing, as we have seen in
            // some of the phone number inputs.
            let index_of_national_number = number_to_parse
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .filter(|index| *index <= index_of_phone_context)
                .unwrap_or(0);
            national_number.push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
        } else {
            national_number.push_str(self.extract_possible_number(number_to_parse));
        }

        // Delete the isdn-subaddress and everything after it if it is present.
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            if index_of_isdn > 0 {
                national_number.truncate(index_of_isdn);
            }
        }
        Ok(national_number)
    }

    /// Returns the value of the phone-context parameter, up to the next
    /// parameter or the end of the input.
    fn extract_phone_context(number_to_parse: &str, index_of_phone_context: usize) -> &str {
        let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        let phone_context = &number_to_parse[phone_context_start..];
        match phone_context.find(';') {
            Some(phone_context_end) => &phone_context[..phone_context_end],
            None => phone_context,
        }
    }

    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        !phone_context.is_empty()
            && (self.reg_exps.rfc3966_global_number_digits_pattern.is_match(phone_context)
                || self.reg_exps.rfc3966_domainname_pattern.is_match(phone_context))
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// strips all leading characters that cannot start a phone number, trailing
    /// non-alphanumeric characters, and a second number introduced by "/x"
    /// as in "(530) 583-6985 x302/x2303". Returns an empty string when no
    /// digit or plus sign is found.
    pub fn extract_possible_number<'a>(&self, phone_number: &'a str) -> &'a str {
        extract_possible_number(&self.reg_exps, phone_number)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all: at least three digits, or exactly two without
    /// punctuation, mixed only with valid punctuation and letters.
    pub fn is_viable_phone_number(&self, phone_number: &str) -> bool {
        if phone_number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(phone_number)
    }

    /// Splits an extension such as " x302" or ";ext=302" off the end of the
    /// number. The extension is only taken when the rest is still a viable
    /// phone number.
    fn maybe_strip_extension<'a>(&self, number: &'a str) -> (&'a str, Option<&'a str>) {
        let Some(captures) = self.reg_exps.extn_pattern.captures(number) else {
            return (number, None);
        };
        let Some(extension_start) = captures.get(0).map(|matched| matched.start()) else {
            return (number, None);
        };
        let number_without_extension = &number[..extension_start];
        if !self.is_viable_phone_number(number_without_extension) {
            return (number, None);
        }
        // The only capturing groups are the digits of the extension.
        match captures.iter().skip(1).flatten().find(|group| !group.is_empty()) {
            Some(extension) => (number_without_extension, Some(extension.as_str())),
            None => (number, None),
        }
    }

    fn check_region_for_parsing(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> Result<Option<&PhoneMetadata>, ParseError> {
        let default_metadata = default_region.and_then(|region_code| {
            if !RegionCode::is_well_formed(region_code) {
                warn!("Malformed region code provided: {}", region_code);
            }
            self.repository.by_region(region_code)
        });
        if default_metadata.is_none() && !self.reg_exps.plus_chars_pattern.matches_start(number_to_parse) {
            trace!("Missing or invalid default region for '{}'", number_to_parse);
            return Err(ParseError::UnrecognizedRegion);
        }
        Ok(default_metadata)
    }

    /// Tries to extract a country calling code from a number: after a plus
    /// sign, after the IDD of the default region, or as the calling code of the
    /// default region written without any prefix. In the last case the code is
    /// only taken when the rest of the number validates better without it.
    fn maybe_extract_country_code(
        &self,
        number: &str,
        default_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode, ParseError> {
        let possible_country_idd_prefix = default_metadata.and_then(PhoneMetadata::international_prefix);
        let PhoneNumberWithCountryCodeSource { phone_number: full_number, country_code_source } =
            self.maybe_strip_international_prefix_and_normalize(number, possible_country_idd_prefix);

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd);
            }
            // If this fails, they must be using a strange country calling code that
            // we don't recognize, or that doesn't exist.
            let (country_code, national_number) =
                self.extract_country_code(&full_number).ok_or(ParseError::InvalidCountryCode)?;
            return Ok(ExtractedCountryCode {
                country_code: Some(country_code),
                national_number: national_number.to_owned(),
                country_code_source,
            });
        }

        if let Some(metadata) = default_metadata {
            let mut buf = itoa::Buffer::new();
            let default_country_code_string = buf.format(metadata.country_code());
            if let Some(potential_national_number) = full_number.strip_prefix(default_country_code_string) {
                let general_desc = metadata.general_desc();
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(potential_national_number, metadata)
                    .map(|stripped| stripped.national_number)
                    .unwrap_or_else(|| potential_national_number.to_owned());
                // If the number was not valid before but is valid now, or if it was too
                // long before, we consider the number with the country calling code
                // stripped to be a better result and keep that instead.
                let valid_only_without_code = !self.classifier.matches_pattern(&full_number, general_desc, false)
                    && self.classifier.matches_pattern(&potential_national_number, general_desc, false);
                let too_long_with_code = test_number_length_with_unknown_type(&full_number, metadata)
                    == Err(ValidationError::TooLong);
                if valid_only_without_code || too_long_with_code {
                    return Ok(ExtractedCountryCode {
                        country_code: Some(metadata.country_code()),
                        national_number: potential_national_number,
                        country_code_source: CountryCodeSource::FromNumberWithoutPlusSign,
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: None,
            national_number: full_number,
            country_code_source: CountryCodeSource::FromDefaultCountry,
        })
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    fn maybe_strip_international_prefix_and_normalize(
        &self,
        phone_number: &str,
        possible_idd_prefix: Option<&str>,
    ) -> PhoneNumberWithCountryCodeSource {
        if phone_number.is_empty() {
            return PhoneNumberWithCountryCodeSource::new(String::new(), CountryCodeSource::FromDefaultCountry);
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            // Can now normalize the rest of the number since we've consumed the "+"
            // sign at the start.
            return PhoneNumberWithCountryCodeSource::new(
                self.normalize(after_plus),
                CountryCodeSource::FromNumberWithPlusSign,
            );
        }
        // Attempt to parse the first digits as an international prefix.
        let normalized = self.normalize(phone_number);
        match possible_idd_prefix.and_then(|idd_pattern| self.parse_prefix_as_idd(idd_pattern, &normalized)) {
            Some(after_idd) => PhoneNumberWithCountryCodeSource::new(
                after_idd.to_owned(),
                CountryCodeSource::FromNumberWithIdd,
            ),
            None => PhoneNumberWithCountryCodeSource::new(normalized, CountryCodeSource::FromDefaultCountry),
        }
    }

    /// Returns the number after the IDD, if the number starts with one.
    fn parse_prefix_as_idd<'a>(&self, idd_pattern: &str, phone_number: &'a str) -> Option<&'a str> {
        let idd_regex = self.prefix_regex(idd_pattern)?;
        let idd = idd_regex.find(phone_number)?;
        let after_idd = &phone_number[idd.end()..];
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(first_digit) = self.reg_exps.capturing_digit_pattern.captures(after_idd) {
            if Self::normalize_digits_only(&first_digit[1]) == "0" {
                return None;
            }
        }
        Some(after_idd)
    }

    /// Extracts a known country calling code of one to three digits from the
    /// start of a number whose plus sign or IDD was already removed.
    fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        // Country codes do not begin with a '0'.
        if full_number.is_empty() || full_number.starts_with('0') {
            return None;
        }
        let max_length = MAX_LENGTH_COUNTRY_CODE.min(full_number.len());
        for length in 1..=max_length {
            let potential_country_code = full_number.get(..length)?.parse::<i32>().ok()?;
            if self.repository.has_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    /// Strips any national prefix (such as 0, 1) present in the number
    /// provided, applying the transform rule of the region and capturing the
    /// carrier code when the prefix pattern has groups. Returns `None` when
    /// nothing was stripped.
    fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        phone_number: &str,
        metadata: &PhoneMetadata,
    ) -> Option<StrippedNationalNumber> {
        let possible_national_prefix = metadata.national_prefix_for_parsing()?;
        if phone_number.is_empty() {
            return None;
        }
        // Attempt to parse the first digits as a national prefix.
        let prefix_regex = self.prefix_regex(possible_national_prefix)?;
        let prefix_captures = prefix_regex.captures(phone_number)?;
        let general_desc = metadata.general_desc();
        // Check if the original number is viable.
        let is_viable_original_number = self.classifier.matches_pattern(phone_number, general_desc, false);
        let num_of_groups = prefix_captures.len() - 1;
        let last_group_matched = num_of_groups > 0 && prefix_captures.get(num_of_groups).is_some();
        let first_group = || prefix_captures.get(1).map(|group| group.as_str().to_owned());

        match metadata.national_prefix_transform_rule() {
            Some(transform_rule) if last_group_matched => {
                // Check that the resultant number is still viable. If not, return.
                let transformed_number = prefix_regex.replacen(phone_number, 1, transform_rule);
                if is_viable_original_number
                    && !self.classifier.matches_pattern(&transformed_number, general_desc, false)
                {
                    return None;
                }
                Some(StrippedNationalNumber {
                    national_number: transformed_number.into_owned(),
                    carrier_code: if num_of_groups > 1 { first_group() } else { None },
                })
            }
            // Nothing was captured by the groups, or there is no transform rule:
            // just remove the national prefix.
            _ => {
                let prefix_end = prefix_captures.get(0)?.end();
                let stripped_number = &phone_number[prefix_end..];
                // If the original number was viable, and the resultant number is not,
                // we return.
                if is_viable_original_number
                    && !self.classifier.matches_pattern(stripped_number, general_desc, false)
                {
                    return None;
                }
                Some(StrippedNationalNumber {
                    national_number: stripped_number.to_owned(),
                    carrier_code: if last_group_matched { first_group() } else { None },
                })
            }
        }
    }

    fn prefix_regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        match self.reg_exps.regexp_cache.get_prefix_regex(pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                error!("Invalid regex! {}: {}", pattern, err);
                None
            }
        }
    }

    /// Converts every Unicode decimal digit to ASCII and drops everything else.
    pub fn normalize_digits_only(phone_number: &str) -> String {
        dec_from_char::normalize_decimals(phone_number)
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Replaces keypad letters with their digits, keeping every other
    /// character as it is.
    pub fn convert_alpha_characters_in_number(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, phone_number)
    }

    /// Normalizes a string of characters representing a phone number. Numbers
    /// with three or more letters are vanity numbers whose letters are mapped
    /// to keypad digits; in all other numbers letters and punctuation are
    /// dropped.
    fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            let decimals = dec_from_char::normalize_decimals(phone_number);
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, &decimals)
        } else {
            Self::normalize_digits_only(phone_number)
        }
    }

    /// Parses `raw` and classifies the result against its region. Inputs
    /// whose national number has an impossible length are answered with
    /// [`Classification::TooShort`] or [`Classification::TooLong`] instead of
    /// a parse error.
    pub fn classify(&self, raw: &str, region_hint: Option<&str>) -> Result<Classification, ParseError> {
        match self.parse(raw, region_hint) {
            Ok(phone_number) => Ok(self.classify_number(&phone_number)),
            Err(ParseError::TooLongNsn) => Ok(Classification::TooLong),
            Err(ParseError::TooShortNsn | ParseError::TooShortAfterIdd) => Ok(Classification::TooShort),
            Err(err) => Err(err),
        }
    }

    /// Classifies a parsed number. When no region of a shared calling code
    /// claims the number, it is classified against the main region of the code.
    pub fn classify_number(&self, phone_number: &PhoneNumber) -> Classification {
        let country_calling_code = phone_number.country_code();
        let region_code = self.get_region_code_for_number(phone_number);
        let metadata = match self.repository.by_region_or_calling_code(country_calling_code, region_code) {
            Some(metadata) => metadata,
            None => match self.repository.by_calling_code(country_calling_code) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("Cannot classify {}: {}", phone_number, err);
                    return Classification::Invalid;
                }
            },
        };
        self.classifier.classify(phone_number.national_number(), metadata)
    }

    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self
            .repository
            .by_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        self.classifier.number_type(phone_number.national_number(), metadata)
    }

    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. Numbers of
    /// another calling code are never valid for the region.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.repository.by_region_or_calling_code(country_code, region_code) else {
            return false;
        };
        if RegionCode::un001() != region_code && country_code != metadata.country_code() {
            // The country calling code for this number does not match that of the
            // region code.
            return false;
        }
        self.classifier
            .classify(phone_number.national_number(), metadata)
            .is_valid()
    }

    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Checks only the length of the number against its region, which is
    /// much faster than full validation.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        let country_code = phone_number.country_code();
        // Metadata cannot be missing for a known calling code.
        let metadata = self
            .repository
            .by_calling_code(country_code)
            .map_err(|_| ValidationError::InvalidCountryCode)?;
        test_number_length_with_unknown_type(phone_number.national_number(), metadata)
    }

    /// Like [`is_possible_number_with_reason`](Self::is_possible_number_with_reason),
    /// but checks the lengths of one number type. Fixed-line or mobile
    /// accepts the lengths of either.
    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        let metadata = self
            .repository
            .by_calling_code(phone_number.country_code())
            .map_err(|_| ValidationError::InvalidCountryCode)?;
        test_number_length(phone_number.national_number(), metadata, number_type)
    }

    pub fn is_possible_number_for_type(&self, phone_number: &PhoneNumber, number_type: PhoneNumberType) -> bool {
        self.is_possible_number_for_type_with_reason(phone_number, number_type).is_ok()
    }

    /// Returns the region the number belongs to: the only region of its
    /// calling code, or the first region of a shared code whose leading digits
    /// or number patterns claim it. The unknown region otherwise.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        match self.repository.regions_for_calling_code(country_calling_code) {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                RegionCode::get_unknown()
            }
            [region_code] => region_code.as_str(),
            region_codes => self.get_region_code_for_number_from_region_list(phone_number, region_codes),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> &'b str {
        let national_number = phone_number.national_number();
        for region_code in region_codes {
            let Some(metadata) = self.repository.by_region(region_code) else {
                continue;
            };
            // If leading_digits is present, use this. Otherwise, do full validation.
            if let Some(leading_digits) = metadata.leading_digits() {
                if self
                    .prefix_regex(leading_digits)
                    .is_some_and(|regex| regex.is_match(national_number))
                {
                    return region_code.as_str();
                }
            } else if self.classifier.number_type(national_number, metadata) != PhoneNumberType::Unknown {
                return region_code.as_str();
            }
        }
        RegionCode::get_unknown()
    }

    /// Returns false for numbers the region marks as not diallable from
    /// abroad. Numbers of non-geographical entities are always diallable.
    pub fn can_be_internationally_dialled(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.repository.by_region(region_code) else {
            return true;
        };
        !self
            .classifier
            .is_number_matching_desc(phone_number.national_number(), metadata.no_international_dialling())
    }

    /// Returns the region code that matches the specific country calling code.
    /// In the case of no region code being found, the unknown region code will
    /// be returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.repository
            .regions_for_calling_code(country_calling_code)
            .first()
            .map(String::as_str)
            .unwrap_or(RegionCode::get_unknown())
    }

    /// Returns the region codes sharing the calling code, main region first.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.repository.regions_for_calling_code(country_calling_code)
    }

    pub fn get_country_code_for_region(&self, region_code: &str) -> Option<i32> {
        self.repository
            .by_region(region_code)
            .map(PhoneMetadata::country_code)
            .or_else(|| {
                warn!("Invalid or unknown region code ({}) provided.", region_code);
                None
            })
    }

    /// Returns the national dialling prefix of a region, with the '~' wait
    /// marker removed if `strip_non_digits` is set.
    pub fn get_ndd_prefix_for_region(&self, region_code: &str, strip_non_digits: bool) -> Option<String> {
        let Some(metadata) = self.repository.by_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return None;
        };
        let national_prefix = metadata.national_prefix()?;
        Some(if strip_non_digits {
            national_prefix.replace('~', "")
        } else {
            national_prefix.to_owned()
        })
    }

    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.repository.is_nanpa_region(region_code)
    }

    pub fn is_mobile_number_portable_region(&self, region_code: &str) -> bool {
        match self.repository.by_region(region_code) {
            Some(metadata) => metadata.mobile_number_portable_region(),
            None => {
                warn!("Invalid or unknown region code ({}) provided.", region_code);
                false
            }
        }
    }

    pub fn get_example_number(&self, region_code: &str) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let metadata = self.repository.by_region(region_code).ok_or_else(|| {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            GetExampleNumberError::InvalidRegionCode
        })?;
        let example_number = metadata
            .desc_for_type(number_type)
            .and_then(|desc| desc.example_number())
            .ok_or(GetExampleNumberError::NoExampleNumber)?;
        Ok(self.parse(example_number, Some(region_code))?)
    }

    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let metadata = self
            .repository
            .by_non_geographic_code(country_calling_code)
            .ok_or(GetExampleNumberError::InvalidRegionCode)?;
        // Fixed-line and personal numbers are not used by non-geographical
        // entities.
        let example_number = [
            metadata.mobile(),
            metadata.toll_free(),
            metadata.shared_cost(),
            metadata.voip(),
            metadata.voicemail(),
            metadata.uan(),
            metadata.premium_rate(),
        ]
        .into_iter()
        .flatten()
        .find_map(|desc| desc.example_number())
        .ok_or(GetExampleNumberError::NoExampleNumber)?;

        let mut buf = itoa::Buffer::new();
        let international_number =
            fast_cat::concat_str!(PLUS_SIGN, buf.format(country_calling_code), example_number);
        Ok(self.parse(&international_number, None)?)
    }

    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        self.format_with_options(phone_number, number_format, &FormatOptions::default())
    }

    /// Formats a number, choosing the national variant through `options`.
    /// Numbers with an unknown calling code are returned as bare digits.
    pub fn format_with_options(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        options: &FormatOptions<'_>,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = phone_number.national_number();
        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            let mut formatted_number = national_significant_number.to_owned();
            prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
            return formatted_number;
        }
        // Note here that all NANPA formatting rules are contained by US, so we use
        // that to format NANPA numbers. The same applies to Russian Fed regions -
        // rules are contained by Russia.
        let Ok(metadata) = self.repository.by_calling_code(country_calling_code) else {
            return national_significant_number.to_owned();
        };
        let mut formatted_number = owned_from_cow_or!(
            self.formatter.format_nsn(national_significant_number, metadata, number_format, options),
            national_significant_number.to_owned()
        );
        Self::maybe_append_formatted_extension(phone_number, number_format, &mut formatted_number);
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        formatted_number
    }

    /// Appends the extension of the number, if any, with the prefix the
    /// format calls for. E164 has no room for extensions and is left alone.
    fn maybe_append_formatted_extension(
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        formatted_number: &mut String,
    ) {
        let Some(extension) = phone_number.extension() else {
            return;
        };
        match number_format {
            PhoneNumberFormat::E164 => {}
            PhoneNumberFormat::RFC3966 => {
                formatted_number.push_str(RFC3966_EXTN_PREFIX);
                formatted_number.push_str(extension);
            }
            PhoneNumberFormat::International | PhoneNumberFormat::National => {
                formatted_number.push_str(DEFAULT_EXTN_PREFIX);
                formatted_number.push_str(extension);
            }
        }
    }

    /// Formats a number with caller-supplied templates instead of the ones of
    /// its region. National prefix rules of the templates may use `$NP` for
    /// the national prefix of the region and `$FG` for the first group.
    /// Numbers no template applies to are written as bare digits.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<String, InvalidRegexError> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = phone_number.national_number();
        let Ok(metadata) = self.repository.by_calling_code(country_calling_code) else {
            return Ok(national_significant_number.to_owned());
        };
        let mut formatted_number = owned_from_cow_or!(
            self.formatter.format_nsn_by_pattern(
                national_significant_number,
                metadata,
                number_format,
                user_defined_formats,
            )?,
            national_significant_number.to_owned()
        );
        Self::maybe_append_formatted_extension(phone_number, number_format, &mut formatted_number);
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Parses `raw` and formats the result.
    pub fn format_raw(
        &self,
        raw: &str,
        region_hint: Option<&str>,
        number_format: PhoneNumberFormat,
    ) -> Result<String, ParseError> {
        let phone_number = self.parse(raw, region_hint)?;
        Ok(self.format(&phone_number, number_format))
    }

    /// National format with the given domestic carrier code, for templates
    /// that have a carrier code rule.
    pub fn format_national_number_with_carrier_code(&self, phone_number: &PhoneNumber, carrier_code: &str) -> String {
        let options = FormatOptions {
            carrier_code: Some(carrier_code),
            ..Default::default()
        };
        self.format_with_options(phone_number, PhoneNumberFormat::National, &options)
    }

    /// Like [`format_national_number_with_carrier_code`](Self::format_national_number_with_carrier_code),
    /// preferring the carrier code found while parsing.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        let carrier_code = phone_number
            .preferred_domestic_carrier_code()
            .filter(|carrier_code| !carrier_code.is_empty())
            .unwrap_or(fallback_carrier_code);
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Formats a number the way it is dialled from `region_calling_from`.
    /// NANPA numbers dialled inside NANPA and numbers dialled inside their own
    /// calling code use the national format. Everything else gets the
    /// international prefix of the calling region, or a plus sign when that
    /// region has several prefixes and no preferred one.
    pub fn format_out_of_country_calling_number(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> String {
        let Some(metadata_for_region_calling_from) = self.repository.by_region(region_calling_from) else {
            warn!("Trying to format number from invalid region {}. International formatting applied.", region_calling_from);
            return self.format(phone_number, PhoneNumberFormat::International);
        };
        let country_calling_code = phone_number.country_code();
        let national_significant_number = phone_number.national_number();
        let Ok(metadata_for_region) = self.repository.by_calling_code(country_calling_code) else {
            return national_significant_number.to_owned();
        };

        let mut buf = itoa::Buffer::new();
        let country_calling_code_str = buf.format(country_calling_code);
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                // For NANPA regions, return the national format for these regions but
                // prefix it with the country calling code.
                let national = self.format(phone_number, PhoneNumberFormat::National);
                return fast_cat::concat_str!(country_calling_code_str, " ", &national);
            }
        } else if country_calling_code == metadata_for_region_calling_from.country_code() {
            // If regions share a country calling code, the country calling code need
            // not be dialled. This also applies when dialling within a region.
            return self.format(phone_number, PhoneNumberFormat::National);
        }

        // For regions that have multiple international prefixes, the preferred one
        // is used if present. Without it the international format of the number is
        // returned, since we would not know which prefix to use.
        let international_prefix_for_formatting = metadata_for_region_calling_from
            .international_prefix()
            .filter(|prefix| self.reg_exps.single_international_prefix.is_match(prefix))
            .or_else(|| metadata_for_region_calling_from.preferred_international_prefix());

        let mut formatted_number = self
            .formatter
            .format_nsn(
                national_significant_number,
                metadata_for_region,
                PhoneNumberFormat::International,
                &FormatOptions::default(),
            )
            .into_owned();
        Self::maybe_append_formatted_extension(
            phone_number,
            PhoneNumberFormat::International,
            &mut formatted_number,
        );
        match international_prefix_for_formatting {
            Some(international_prefix) => fast_cat::concat_str!(
                international_prefix,
                " ",
                country_calling_code_str,
                " ",
                &formatted_number
            ),
            None => {
                prefix_number_with_country_calling_code(
                    country_calling_code,
                    PhoneNumberFormat::International,
                    &mut formatted_number,
                );
                formatted_number
            }
        }
    }
}
