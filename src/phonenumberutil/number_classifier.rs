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

use std::sync::Arc;

use log::trace;

use super::{Classification, PhoneNumberType};
use crate::{
    interfaces::MatcherApi,
    metadata::{NumberDesc, PhoneMetadata},
    regex_based_matcher::RegexBasedMatcher,
    regexp_cache::RegexCache,
};

/// Types tried after fixed line and mobile, in priority order.
const SECONDARY_TYPES: [PhoneNumberType; 8] = [
    PhoneNumberType::TollFree,
    PhoneNumberType::PremiumRate,
    PhoneNumberType::SharedCost,
    PhoneNumberType::VoIP,
    PhoneNumberType::PersonalNumber,
    PhoneNumberType::Pager,
    PhoneNumberType::UAN,
    PhoneNumberType::VoiceMail,
];

/// Decides what a national significant number is within one region.
///
/// Lengths are always checked before any pattern, so numbers of an
/// impossible length never reach the regex engine.
pub struct NumberClassifier {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,
}

impl NumberClassifier {
    pub(crate) fn new(matcher_api: Box<dyn MatcherApi>) -> Self {
        Self { matcher_api }
    }

    /// Classifier backed by [`RegexBasedMatcher`] over `regex_cache`.
    pub fn with_regex_cache(regex_cache: Arc<RegexCache>) -> Self {
        Self::new(Box::new(RegexBasedMatcher::new(regex_cache)))
    }

    pub fn classify(&self, national_number: &str, metadata: &PhoneMetadata) -> Classification {
        let general_desc = metadata.general_desc();
        if let Some(length_verdict) = Self::check_length(national_number.len(), general_desc) {
            trace!(
                "Number '{national_number}' has impossible length for {}: {:?}",
                metadata.id(),
                length_verdict
            );
            return length_verdict;
        }
        if !self.matcher_api.match_national_number(national_number, general_desc, false) {
            trace!("Number '{national_number}' doesn't match general national number pattern of {}", metadata.id());
            return Classification::Invalid;
        }

        let same_pattern = metadata.same_mobile_and_fixed_line_pattern();
        if self.is_number_matching_desc(national_number, metadata.fixed_line()) {
            if same_pattern {
                trace!("Number '{national_number}': fixed-line and mobile patterns equal, number is fixed-line or mobile");
                return Classification::Valid(PhoneNumberType::FixedLineOrMobile);
            }
            if self.is_number_matching_desc(national_number, metadata.mobile()) {
                trace!("Number '{national_number}': fixed-line and mobile patterns differ, but number is still fixed-line or mobile");
                return Classification::Valid(PhoneNumberType::FixedLineOrMobile);
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return Classification::Valid(PhoneNumberType::FixedLine);
        }
        if self.is_number_matching_desc(national_number, metadata.mobile()) {
            if same_pattern {
                trace!("Number '{national_number}': mobile pattern is shared with fixed-line, number is fixed-line or mobile");
                return Classification::Valid(PhoneNumberType::FixedLineOrMobile);
            }
            trace!("Number '{national_number}' is a mobile number.");
            return Classification::Valid(PhoneNumberType::Mobile);
        }

        for number_type in SECONDARY_TYPES {
            if self.is_number_matching_desc(national_number, metadata.desc_for_type(number_type)) {
                trace!("Number '{national_number}' is of type {:?}", number_type);
                return Classification::Valid(number_type);
            }
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        Classification::ValidButUnknownType
    }

    /// The `Unknown`-returning form of [`classify`](Self::classify).
    pub fn number_type(&self, national_number: &str, metadata: &PhoneMetadata) -> PhoneNumberType {
        self.classify(national_number, metadata).number_type()
    }

    /// Whether the number has one of the lengths of `number_desc` and fully
    /// matches its pattern. An absent description never matches.
    pub fn is_number_matching_desc(&self, national_number: &str, number_desc: Option<&NumberDesc>) -> bool {
        let Some(number_desc) = number_desc else {
            return false;
        };
        number_desc.has_possible_length(national_number.len())
            && self.matcher_api.match_national_number(national_number, number_desc, false)
    }

    /// Raw pattern check without the length gate.
    pub(crate) fn matches_pattern(&self, national_number: &str, number_desc: &NumberDesc, allow_prefix_match: bool) -> bool {
        self.matcher_api.match_national_number(national_number, number_desc, allow_prefix_match)
    }

    /// `None` when `length` is a possible length of `general_desc`. Otherwise
    /// the nearest declared length decides; ties are reported as too short.
    fn check_length(length: usize, general_desc: &NumberDesc) -> Option<Classification> {
        if general_desc.has_possible_length(length) {
            return None;
        }
        let lengths = general_desc.possible_lengths();
        let index = lengths.partition_point(|possible| *possible < length);
        let shorter = index.checked_sub(1).map(|i| lengths[i]);
        let longer = lengths.get(index).copied();
        Some(match (shorter, longer) {
            (None, _) => Classification::TooShort,
            (Some(_), None) => Classification::TooLong,
            (Some(shorter), Some(longer)) if length - shorter < longer - length => Classification::TooLong,
            (Some(_), Some(_)) => Classification::TooShort,
        })
    }
}
