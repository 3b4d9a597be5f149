// Copyright (C) 2013 The Libphonenumber Authors
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

use log::{error, trace, warn};

use super::ShortNumberCost;
use crate::{
    metadata::{MetadataRepository, NumberDesc, PhoneMetadata},
    phonenumberutil::{
        NumberClassifier, PhoneNumber,
        errors::MetadataError,
        helper_functions::{extract_possible_number, load_compiled_short_metadata},
        phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
        phonenumberutil::PhoneNumberUtil,
    },
    proto_gen::phonemetadata::PhoneMetadataCollection,
    regex_util::RegexConsume,
    regexp_cache::RegexCache,
};

/// In these countries, if extra digits are added to an emergency number, it no
/// longer connects to the emergency service.
const REGIONS_WHERE_EMERGENCY_NUMBERS_MUST_BE_EXACT: [&str; 3] = ["BR", "CL", "NI"];

/// Information about short phone numbers, such as emergency numbers. Short
/// numbers are always dialled locally, so every check takes the region the
/// number is dialled from.
pub struct ShortNumberInfo {
    reg_exps: Arc<PhoneNumberRegExpsAndMappings>,
    repository: MetadataRepository,
    classifier: NumberClassifier,
}

impl ShortNumberInfo {
    pub(super) fn new() -> Self {
        match load_compiled_short_metadata().and_then(Self::new_for_metadata) {
            Ok(instance) => instance,
            Err(err) => {
                let err_message = format!("Could not load compiled-in short number metadata: {:?}", err);
                error!("{}", err_message);
                panic!("{}", err_message);
            }
        }
    }

    pub fn new_for_metadata(metadata_collection: PhoneMetadataCollection) -> Result<Self, MetadataError> {
        let regexp_cache = Arc::new(RegexCache::with_capacity(64));
        let repository = MetadataRepository::load_all(metadata_collection, &regexp_cache)?;
        Ok(Self {
            reg_exps: Arc::new(PhoneNumberRegExpsAndMappings::new(regexp_cache.clone())),
            classifier: NumberClassifier::with_regex_cache(regexp_cache),
            repository,
        })
    }

    pub fn metadata(&self) -> &MetadataRepository {
        &self.repository
    }

    /// Returns the record of `region_code` when the number carries the
    /// calling code of that region.
    fn metadata_for_region_dialling_from(
        &self,
        phone_number: &PhoneNumber,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        let metadata = self.repository.by_region(region_code)?;
        (metadata.country_code() == phone_number.country_code()).then_some(metadata)
    }

    /// Checks whether a short number has a possible length for the region
    /// it is dialled from.
    pub fn is_possible_short_number_for_region(&self, phone_number: &PhoneNumber, region_dialing_from: &str) -> bool {
        self.metadata_for_region_dialling_from(phone_number, region_dialing_from)
            .is_some_and(|metadata| {
                metadata
                    .general_desc()
                    .has_possible_length(phone_number.national_number().len())
            })
    }

    /// Checks whether a short number has a possible length in any region of
    /// its calling code.
    pub fn is_possible_short_number(&self, phone_number: &PhoneNumber) -> bool {
        let length = phone_number.national_number().len();
        self.repository
            .regions_for_calling_code(phone_number.country_code())
            .iter()
            .filter_map(|region_code| self.repository.by_region(region_code))
            .any(|metadata| metadata.general_desc().has_possible_length(length))
    }

    /// Tests whether a short number matches a valid pattern in a region. Note
    /// that this doesn't verify the number is actually in use.
    pub fn is_valid_short_number_for_region(&self, phone_number: &PhoneNumber, region_dialing_from: &str) -> bool {
        let Some(metadata) = self.metadata_for_region_dialling_from(phone_number, region_dialing_from) else {
            return false;
        };
        let short_number = phone_number.national_number();
        if !self
            .classifier
            .is_number_matching_desc(short_number, Some(metadata.general_desc()))
        {
            return false;
        }
        self.classifier
            .is_number_matching_desc(short_number, metadata.short_code())
    }

    /// Tests whether a short number matches a valid pattern. If a calling code
    /// is shared by multiple regions, this returns true if it's valid in any
    /// of them.
    pub fn is_valid_short_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_codes = self
            .repository
            .regions_for_calling_code(phone_number.country_code());
        let Some(region_code) = self.get_region_code_for_short_number_from_region_list(phone_number, region_codes)
        else {
            return false;
        };
        if region_codes.len() > 1 {
            // If a matching region had been found for the phone number from among two
            // or more regions, then we have already implicitly verified its validity
            // for that region.
            return true;
        }
        self.is_valid_short_number_for_region(phone_number, region_code)
    }

    /// Gets the expected cost category of a short number when dialled from a
    /// region. The number is assumed to be valid there.
    pub fn get_expected_cost_for_region(&self, phone_number: &PhoneNumber, region_dialing_from: &str) -> ShortNumberCost {
        let Some(metadata) = self.metadata_for_region_dialling_from(phone_number, region_dialing_from) else {
            return ShortNumberCost::UnknownCost;
        };
        let short_number = phone_number.national_number();
        // The possible lengths are not present for a particular sub-type if they
        // match the general description; for this reason, we check the possible
        // lengths against the general description first to allow an early exit if
        // possible.
        if !metadata.general_desc().has_possible_length(short_number.len()) {
            return ShortNumberCost::UnknownCost;
        }
        // The cost categories are tested in order of decreasing expense, since if
        // for some reason the patterns overlap the most expensive matching cost
        // category should be returned.
        if self.classifier.is_number_matching_desc(short_number, metadata.premium_rate()) {
            return ShortNumberCost::PremiumRate;
        }
        if self.classifier.is_number_matching_desc(short_number, metadata.standard_rate()) {
            return ShortNumberCost::StandardRate;
        }
        if self.classifier.is_number_matching_desc(short_number, metadata.toll_free()) {
            return ShortNumberCost::TollFree;
        }
        if self.is_emergency_number(short_number, region_dialing_from) {
            // Emergency numbers are implicitly toll-free.
            return ShortNumberCost::TollFree;
        }
        ShortNumberCost::UnknownCost
    }

    /// Gets the expected cost category of a short number, whatever region it
    /// is dialled from. When the regions of the calling code disagree, the
    /// highest cost wins, and `UnknownCost` outranks `StandardRate`.
    pub fn get_expected_cost(&self, phone_number: &PhoneNumber) -> ShortNumberCost {
        let region_codes = self
            .repository
            .regions_for_calling_code(phone_number.country_code());
        match region_codes {
            [] => ShortNumberCost::UnknownCost,
            [region_code] => self.get_expected_cost_for_region(phone_number, region_code),
            region_codes => {
                let mut cost = ShortNumberCost::TollFree;
                for region_code in region_codes {
                    match self.get_expected_cost_for_region(phone_number, region_code) {
                        ShortNumberCost::PremiumRate => return ShortNumberCost::PremiumRate,
                        ShortNumberCost::UnknownCost => cost = ShortNumberCost::UnknownCost,
                        ShortNumberCost::StandardRate if cost != ShortNumberCost::UnknownCost => {
                            cost = ShortNumberCost::StandardRate
                        }
                        _ => {}
                    }
                }
                cost
            }
        }
    }

    fn get_region_code_for_short_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> Option<&'b str> {
        match region_codes {
            [] => None,
            [region_code] => Some(region_code.as_str()),
            region_codes => {
                let national_number = phone_number.national_number();
                region_codes
                    .iter()
                    .find(|region_code| {
                        self.repository.by_region(region_code).is_some_and(|metadata| {
                            self.classifier
                                .is_number_matching_desc(national_number, metadata.short_code())
                        })
                    })
                    .map(String::as_str)
            }
        }
    }

    /// Returns true if the given number, exactly as dialled, might be used to
    /// connect to an emergency service in the given region. Digits dialled
    /// after the emergency number still connect in most regions, so "9116666"
    /// connects to emergency services in the US.
    pub fn connects_to_emergency_number(&self, number: &str, region_code: &str) -> bool {
        self.matches_emergency_number_helper(number, region_code, true)
    }

    /// Returns true if the given number exactly matches an emergency service
    /// number in the given region.
    pub fn is_emergency_number(&self, number: &str, region_code: &str) -> bool {
        self.matches_emergency_number_helper(number, region_code, false)
    }

    fn matches_emergency_number_helper(&self, number: &str, region_code: &str, allow_prefix_match: bool) -> bool {
        let possible_number = extract_possible_number(&self.reg_exps, number);
        if self.reg_exps.plus_chars_pattern.matches_start(possible_number) {
            // Returns false if the number starts with a plus sign. We don't believe
            // dialing the country code before emergency numbers (e.g. +1911) works,
            // but later, if that proves to work, we can add additional logic here to
            // handle it.
            return false;
        }
        let Some(metadata) = self.repository.by_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return false;
        };
        let Some(emergency_desc) = metadata.emergency() else {
            return false;
        };
        let normalized_number = PhoneNumberUtil::normalize_digits_only(possible_number);
        let allow_prefix_match_for_region =
            allow_prefix_match && !REGIONS_WHERE_EMERGENCY_NUMBERS_MUST_BE_EXACT.contains(&region_code);
        // Prefix matching reaches past the declared lengths, so only exact
        // matches go through the length gate.
        let matched = if allow_prefix_match_for_region {
            self.classifier
                .matches_pattern(&normalized_number, emergency_desc, true)
        } else {
            self.classifier
                .is_number_matching_desc(&normalized_number, Some(emergency_desc))
        };
        trace!(
            "Emergency check of '{}' in {} (prefix match {}): {}",
            normalized_number, region_code, allow_prefix_match_for_region, matched
        );
        matched
    }

    /// Given a valid short number, determines whether it is carrier-specific
    /// in the region it is dialled from.
    pub fn is_carrier_specific_for_region(&self, phone_number: &PhoneNumber, region_dialing_from: &str) -> bool {
        self.matches_desc_for_region(phone_number, region_dialing_from, PhoneMetadata::carrier_specific)
    }

    /// Given a valid short number, determines whether it is carrier-specific
    /// in the region that claims it.
    pub fn is_carrier_specific(&self, phone_number: &PhoneNumber) -> bool {
        let region_codes = self
            .repository
            .regions_for_calling_code(phone_number.country_code());
        self.get_region_code_for_short_number_from_region_list(phone_number, region_codes)
            .is_some_and(|region_code| self.is_carrier_specific_for_region(phone_number, region_code))
    }

    /// Given a valid short number, determines whether it is an SMS service
    /// in the region it is dialled from.
    pub fn is_sms_service_for_region(&self, phone_number: &PhoneNumber, region_dialing_from: &str) -> bool {
        self.matches_desc_for_region(phone_number, region_dialing_from, PhoneMetadata::sms_services)
    }

    fn matches_desc_for_region(
        &self,
        phone_number: &PhoneNumber,
        region_dialing_from: &str,
        desc: impl Fn(&PhoneMetadata) -> Option<&NumberDesc>,
    ) -> bool {
        self.metadata_for_region_dialling_from(phone_number, region_dialing_from)
            .is_some_and(|metadata| {
                self.classifier
                    .is_number_matching_desc(phone_number.national_number(), desc(metadata))
            })
    }

    /// Gets a valid short number for the specified region, if there is one.
    pub fn get_example_short_number(&self, region_code: &str) -> Option<&str> {
        self.repository
            .by_region(region_code)?
            .short_code()?
            .example_number()
    }

    /// Gets a valid short number for the region and cost category.
    pub fn get_example_short_number_for_cost(&self, region_code: &str, cost: ShortNumberCost) -> Option<&str> {
        let metadata = self.repository.by_region(region_code)?;
        let desc = match cost {
            ShortNumberCost::TollFree => metadata.toll_free(),
            ShortNumberCost::StandardRate => metadata.standard_rate(),
            ShortNumberCost::PremiumRate => metadata.premium_rate(),
            // UnknownCost numbers are computed to be the default.
            ShortNumberCost::UnknownCost => None,
        };
        desc?.example_number()
    }
}
