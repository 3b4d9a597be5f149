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

use protobuf::MessageField;

use crate::{
    i18n::RegionCode,
    phonenumberutil::{
        errors::MetadataError, helper_constants::MAX_LENGTH_FOR_NSN, PhoneNumberType,
    },
    proto_gen::phonemetadata as proto,
    regexp_cache::{InvalidRegexError, RegexCache},
};

/// Pattern and lengths of one number type inside a region.
///
/// A type that does not exist in a region is not represented by a
/// `NumberDesc` at all (`None` in [`PhoneMetadata`]), so an absent type can
/// never match anything, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberDesc {
    pattern: String,
    /// Sorted, deduplicated, never empty.
    possible_lengths: Vec<usize>,
    local_only_lengths: Vec<usize>,
    example_number: Option<String>,
}

impl NumberDesc {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn possible_lengths(&self) -> &[usize] {
        &self.possible_lengths
    }

    pub fn local_only_lengths(&self) -> &[usize] {
        &self.local_only_lengths
    }

    pub fn example_number(&self) -> Option<&str> {
        self.example_number.as_deref()
    }

    pub fn has_possible_length(&self, length: usize) -> bool {
        self.possible_lengths.binary_search(&length).is_ok()
    }

    /// Sub-types without their own possible lengths inherit the lengths of
    /// `general`; sub-types that declare lengths must stay within them.
    fn from_proto(
        desc: proto::PhoneNumberDesc,
        region: &str,
        field: &'static str,
        general: Option<&NumberDesc>,
    ) -> Result<Self, MetadataError> {
        let pattern = desc
            .national_number_pattern
            .filter(|pattern| !pattern.is_empty())
            .ok_or_else(|| MetadataError::MissingPattern { region: region.to_owned(), field })?;
        let declared_lengths = collect_lengths(&desc.possible_length, region, field)?;
        let local_only_lengths = collect_lengths(&desc.possible_length_local_only, region, field)?;

        let possible_lengths = match general {
            None if declared_lengths.is_empty() => {
                return Err(MetadataError::MissingPossibleLengths { region: region.to_owned(), field });
            }
            None => declared_lengths,
            Some(general) if declared_lengths.is_empty() => general.possible_lengths.clone(),
            Some(general) => {
                if !declared_lengths.iter().all(|length| general.has_possible_length(*length)) {
                    return Err(MetadataError::LengthsOutsideGeneralDesc {
                        region: region.to_owned(),
                        field,
                    });
                }
                declared_lengths
            }
        };

        Ok(Self {
            pattern,
            possible_lengths,
            local_only_lengths,
            example_number: desc.example_number.filter(|example| !example.is_empty()),
        })
    }
}

fn collect_lengths(
    lengths: &[i32],
    region: &str,
    field: &'static str,
) -> Result<Vec<usize>, MetadataError> {
    let mut collected = lengths
        .iter()
        .map(|&length| {
            usize::try_from(length)
                .ok()
                .filter(|length| (1..=MAX_LENGTH_FOR_NSN).contains(length))
                .ok_or_else(|| MetadataError::InvalidPossibleLength {
                    region: region.to_owned(),
                    field,
                    length,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    collected.sort_unstable();
    collected.dedup();
    Ok(collected)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// One formatting template of a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pattern: String,
    format: String,
    leading_digits_patterns: Vec<String>,
    national_prefix_formatting_rule: Option<String>,
    national_prefix_optional_when_formatting: bool,
    domestic_carrier_code_formatting_rule: Option<String>,
}

impl NumberFormat {
    /// Builds a template from its grouping pattern and separator template,
    /// for formatting with caller-supplied templates.
    pub fn new(pattern: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            format: format.into(),
            leading_digits_patterns: Vec::new(),
            national_prefix_formatting_rule: None,
            national_prefix_optional_when_formatting: false,
            domestic_carrier_code_formatting_rule: None,
        }
    }

    pub fn with_leading_digits_pattern(mut self, leading_digits: impl Into<String>) -> Self {
        self.leading_digits_patterns.push(leading_digits.into());
        self
    }

    /// Sets the rule applied to the first group in national format, e.g.
    /// `$NP $FG` or `($FG)`.
    pub fn with_national_prefix_formatting_rule(mut self, rule: Option<String>) -> Self {
        self.national_prefix_formatting_rule = rule.filter(|rule| !rule.is_empty());
        self
    }

    /// Grouping pattern, e.g. `(\d{3})(\d{4})`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Separator template, e.g. `$1-$2`.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn leading_digits_patterns(&self) -> &[String] {
        &self.leading_digits_patterns
    }

    /// The most detailed leading digits pattern, which is the one that decides
    /// whether the template applies.
    pub fn last_leading_digits_pattern(&self) -> Option<&str> {
        self.leading_digits_patterns.last().map(String::as_str)
    }

    pub fn national_prefix_formatting_rule(&self) -> Option<&str> {
        self.national_prefix_formatting_rule.as_deref()
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> Option<&str> {
        self.domestic_carrier_code_formatting_rule.as_deref()
    }

    fn from_proto(format: proto::NumberFormat, region: &str) -> Result<Self, MetadataError> {
        let pattern = non_empty(format.pattern).ok_or_else(|| MetadataError::MissingPattern {
            region: region.to_owned(),
            field: "number_format.pattern",
        })?;
        let template = non_empty(format.format).ok_or_else(|| MetadataError::MissingPattern {
            region: region.to_owned(),
            field: "number_format.format",
        })?;
        Ok(Self {
            pattern,
            format: template,
            leading_digits_patterns: format.leading_digits_pattern,
            national_prefix_formatting_rule: non_empty(format.national_prefix_formatting_rule),
            national_prefix_optional_when_formatting: format
                .national_prefix_optional_when_formatting
                .unwrap_or(false),
            domestic_carrier_code_formatting_rule: non_empty(
                format.domestic_carrier_code_formatting_rule,
            ),
        })
    }

    fn compile_patterns(&self, regex_cache: &RegexCache) -> Result<(), InvalidRegexError> {
        regex_cache.get_full_regex(&self.pattern)?;
        for leading_digits in &self.leading_digits_patterns {
            regex_cache.get_prefix_regex(leading_digits)?;
        }
        Ok(())
    }
}

/// Immutable numbering-plan record of one region or non-geographical entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMetadata {
    id: String,
    country_code: i32,

    general_desc: NumberDesc,
    fixed_line: Option<NumberDesc>,
    mobile: Option<NumberDesc>,
    toll_free: Option<NumberDesc>,
    premium_rate: Option<NumberDesc>,
    shared_cost: Option<NumberDesc>,
    personal_number: Option<NumberDesc>,
    voip: Option<NumberDesc>,
    pager: Option<NumberDesc>,
    uan: Option<NumberDesc>,
    voicemail: Option<NumberDesc>,
    no_international_dialling: Option<NumberDesc>,

    emergency: Option<NumberDesc>,
    short_code: Option<NumberDesc>,
    standard_rate: Option<NumberDesc>,
    carrier_specific: Option<NumberDesc>,
    sms_services: Option<NumberDesc>,

    international_prefix: Option<String>,
    preferred_international_prefix: Option<String>,
    national_prefix: Option<String>,
    national_prefix_for_parsing: Option<String>,
    national_prefix_transform_rule: Option<String>,

    same_mobile_and_fixed_line_pattern: bool,
    main_country_for_code: bool,
    leading_digits: Option<String>,
    mobile_number_portable_region: bool,

    number_formats: Vec<NumberFormat>,
    intl_number_formats: Vec<NumberFormat>,
}

impl PhoneMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn is_non_geographical(&self) -> bool {
        self.id == RegionCode::un001()
    }

    pub fn general_desc(&self) -> &NumberDesc {
        &self.general_desc
    }

    pub fn fixed_line(&self) -> Option<&NumberDesc> {
        self.fixed_line.as_ref()
    }

    pub fn mobile(&self) -> Option<&NumberDesc> {
        self.mobile.as_ref()
    }

    pub fn toll_free(&self) -> Option<&NumberDesc> {
        self.toll_free.as_ref()
    }

    pub fn premium_rate(&self) -> Option<&NumberDesc> {
        self.premium_rate.as_ref()
    }

    pub fn shared_cost(&self) -> Option<&NumberDesc> {
        self.shared_cost.as_ref()
    }

    pub fn personal_number(&self) -> Option<&NumberDesc> {
        self.personal_number.as_ref()
    }

    pub fn voip(&self) -> Option<&NumberDesc> {
        self.voip.as_ref()
    }

    pub fn pager(&self) -> Option<&NumberDesc> {
        self.pager.as_ref()
    }

    pub fn uan(&self) -> Option<&NumberDesc> {
        self.uan.as_ref()
    }

    pub fn voicemail(&self) -> Option<&NumberDesc> {
        self.voicemail.as_ref()
    }

    pub fn no_international_dialling(&self) -> Option<&NumberDesc> {
        self.no_international_dialling.as_ref()
    }

    pub fn emergency(&self) -> Option<&NumberDesc> {
        self.emergency.as_ref()
    }

    pub fn short_code(&self) -> Option<&NumberDesc> {
        self.short_code.as_ref()
    }

    pub fn standard_rate(&self) -> Option<&NumberDesc> {
        self.standard_rate.as_ref()
    }

    pub fn carrier_specific(&self) -> Option<&NumberDesc> {
        self.carrier_specific.as_ref()
    }

    pub fn sms_services(&self) -> Option<&NumberDesc> {
        self.sms_services.as_ref()
    }

    /// IDD pattern, e.g. `011` or `00(?:1[245]|...)`.
    pub fn international_prefix(&self) -> Option<&str> {
        self.international_prefix.as_deref()
    }

    /// Literal IDD to show when `international_prefix` is a pattern.
    pub fn preferred_international_prefix(&self) -> Option<&str> {
        self.preferred_international_prefix.as_deref()
    }

    pub fn national_prefix(&self) -> Option<&str> {
        self.national_prefix.as_deref()
    }

    /// Pattern stripped from the start of nationally dialled numbers. Falls
    /// back to the literal national prefix when the data has no pattern.
    pub fn national_prefix_for_parsing(&self) -> Option<&str> {
        self.national_prefix_for_parsing.as_deref()
    }

    pub fn national_prefix_transform_rule(&self) -> Option<&str> {
        self.national_prefix_transform_rule.as_deref()
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn leading_digits(&self) -> Option<&str> {
        self.leading_digits.as_deref()
    }

    pub fn mobile_number_portable_region(&self) -> bool {
        self.mobile_number_portable_region
    }

    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    pub fn intl_number_formats(&self) -> &[NumberFormat] {
        &self.intl_number_formats
    }

    /// Returns the description of the given type. `Unknown` maps to the
    /// general description and `FixedLineOrMobile` to the fixed-line one.
    pub fn desc_for_type(&self, phone_number_type: PhoneNumberType) -> Option<&NumberDesc> {
        match phone_number_type {
            PhoneNumberType::PremiumRate => self.premium_rate(),
            PhoneNumberType::TollFree => self.toll_free(),
            PhoneNumberType::Mobile => self.mobile(),
            PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => self.fixed_line(),
            PhoneNumberType::SharedCost => self.shared_cost(),
            PhoneNumberType::VoIP => self.voip(),
            PhoneNumberType::PersonalNumber => self.personal_number(),
            PhoneNumberType::Pager => self.pager(),
            PhoneNumberType::UAN => self.uan(),
            PhoneNumberType::VoiceMail => self.voicemail(),
            PhoneNumberType::Unknown => Some(self.general_desc()),
        }
    }

    fn descs(&self) -> impl Iterator<Item = &NumberDesc> {
        [
            &self.fixed_line,
            &self.mobile,
            &self.toll_free,
            &self.premium_rate,
            &self.shared_cost,
            &self.personal_number,
            &self.voip,
            &self.pager,
            &self.uan,
            &self.voicemail,
            &self.no_international_dialling,
            &self.emergency,
            &self.short_code,
            &self.standard_rate,
            &self.carrier_specific,
            &self.sms_services,
        ]
        .into_iter()
        .filter_map(Option::as_ref)
        .chain(std::iter::once(&self.general_desc))
    }

    /// Compiles every pattern of the record in the shape it is used in, so
    /// that broken patterns surface while loading instead of while matching.
    pub(crate) fn compile_patterns(&self, regex_cache: &RegexCache) -> Result<(), InvalidRegexError> {
        for desc in self.descs() {
            regex_cache.get_full_regex(desc.pattern())?;
        }
        if let Some(emergency) = &self.emergency {
            regex_cache.get_prefix_regex(emergency.pattern())?;
        }
        for format in self.number_formats.iter().chain(&self.intl_number_formats) {
            format.compile_patterns(regex_cache)?;
        }
        for prefix_pattern in [
            &self.international_prefix,
            &self.national_prefix_for_parsing,
            &self.leading_digits,
        ]
        .into_iter()
        .flatten()
        {
            regex_cache.get_prefix_regex(prefix_pattern)?;
        }
        Ok(())
    }
}

impl TryFrom<proto::PhoneMetadata> for PhoneMetadata {
    type Error = MetadataError;

    fn try_from(metadata: proto::PhoneMetadata) -> Result<Self, Self::Error> {
        let proto::PhoneMetadata {
            general_desc,
            fixed_line,
            mobile,
            toll_free,
            premium_rate,
            shared_cost,
            personal_number,
            voip,
            pager,
            uan,
            emergency,
            voicemail,
            short_code,
            standard_rate,
            carrier_specific,
            sms_services,
            no_international_dialling,
            id,
            country_code,
            international_prefix,
            preferred_international_prefix,
            national_prefix,
            national_prefix_for_parsing,
            national_prefix_transform_rule,
            same_mobile_and_fixed_line_pattern,
            number_format,
            intl_number_format,
            main_country_for_code,
            leading_digits,
            mobile_number_portable_region,
            ..
        } = metadata;

        let id = non_empty(id)
            .ok_or_else(|| MetadataError::Malformed("metadata record without id".to_owned()))?;
        let country_code = country_code
            .filter(|code| *code > 0)
            .ok_or_else(|| MetadataError::MissingCountryCode { region: id.clone() })?;
        let general_desc = general_desc
            .into_option()
            .ok_or_else(|| MetadataError::MissingGeneralDesc { region: id.clone() })
            .and_then(|desc| NumberDesc::from_proto(desc, &id, "general_desc", None))?;

        let sub_desc = |desc: MessageField<proto::PhoneNumberDesc>, field: &'static str| {
            desc.into_option()
                .map(|desc| NumberDesc::from_proto(desc, &id, field, Some(&general_desc)))
                .transpose()
        };
        let fixed_line = sub_desc(fixed_line, "fixed_line")?;
        let mobile = sub_desc(mobile, "mobile")?;
        let toll_free = sub_desc(toll_free, "toll_free")?;
        let premium_rate = sub_desc(premium_rate, "premium_rate")?;
        let shared_cost = sub_desc(shared_cost, "shared_cost")?;
        let personal_number = sub_desc(personal_number, "personal_number")?;
        let voip = sub_desc(voip, "voip")?;
        let pager = sub_desc(pager, "pager")?;
        let uan = sub_desc(uan, "uan")?;
        let voicemail = sub_desc(voicemail, "voicemail")?;
        let no_international_dialling = sub_desc(no_international_dialling, "no_international_dialling")?;
        let emergency = sub_desc(emergency, "emergency")?;
        let short_code = sub_desc(short_code, "short_code")?;
        let standard_rate = sub_desc(standard_rate, "standard_rate")?;
        let carrier_specific = sub_desc(carrier_specific, "carrier_specific")?;
        let sms_services = sub_desc(sms_services, "sms_services")?;

        let number_formats = number_format
            .into_iter()
            .map(|format| NumberFormat::from_proto(format, &id))
            .collect::<Result<Vec<_>, _>>()?;
        let intl_number_formats = intl_number_format
            .into_iter()
            .map(|format| NumberFormat::from_proto(format, &id))
            .collect::<Result<Vec<_>, _>>()?;

        let national_prefix = non_empty(national_prefix);
        let national_prefix_for_parsing =
            non_empty(national_prefix_for_parsing).or_else(|| national_prefix.clone());

        Ok(Self {
            id,
            country_code,
            general_desc,
            fixed_line,
            mobile,
            toll_free,
            premium_rate,
            shared_cost,
            personal_number,
            voip,
            pager,
            uan,
            voicemail,
            no_international_dialling,
            emergency,
            short_code,
            standard_rate,
            carrier_specific,
            sms_services,
            international_prefix: non_empty(international_prefix),
            preferred_international_prefix: non_empty(preferred_international_prefix),
            national_prefix,
            national_prefix_for_parsing,
            national_prefix_transform_rule: non_empty(national_prefix_transform_rule),
            same_mobile_and_fixed_line_pattern: same_mobile_and_fixed_line_pattern.unwrap_or(false),
            main_country_for_code: main_country_for_code.unwrap_or(false),
            leading_digits: non_empty(leading_digits),
            mobile_number_portable_region: mobile_number_portable_region.unwrap_or(false),
            number_formats,
            intl_number_formats,
        })
    }
}
