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

use std::{borrow::Cow, sync::Arc};

use log::error;
use regex::NoExpand;

use super::{
    PhoneNumberFormat, phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    metadata::{NumberFormat, PhoneMetadata},
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

/// Caller-selected variants of national formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions<'a> {
    /// Domestic carrier code to insert through the template's `$CC` rule.
    /// Only used in national format and only by templates that have a rule.
    pub carrier_code: Option<&'a str>,
    /// Leave out the national prefix where the template marks it optional.
    pub omit_optional_national_prefix: bool,
}

/// Renders national significant numbers with the templates of a region.
pub struct NumberFormatter {
    reg_exps: Arc<PhoneNumberRegExpsAndMappings>,
}

impl NumberFormatter {
    pub(crate) fn new(reg_exps: Arc<PhoneNumberRegExpsAndMappings>) -> Self {
        Self { reg_exps }
    }

    /// Formats `national_number` without the calling code. When no template
    /// applies, the digits are returned unchanged.
    pub fn format_nsn<'b>(
        &self,
        national_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        options: &FormatOptions<'_>,
    ) -> Cow<'b, str> {
        if number_format == PhoneNumberFormat::E164 {
            return Cow::Borrowed(national_number);
        }
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_formats().is_empty()
            || number_format == PhoneNumberFormat::National
        {
            metadata.number_formats()
        } else {
            metadata.intl_number_formats()
        };
        let formatted = self
            .choose_formatting_pattern_for_number(available_formats, national_number)
            .and_then(|formatting_pattern| match formatting_pattern {
                Some(formatting_pattern) => self.format_nsn_using_pattern(
                    national_number,
                    formatting_pattern,
                    number_format,
                    options,
                ),
                None => Ok(Cow::Borrowed(national_number)),
            });
        match formatted {
            Ok(formatted) => formatted,
            Err(err) => {
                error!("Could not format number of region {}: {}", metadata.id(), err);
                Cow::Borrowed(national_number)
            }
        }
    }

    /// Formats `national_number` with caller-supplied templates. `$NP` and
    /// `$FG` in their national prefix rules are resolved against the region;
    /// a rule is dropped when the region has no national prefix.
    pub fn format_nsn_by_pattern<'b>(
        &self,
        national_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        let Some(formatting_pattern) =
            self.choose_formatting_pattern_for_number(user_defined_formats, national_number)?
        else {
            return Ok(Cow::Borrowed(national_number));
        };
        let Some(rule) = formatting_pattern.national_prefix_formatting_rule() else {
            return self.format_nsn_using_pattern(
                national_number,
                formatting_pattern,
                number_format,
                &FormatOptions::default(),
            );
        };
        // The caller's template is shared, so the resolved rule goes on a copy.
        let resolved_rule = metadata
            .national_prefix()
            .map(|national_prefix| rule.replace("$NP", national_prefix).replace("$FG", "$1"));
        let resolved_pattern = formatting_pattern
            .clone()
            .with_national_prefix_formatting_rule(resolved_rule);
        self.format_nsn_using_pattern(
            national_number,
            &resolved_pattern,
            number_format,
            &FormatOptions::default(),
        )
    }

    /// Returns the first template whose last leading digits pattern matches
    /// the start of the number and whose grouping pattern matches all of it.
    pub fn choose_formatting_pattern_for_number<'f>(
        &self,
        available_formats: &'f [NumberFormat],
        national_number: &str,
    ) -> Result<Option<&'f NumberFormat>, InvalidRegexError> {
        let regexp_cache = &self.reg_exps.regexp_cache;
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(leading_digits) = format.last_leading_digits_pattern() {
                if !regexp_cache
                    .get_prefix_regex(leading_digits)?
                    .is_match(national_number)
                {
                    continue;
                }
            }
            if regexp_cache.get_full_regex(format.pattern())?.is_match(national_number) {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        options: &FormatOptions<'_>,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        if number_format == PhoneNumberFormat::National {
            let carrier_code = options.carrier_code.filter(|code| !code.is_empty());
            if let (Some(carrier_code), Some(carrier_code_formatting_rule)) = (
                carrier_code,
                formatting_pattern.domestic_carrier_code_formatting_rule(),
            ) {
                // Replace the $CC in the formatting rule with the desired carrier code.
                let carrier_code_formatting_rule = self
                    .reg_exps
                    .carrier_code_pattern
                    .replace(carrier_code_formatting_rule, NoExpand(carrier_code));
                number_format_rule = Cow::Owned(
                    self.reg_exps
                        .first_group_capturing_pattern
                        .replace(&number_format_rule, carrier_code_formatting_rule.as_ref())
                        .into_owned(),
                );
            } else if let Some(national_prefix_formatting_rule) =
                formatting_pattern.national_prefix_formatting_rule()
            {
                let omit_prefix = options.omit_optional_national_prefix
                    && formatting_pattern.national_prefix_optional_when_formatting();
                if !omit_prefix {
                    // Apply the national_prefix_formatting_rule as the formatting_pattern
                    // contains only information on how the national significant number
                    // should be formatted at this point.
                    number_format_rule = Cow::Owned(
                        self.reg_exps
                            .first_group_capturing_pattern
                            .replace(&number_format_rule, national_prefix_formatting_rule)
                            .into_owned(),
                    );
                }
            }
        }

        let pattern_to_match = self
            .reg_exps
            .regexp_cache
            .get_full_regex(formatting_pattern.pattern())?;
        let formatted_number = pattern_to_match.replace_all(national_number, number_format_rule.as_ref());

        if number_format != PhoneNumberFormat::RFC3966 {
            return Ok(formatted_number);
        }
        // First consume any leading punctuation, if any was present.
        let without_leading = self
            .reg_exps
            .separator_pattern
            .consume_start(&formatted_number)
            .unwrap_or(&*formatted_number);
        // Then replace all separators with a "-".
        Ok(Cow::Owned(
            self.reg_exps
                .separator_pattern
                .replace_all(without_leading, "-")
                .into_owned(),
        ))
    }
}
