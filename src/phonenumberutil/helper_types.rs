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

use super::CountryCodeSource;

/// Digits left after an international prefix (plus sign or IDD) was
/// stripped, and how that prefix was recognised.
#[derive(Debug)]
pub(super) struct PhoneNumberWithCountryCodeSource {
    pub phone_number: String,
    pub country_code_source: CountryCodeSource,
}

impl PhoneNumberWithCountryCodeSource {
    pub fn new(phone_number: String, country_code_source: CountryCodeSource) -> Self {
        Self { phone_number, country_code_source }
    }
}

/// Result of looking for a country calling code at the start of a number.
#[derive(Debug)]
pub(super) struct ExtractedCountryCode {
    /// `None` when the number carries no calling code and the default
    /// region applies.
    pub country_code: Option<i32>,
    /// Normalized digits after the calling code (or the whole normalized
    /// number when there was none).
    pub national_number: String,
    pub country_code_source: CountryCodeSource,
}

/// National number with its national prefix removed, plus the domestic
/// carrier code captured along the way.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct StrippedNationalNumber {
    pub national_number: String,
    pub carrier_code: Option<String>,
}
