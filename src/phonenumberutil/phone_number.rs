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

use std::fmt;

use super::CountryCodeSource;

/// A parsed phone number: calling code plus national significant number.
///
/// The national number is kept as a digit string, so leading zeros (as in
/// Italian fixed-line numbers) survive without extra bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: i32,
    national_number: String,
    country_code_source: CountryCodeSource,
    preferred_domestic_carrier_code: Option<String>,
    extension: Option<String>,
}

impl PhoneNumber {
    /// Builds a number from its parts. `national_number` is expected to hold
    /// ASCII digits only.
    pub fn new(country_code: i32, national_number: impl Into<String>) -> Self {
        Self {
            country_code,
            national_number: national_number.into(),
            country_code_source: CountryCodeSource::FromDefaultCountry,
            preferred_domestic_carrier_code: None,
            extension: None,
        }
    }

    /// Attaches an extension, e.g. "302" of "(530) 583-6985 x302". An empty
    /// extension is the same as none.
    pub fn with_extension(mut self, extension: Option<impl Into<String>>) -> Self {
        self.extension = extension.map(Into::into).filter(|extension: &String| !extension.is_empty());
        self
    }

    pub(crate) fn with_country_code_source(mut self, source: CountryCodeSource) -> Self {
        self.country_code_source = source;
        self
    }

    pub(crate) fn with_preferred_domestic_carrier_code(mut self, carrier_code: Option<String>) -> Self {
        self.preferred_domestic_carrier_code = carrier_code;
        self
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    /// The national significant number.
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
    }

    /// Carrier selection code found in front of the national number while
    /// parsing, e.g. "15" in Brazilian "0 15 11 2345 6789".
    pub fn preferred_domestic_carrier_code(&self) -> Option<&str> {
        self.preferred_domestic_carrier_code.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", self.country_code, self.national_number)
    }
}
