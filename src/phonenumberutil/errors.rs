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

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// Fatal problems found while loading metadata. A repository is never
/// constructed from a collection that produces one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetadataError {
    #[error("Could not decode metadata collection: {0}")]
    Malformed(String),

    #[error("Region {region} has no general description")]
    MissingGeneralDesc { region: String },

    #[error("Region {region} has no country calling code")]
    MissingCountryCode { region: String },

    #[error("Region {region}: {field} has no pattern")]
    MissingPattern { region: String, field: &'static str },

    #[error("Region {region}: {field} has no possible lengths")]
    MissingPossibleLengths { region: String, field: &'static str },

    #[error("Region {region}: {field} declares impossible length {length}")]
    InvalidPossibleLength { region: String, field: &'static str, length: i32 },

    #[error("Region {region}: lengths of {field} are not covered by the general description")]
    LengthsOutsideGeneralDesc { region: String, field: &'static str },

    #[error("Region {region} contains an invalid pattern: {source}")]
    InvalidRegex {
        region: String,
        #[source]
        source: InvalidRegexError,
    },

    #[error("Region {region} is defined more than once")]
    DuplicateRegion { region: String },

    #[error("Non-geographical calling code {0} is defined more than once")]
    DuplicateNonGeographicalCode(i32),

    #[error("Calling code {country_code} is shared by {regions} regions but {main_regions} are marked as main")]
    AmbiguousCallingCode { country_code: i32, regions: usize, main_regions: usize },
}

/// Failures of calling code lookups on a loaded repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Unknown country calling code {0}")]
    UnknownCallingCode(i32),
    #[error("Country calling code {0} has no single main region")]
    AmbiguousCallingCode(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Input contains no digits")]
    EmptyInput,
    #[error("Region could not be determined from the number or the region hint")]
    UnrecognizedRegion,
    #[error("Invalid country code")]
    InvalidCountryCode, // INVALID_COUNTRY_CODE in the java version.
    #[error("Not a number: {0}")]
    NotANumber(#[from] NotANumberError),
    #[error("Too short after idd")]
    TooShortAfterIdd,
    #[error("Too short Nsn")]
    TooShortNsn,
    #[error("Too long nsn")]
    TooLongNsn, // TOO_LONG in the java version.
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotANumberError {
    #[error("Number not matched a valid number pattern")]
    NotMatchedValidNumberPattern,
    #[error("Invalid phone context")]
    InvalidPhoneContext,
    #[error("Input is too long to be a phone number")]
    InputTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetExampleNumberError {
    #[error("Parse error: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("No example number")]
    NoExampleNumber,
    #[error("Invalid region code provided")]
    InvalidRegionCode
}

/// Possible outcomes when testing if a PhoneNumber is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The number is longer than the shortest valid numbers for this region,
    /// shorter than the longest valid numbers for this region, and does not
    /// itself have a number length that matches valid numbers for this region.
    /// This can also be returned when there are no numbers of the requested
    /// type at all for this region.
    #[error("\
    The number is longer than the shortest valid numbers for this region,\
    shorter than the longest valid numbers for this region, and does not\
    itself have a number length that matches valid numbers for this region\
    ")]
    InvalidLength,
    /// The number is longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}
