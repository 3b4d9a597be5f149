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

use strum::EnumIter;

/// Output shapes of the formatter. `International` and `National` follow
/// the per-region templates, so separators differ between regions.
///
/// A London number renders as:
/// - `E164`: `+442070313000`
/// - `International`: `+44 20 7031 3000`
/// - `National`: `020 7031 3000`
/// - `RFC3966`: `tel:+44-20-7031-3000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    E164,
    International,
    National,
    RFC3966,
}

/// Number types a region record can describe, in the order the classifier
/// tries them (`FixedLineOrMobile` and `Unknown` are derived answers).
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// Fixed-line and mobile numbers cannot be told apart from the digits,
    /// as in the NANPA regions.
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    /// The cost of the call is split between caller and recipient.
    SharedCost,
    VoIP,
    /// A number bound to a person and routed wherever they choose.
    PersonalNumber,
    Pager,
    /// Universal access number: one number routed to several offices of a
    /// company.
    UAN,
    VoiceMail,
    Unknown,
}

/// Outcome of classifying a national significant number against one region.
///
/// None of these are errors: "not a valid number" is a regular answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The length is below the nearest possible length of the region.
    TooShort,
    /// The length is above the nearest possible length of the region.
    TooLong,
    /// The length is possible but the digits do not fit the general pattern.
    Invalid,
    /// The digits fit the general pattern but no specific type.
    ValidButUnknownType,
    /// The digits fit the given type. Never [`PhoneNumberType::Unknown`].
    Valid(PhoneNumberType),
}

impl Classification {
    /// True only for a confirmed type, like `is_valid_number`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid(_))
    }

    /// The matched type, `Unknown` for every non-`Valid` outcome.
    pub fn number_type(&self) -> PhoneNumberType {
        match self {
            Classification::Valid(number_type) => *number_type,
            _ => PhoneNumberType::Unknown,
        }
    }
}

/// Where the country calling code of a parsed number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCodeSource {
    /// The number started with a plus sign, e.g. `+44 20 ...`.
    FromNumberWithPlusSign,
    /// The number started with the international dialling prefix of the
    /// default region, e.g. `011 44 20 ...` dialled from the US.
    FromNumberWithIdd,
    /// The number started with the calling code of the default region without
    /// any prefix, e.g. `44 20 ...` parsed for GB.
    FromNumberWithoutPlusSign,
    /// The calling code was taken from the default region.
    FromDefaultCountry,
}

/// Result of a successful length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    IsPossible,
    /// Too short for a full number, but dialable inside a local area without
    /// the area code.
    IsPossibleLocalOnly,
}
