mod shortnumberinfo;
mod interfaces;
/// This module is automatically generated from /resources/*.proto
mod proto_gen;
mod phonenumberutil;
mod metadata;
mod regexp_cache;
mod regex_based_matcher;
pub mod i18n;
pub(crate) mod regex_util;

/// Numbering plan datasets embedded into the binary.
mod generated {
    pub(crate) mod metadata;
}

/// I decided to create this module because there are many 
/// boilerplate places in the code that can be replaced with macros, 
/// the name of which will describe what is happening more 
/// clearly than a few lines of code.
mod macros;

#[cfg(test)]
mod tests;

pub use metadata::{MetadataRepository, NumberDesc, NumberFormat, PhoneMetadata, parse_collection};
pub use phonenumberutil::{
    Classification, CountryCodeSource, FormatOptions, NumberClassifier, NumberFormatter,
    NumberLengthType, PHONE_NUMBER_UTIL, PhoneNumber, PhoneNumberFormat, PhoneNumberType,
    errors, phonenumberutil::PhoneNumberUtil,
};
pub use proto_gen::phonemetadata;
pub use regexp_cache::{InvalidRegexError, RegexCache};
pub use shortnumberinfo::{SHORT_NUMBER_INFO, ShortNumberCost, ShortNumberInfo};
