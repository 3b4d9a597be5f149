pub(crate) mod helper_constants;
pub(crate) mod helper_functions;
pub mod errors;
pub mod enums;
pub mod phonenumberutil;
pub(crate) mod phone_number_regexps_and_mappings;
pub(self) mod helper_types;
mod phone_number;
mod number_classifier;
mod number_formatter;

use std::sync::LazyLock;

pub use enums::{Classification, CountryCodeSource, NumberLengthType, PhoneNumberFormat, PhoneNumberType};
pub use number_classifier::NumberClassifier;
pub use number_formatter::{FormatOptions, NumberFormatter};
pub use phone_number::PhoneNumber;
use crate::phonenumberutil::phonenumberutil::PhoneNumberUtil;

pub static PHONE_NUMBER_UTIL: LazyLock<PhoneNumberUtil> = LazyLock::new(|| {
    PhoneNumberUtil::new()
});
