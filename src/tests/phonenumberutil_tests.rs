use std::collections::HashSet;

use strum::IntoEnumIterator;

use crate::metadata::NumberFormat;
use crate::phonenumberutil::{
    Classification, CountryCodeSource, FormatOptions, NumberLengthType, PhoneNumber,
    PhoneNumberFormat, PhoneNumberType,
    errors::{GetExampleNumberError, NotANumberError, ParseError, ValidationError},
};

use super::{get_phone_util, region_code::RegionCode};

/// Compares calling code and national number, ignoring where the calling
/// code came from.
fn assert_number(country_code: i32, national_number: &str, phone_number: &PhoneNumber) {
    assert_eq!(
        (country_code, national_number),
        (phone_number.country_code(), phone_number.national_number())
    );
}

#[test]
fn interchange_invalid_codepoints() {
    let phone_util = get_phone_util();

    let valid_inputs = vec![
        "+44\u{2013}2087654321", // U+2013, EN DASH
    ];
    for input in valid_inputs {
        assert_eq!(input, dec_from_char::normalize_decimals(input));
        assert!(phone_util.is_viable_phone_number(input));
        phone_util.parse(input, Some(RegionCode::gb())).unwrap();
    }

    let invalid_inputs = vec![
        "+44\u{96}2087654321",   // Invalid sequence
        "+44\u{0096}2087654321", // U+0096
        "+44\u{fffe}2087654321", // U+FFFE
    ];
    for input in invalid_inputs {
        assert!(!phone_util.is_viable_phone_number(input));
        assert!(
            phone_util
                .parse(input, Some(RegionCode::gb()))
                .is_err_and(|err| matches!(err, ParseError::NotANumber(_)))
        );
    }
}

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    let regions = phone_util.get_supported_regions();
    assert_eq!(23, regions.len());
    assert!(regions.contains(&RegionCode::ad()));
    assert!(!regions.contains(&RegionCode::un001()));
}

#[test]
fn get_supported_global_network_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_global_network_calling_codes();
    assert_eq!(HashSet::from([800, 808, 870]), calling_codes);
    for code in calling_codes {
        assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_country_code(code));
    }
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes();
    for code in [1, 7, 39, 44, 376, 800] {
        assert!(calling_codes.contains(&code), "{code}");
    }
    // There are calling codes without any region that may not be supported.
    assert!(!calling_codes.contains(&999));
}

#[test]
fn get_supported_types_for_region() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some(HashSet::from([
            PhoneNumberType::FixedLine,
            PhoneNumberType::Mobile,
            PhoneNumberType::TollFree,
            PhoneNumberType::PremiumRate,
        ])),
        phone_util.get_supported_types_for_region(RegionCode::ad())
    );
    let us_types = phone_util.get_supported_types_for_region(RegionCode::us()).unwrap();
    // FixedLineOrMobile and Unknown are never reported.
    assert!(!us_types.contains(&PhoneNumberType::FixedLineOrMobile));
    assert!(!us_types.contains(&PhoneNumberType::Unknown));
    assert!(us_types.contains(&PhoneNumberType::PersonalNumber));

    assert_eq!(None, phone_util.get_supported_types_for_region(RegionCode::zz()));
}

#[test]
fn get_supported_types_for_non_geo_entity() {
    let phone_util = get_phone_util();
    assert_eq!(
        Some(HashSet::from([PhoneNumberType::TollFree])),
        phone_util.get_supported_types_for_non_geo_entity(800)
    );
    assert_eq!(None, phone_util.get_supported_types_for_non_geo_entity(999));
    assert_eq!(None, phone_util.get_supported_types_for_non_geo_entity(44));
}

#[test]
fn get_region_codes_for_country_calling_code() {
    let phone_util = get_phone_util();
    let nanpa = phone_util.get_region_codes_for_country_calling_code(1);
    assert_eq!(RegionCode::us(), nanpa[0]);
    assert!(nanpa.iter().any(|region| region == RegionCode::bs()));
    assert!(nanpa.iter().any(|region| region == RegionCode::ca()));

    assert_eq!(
        vec![RegionCode::ru(), RegionCode::kz()],
        phone_util.get_region_codes_for_country_calling_code(7)
    );
    assert_eq!(
        vec![RegionCode::un001()],
        phone_util.get_region_codes_for_country_calling_code(800)
    );
    assert!(phone_util.get_region_codes_for_country_calling_code(999).is_empty());
}

#[test]
fn region_helpers() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_country_code(44));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_country_code(999));

    assert_eq!(Some(41), phone_util.get_country_code_for_region(RegionCode::ch()));
    assert_eq!(Some(39), phone_util.get_country_code_for_region(RegionCode::va()));
    assert_eq!(None, phone_util.get_country_code_for_region(RegionCode::zz()));
    assert_eq!(None, phone_util.get_country_code_for_region(RegionCode::un001()));

    assert_eq!(Some("0".to_owned()), phone_util.get_ndd_prefix_for_region(RegionCode::gb(), true));
    assert_eq!(Some("8".to_owned()), phone_util.get_ndd_prefix_for_region(RegionCode::ru(), false));
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::it(), false));
    assert_eq!(None, phone_util.get_ndd_prefix_for_region(RegionCode::zz(), false));

    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::gb()));
    assert!(!phone_util.is_nanpa_country(RegionCode::zz()));

    assert!(phone_util.is_mobile_number_portable_region(RegionCode::gb()));
    assert!(!phone_util.is_mobile_number_portable_region(RegionCode::ad()));
    assert!(!phone_util.is_mobile_number_portable_region(RegionCode::zz()));
}

#[test]
fn get_example_number() {
    let phone_util = get_phone_util();

    let us_example = phone_util.get_example_number(RegionCode::us()).unwrap();
    assert_eq!(PhoneNumber::new(1, "2015550123"), us_example);
    assert!(phone_util.is_valid_number(&us_example));

    let ad_mobile = phone_util
        .get_example_number_for_type(RegionCode::ad(), PhoneNumberType::Mobile)
        .unwrap();
    assert_eq!("312345", ad_mobile.national_number());
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type(&ad_mobile));

    assert_eq!(
        Err(GetExampleNumberError::NoExampleNumber),
        phone_util.get_example_number_for_type(RegionCode::ad(), PhoneNumberType::VoIP)
    );
    let unknown_region = phone_util.get_example_number(RegionCode::zz());
    assert_eq!(Err(GetExampleNumberError::InvalidRegionCode), unknown_region);
    assert_eq!(
        "Invalid region code provided",
        unknown_region.unwrap_err().to_string()
    );
}

#[test]
fn get_example_number_for_non_geo_entity() {
    let phone_util = get_phone_util();

    let toll_free = phone_util.get_example_number_for_non_geo_entity(800).unwrap();
    assert_eq!(800, toll_free.country_code());
    assert_eq!("12345678", toll_free.national_number());
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type(&toll_free));

    let inmarsat = phone_util.get_example_number_for_non_geo_entity(870).unwrap();
    assert_eq!("301234567", inmarsat.national_number());
    assert_eq!(PhoneNumberType::Mobile, phone_util.get_number_type(&inmarsat));

    assert_eq!(
        Err(GetExampleNumberError::InvalidRegionCode),
        phone_util.get_example_number_for_non_geo_entity(44)
    );
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();

    let us_number = phone_util.parse("(650) 253-0000", Some(RegionCode::us())).unwrap();
    assert_eq!(PhoneNumber::new(1, "6502530000"), us_number);
    assert_eq!(CountryCodeSource::FromDefaultCountry, us_number.country_code_source());

    // National prefix stripped.
    let gb_number = phone_util.parse("020 7031 3000", Some(RegionCode::gb())).unwrap();
    assert_eq!(44, gb_number.country_code());
    assert_eq!("2070313000", gb_number.national_number());

    // Leading zeros belong to Italian numbers.
    let it_number = phone_util.parse("02 12345678", Some(RegionCode::it())).unwrap();
    assert_eq!("0212345678", it_number.national_number());
    assert_eq!(
        Classification::Valid(PhoneNumberType::FixedLine),
        phone_util.classify_number(&it_number)
    );

    // Regions of a shared calling code parse with their own calling code.
    let ag_number = phone_util.parse("460 1234", Some(RegionCode::ag())).unwrap();
    assert_eq!(PhoneNumber::new(1, "2684601234"), ag_number);
    assert_eq!(RegionCode::ag(), phone_util.get_region_code_for_number(&ag_number));
}

#[test]
fn parse_with_calling_code() {
    let phone_util = get_phone_util();

    let with_plus = phone_util.parse("+44 20 7031 3000", None).unwrap();
    assert_eq!("2070313000", with_plus.national_number());
    assert_eq!(CountryCodeSource::FromNumberWithPlusSign, with_plus.country_code_source());

    let with_idd = phone_util.parse("011 44 20 7031 3000", Some(RegionCode::us())).unwrap();
    assert_number(44, "2070313000", &with_idd);
    assert_eq!(CountryCodeSource::FromNumberWithIdd, with_idd.country_code_source());

    let without_plus = phone_util.parse("44 20 7031 3000", Some(RegionCode::gb())).unwrap();
    assert_eq!("2070313000", without_plus.national_number());
    assert_eq!(CountryCodeSource::FromNumberWithoutPlusSign, without_plus.country_code_source());

    // A plus sign overrides the region hint.
    let other_region = phone_util.parse("+1 650 253 0000", Some(RegionCode::gb())).unwrap();
    assert_number(1, "6502530000", &other_region);

    let toll_free = phone_util.parse("+800 1234 5678", None).unwrap();
    assert_number(800, "12345678", &toll_free);
}

#[test]
fn parse_vanity_and_rfc3966_numbers() {
    let phone_util = get_phone_util();

    let vanity = phone_util.parse("1-800-FLOWERS", Some(RegionCode::us())).unwrap();
    assert_eq!("8003569377", vanity.national_number());
    assert_eq!(PhoneNumberType::TollFree, phone_util.get_number_type(&vanity));

    assert_number(1, "6502530000", &phone_util.parse("tel:+1-650-253-0000", None).unwrap());
    assert_number(
        1,
        "6502530000",
        &phone_util.parse("tel:253-0000;phone-context=+1-650", Some(RegionCode::gb())).unwrap(),
    );
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::InvalidPhoneContext)),
        phone_util.parse("tel:253-0000;phone-context=", Some(RegionCode::us()))
    );
}

#[test]
fn parse_carrier_codes() {
    let phone_util = get_phone_util();

    let au = phone_util.parse("1831 2 1234 5678", Some(RegionCode::au())).unwrap();
    assert_eq!("212345678", au.national_number());
    assert_eq!(Some("1831"), au.preferred_domestic_carrier_code());

    let br = phone_util.parse("015 11 2345 6789", Some(RegionCode::br())).unwrap();
    assert_eq!("1123456789", br.national_number());
    assert_eq!(Some("15"), br.preferred_domestic_carrier_code());

    let cr = phone_util.parse("1900 2212 3456", Some(RegionCode::cr())).unwrap();
    assert_eq!("22123456", cr.national_number());
    assert_eq!(Some("1900"), cr.preferred_domestic_carrier_code());

    let gb = phone_util.parse("020 7031 3000", Some(RegionCode::gb())).unwrap();
    assert_eq!(None, gb.preferred_domestic_carrier_code());
}

#[test]
fn parse_errors() {
    let phone_util = get_phone_util();

    assert_eq!(Err(ParseError::EmptyInput), phone_util.parse("", Some(RegionCode::us())));
    assert_eq!(Err(ParseError::EmptyInput), phone_util.parse("   ", Some(RegionCode::us())));
    assert_eq!(Err(ParseError::EmptyInput), phone_util.parse("call me", Some(RegionCode::us())));

    assert_eq!(Err(ParseError::UnrecognizedRegion), phone_util.parse("123 456", None));
    assert_eq!(Err(ParseError::UnrecognizedRegion), phone_util.parse("123 456", Some("XX")));
    assert_eq!(Err(ParseError::UnrecognizedRegion), phone_util.parse("123 456", Some("gb")));
    assert_eq!(Err(ParseError::UnrecognizedRegion), phone_util.parse("123 456", Some(RegionCode::un001())));

    assert_eq!(Err(ParseError::InvalidCountryCode), phone_util.parse("+999 123", None));
    // Only the IDD and the calling code are left.
    assert_eq!(Err(ParseError::TooShortAfterIdd), phone_util.parse("0044", Some(RegionCode::gb())));
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::NotMatchedValidNumberPattern)),
        phone_util.parse("+44", None)
    );
    assert_eq!(Err(ParseError::TooShortNsn), phone_util.parse("+44 2", None));
    assert_eq!(
        Err(ParseError::TooLongNsn),
        phone_util.parse("+44 1234567890123456789", None)
    );

    let too_long_input = "1".repeat(300);
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::InputTooLong)),
        phone_util.parse(&too_long_input, Some(RegionCode::us()))
    );
}

#[test]
fn parse_number_with_extension() {
    let phone_util = get_phone_util();

    let number = phone_util.parse("(530) 583-6985 x302", Some(RegionCode::us())).unwrap();
    assert_number(1, "5305836985", &number);
    assert_eq!(Some("302"), number.extension());
    assert_eq!(
        Ok(Classification::Valid(PhoneNumberType::FixedLineOrMobile)),
        phone_util.classify("(530) 583-6985 x302", Some(RegionCode::us()))
    );

    // The letters of the label are not read as a vanity number.
    let number = phone_util.parse("650 253 0000 ext. 123", Some(RegionCode::us())).unwrap();
    assert_number(1, "6502530000", &number);
    assert_eq!(Some("123"), number.extension());

    let number = phone_util.parse("tel:+1-650-253-0000;ext=4567", None).unwrap();
    assert_number(1, "6502530000", &number);
    assert_eq!(Some("4567"), number.extension());

    let number = phone_util.parse("+44 20 7031 3000,,1234", None).unwrap();
    assert_number(44, "2070313000", &number);
    assert_eq!(Some("1234"), number.extension());

    let number = phone_util.parse("650 253 0000", Some(RegionCode::us())).unwrap();
    assert_eq!(None, number.extension());
}

#[test]
fn format_number_with_extension() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(1, "6502530000").with_extension(Some("123"));

    assert_eq!("(650) 253-0000 ext. 123", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!("+1 650-253-0000 ext. 123", phone_util.format(&number, PhoneNumberFormat::International));
    assert_eq!("tel:+1-650-253-0000;ext=123", phone_util.format(&number, PhoneNumberFormat::RFC3966));
    // E164 has no room for the extension.
    assert_eq!("+16502530000", phone_util.format(&number, PhoneNumberFormat::E164));
    assert_eq!(
        "00 1 650-253-0000 ext. 123",
        phone_util.format_out_of_country_calling_number(&number, RegionCode::gb())
    );

    assert_eq!(
        Ok("+1 650-253-0000 ext. 302".to_owned()),
        phone_util.format_raw("(650) 253-0000 x302", Some(RegionCode::us()), PhoneNumberFormat::International)
    );
}

#[test]
fn format_by_pattern() {
    let phone_util = get_phone_util();
    let us_number = PhoneNumber::new(1, "6502530000");

    let formats = [NumberFormat::new("(\\d{3})(\\d{3})(\\d{4})", "($1) $2-$3")];
    assert_eq!(
        Ok("(650) 253-0000".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::National, &formats)
    );
    assert_eq!(
        Ok("+1 (650) 253-0000".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::International, &formats)
    );
    assert_eq!(
        Ok("tel:+1-650-253-0000".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::RFC3966, &formats)
    );

    // Other NANPA regions follow the national prefix of the US.
    let formats = [NumberFormat::new("(\\d{3})(\\d{3})(\\d{4})", "$1 $2-$3")
        .with_national_prefix_formatting_rule(Some("$NP ($FG)".to_owned()))];
    let bs_number = PhoneNumber::new(1, "2423651234");
    assert_eq!(
        Ok("1 (242) 365-1234".to_owned()),
        phone_util.format_by_pattern(&bs_number, PhoneNumberFormat::National, &formats)
    );
    assert_eq!(
        Ok("+1 242 365-1234".to_owned()),
        phone_util.format_by_pattern(&bs_number, PhoneNumberFormat::International, &formats)
    );

    let formats = [NumberFormat::new("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3")
        .with_national_prefix_formatting_rule(Some("$NP$FG".to_owned()))];
    let gb_number = PhoneNumber::new(44, "2070313000").with_extension(Some("456"));
    assert_eq!(
        Ok("020 7031 3000 ext. 456".to_owned()),
        phone_util.format_by_pattern(&gb_number, PhoneNumberFormat::National, &formats)
    );

    // No template applies, so the digits are left alone.
    let formats = [NumberFormat::new("(\\d{2})(\\d{4})", "$1 $2")];
    assert_eq!(
        Ok("6502530000".to_owned()),
        phone_util.format_by_pattern(&us_number, PhoneNumberFormat::National, &formats)
    );

    let broken = [NumberFormat::new("(\\d{3", "$1")];
    assert!(phone_util.format_by_pattern(&us_number, PhoneNumberFormat::National, &broken).is_err());
}

#[test]
fn is_possible_number_for_type() {
    let phone_util = get_phone_util();
    let possible_for_type = |national_number: &str, number_type| {
        phone_util.is_possible_number_for_type_with_reason(&PhoneNumber::new(376, national_number), number_type)
    };

    assert_eq!(Ok(NumberLengthType::IsPossible), possible_for_type("12345678", PhoneNumberType::TollFree));
    assert_eq!(Err(ValidationError::TooShort), possible_for_type("123456", PhoneNumberType::TollFree));
    assert_eq!(Err(ValidationError::TooLong), possible_for_type("123456789", PhoneNumberType::FixedLine));
    // Fixed-line or mobile takes the lengths of both.
    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        possible_for_type("123456789", PhoneNumberType::FixedLineOrMobile)
    );
    assert_eq!(Err(ValidationError::InvalidLength), possible_for_type("12345678", PhoneNumberType::Mobile));
    // No VoIP numbers in Andorra.
    assert_eq!(Err(ValidationError::InvalidLength), possible_for_type("123456", PhoneNumberType::VoIP));

    assert!(phone_util.is_possible_number_for_type(&PhoneNumber::new(376, "123456"), PhoneNumberType::Unknown));
    assert!(!phone_util.is_possible_number_for_type(&PhoneNumber::new(999, "123456"), PhoneNumberType::Unknown));
}

#[test]
fn extract_possible_number() {
    let phone_util = get_phone_util();
    assert_eq!("0800-345-600", phone_util.extract_possible_number("Tel:0800-345-600"));
    assert_eq!("+800-345-600", phone_util.extract_possible_number("Num-+800-345-600"));
    assert_eq!("530) 583-6985 x302", phone_util.extract_possible_number("(530) 583-6985 x302/x2303"));
    assert_eq!("650) 253-0000", phone_util.extract_possible_number("650) 253-0000..- .."));
    assert_eq!("", phone_util.extract_possible_number("Num-...."));
}

#[test]
fn normalization() {
    let phone_util = get_phone_util();
    assert_eq!("03456234", crate::PhoneNumberUtil::normalize_digits_only("034-56&+a#234"));
    assert_eq!("1800 2255 4462", phone_util.convert_alpha_characters_in_number("1800 CALL GIMC"));
    assert_eq!(
        "1-800-356-9377",
        phone_util.convert_alpha_characters_in_number("1-800-FLOWERS")
    );
}

#[test]
fn classify() {
    let phone_util = get_phone_util();

    assert_eq!(
        Ok(Classification::Valid(PhoneNumberType::Mobile)),
        phone_util.classify("312345", Some(RegionCode::ad()))
    );
    assert_eq!(Ok(Classification::TooShort), phone_util.classify("3123456", Some(RegionCode::ad())));
    assert_eq!(Ok(Classification::Invalid), phone_util.classify("212345", Some(RegionCode::ad())));
    assert_eq!(
        Ok(Classification::Valid(PhoneNumberType::FixedLineOrMobile)),
        phone_util.classify("(650) 253-0000", Some(RegionCode::us()))
    );
    assert_eq!(
        Ok(Classification::Valid(PhoneNumberType::TollFree)),
        phone_util.classify("+800 1234 5678", None)
    );
    // Claimed by KZ through its leading digits, not by the main region RU.
    assert_eq!(
        Ok(Classification::Valid(PhoneNumberType::FixedLine)),
        phone_util.classify("+7 712 345 6789", None)
    );
    // No NANPA region claims the number, so the US plan decides.
    assert_eq!(Ok(Classification::Invalid), phone_util.classify("+1 1234567890", None));
    assert_eq!(Err(ParseError::UnrecognizedRegion), phone_util.classify("312345", None));
}

#[test]
fn classify_reports_impossible_lengths() {
    let phone_util = get_phone_util();

    // Eighteen digits remain after the calling code, more than any plan allows.
    assert_eq!(Ok(Classification::TooLong), phone_util.classify("1234567890123456789", Some(RegionCode::us())));
    assert_eq!(Ok(Classification::TooLong), phone_util.classify("12345678901234", Some(RegionCode::us())));
    assert_eq!(Ok(Classification::TooLong), phone_util.classify("+44 1234567890123456789", None));

    // One digit after the calling code.
    assert_eq!(Ok(Classification::TooShort), phone_util.classify("+44 2", None));
    // Nothing but the calling code after the IDD.
    assert_eq!(Ok(Classification::TooShort), phone_util.classify("0044", Some(RegionCode::gb())));

    // Inputs that are not phone numbers at all stay errors.
    assert_eq!(
        Err(ParseError::NotANumber(NotANumberError::NotMatchedValidNumberPattern)),
        phone_util.classify("1", Some(RegionCode::us()))
    );
}

#[test]
fn classify_number_with_unknown_calling_code() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(999, "12345678");
    assert_eq!(Classification::Invalid, phone_util.classify_number(&number));
    assert_eq!(PhoneNumberType::Unknown, phone_util.get_number_type(&number));
    assert!(!phone_util.is_valid_number(&number));
}

#[test]
fn toll_free_entity_is_never_bare_fixed_line_or_mobile() {
    let phone_util = get_phone_util();
    for national_number in ["12345678", "00123456", "98765432"] {
        let number_type = phone_util.get_number_type(&PhoneNumber::new(800, national_number));
        assert_eq!(PhoneNumberType::TollFree, number_type);
    }
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();

    let us_number = PhoneNumber::new(1, "6502530000");
    assert!(phone_util.is_valid_number(&us_number));
    assert!(phone_util.is_valid_number_for_region(&us_number, RegionCode::us()));
    // Wrong calling code for the region.
    assert!(!phone_util.is_valid_number_for_region(&us_number, RegionCode::gb()));

    let it_number = PhoneNumber::new(39, "0236618300");
    assert!(phone_util.is_valid_number(&it_number));

    let gb_number = PhoneNumber::new(44, "7912345678");
    assert!(phone_util.is_valid_number(&gb_number));

    let toll_free = PhoneNumber::new(800, "12345678");
    assert!(phone_util.is_valid_number(&toll_free));
    assert!(phone_util.is_valid_number_for_region(&toll_free, RegionCode::un001()));
    assert!(!phone_util.is_valid_number_for_region(&toll_free, RegionCode::us()));

    assert!(!phone_util.is_valid_number(&PhoneNumber::new(1, "2530000")));
    assert!(!phone_util.is_valid_number(&PhoneNumber::new(376, "3123456")));
}

#[test]
fn get_region_code_for_number() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_number(&PhoneNumber::new(1, "6502530000")));
    assert_eq!(RegionCode::ag(), phone_util.get_region_code_for_number(&PhoneNumber::new(1, "2684601234")));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_number(&PhoneNumber::new(44, "7912345678")));
    assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_number(&PhoneNumber::new(800, "12345678")));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&PhoneNumber::new(1, "1234567890")));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_number(&PhoneNumber::new(999, "1234567")));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();

    assert_eq!(
        Ok(NumberLengthType::IsPossible),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, "6502530000"))
    );
    assert_eq!(
        Ok(NumberLengthType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, "5550123"))
    );
    assert_eq!(
        Ok(NumberLengthType::IsPossibleLocalOnly),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(44, "1234567"))
    );
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(44, "123"))
    );
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(1, "65025300001"))
    );
    assert_eq!(
        Err(ValidationError::InvalidLength),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(376, "3123456"))
    );
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&PhoneNumber::new(999, "123456"))
    );

    assert!(phone_util.is_possible_number(&PhoneNumber::new(41, "212345678")));
    assert!(!phone_util.is_possible_number(&PhoneNumber::new(41, "2123456789")));
}

#[test]
fn can_be_internationally_dialled() {
    let phone_util = get_phone_util();
    assert!(!phone_util.can_be_internationally_dialled(&PhoneNumber::new(61, "1300123456")));
    assert!(phone_util.can_be_internationally_dialled(&PhoneNumber::new(61, "212345678")));
    assert!(phone_util.can_be_internationally_dialled(&PhoneNumber::new(1, "6502530000")));
    assert!(phone_util.can_be_internationally_dialled(&PhoneNumber::new(800, "12345678")));
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(1, "6502530000");
    assert_eq!("(650) 253-0000", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!("+1 650-253-0000", phone_util.format(&number, PhoneNumberFormat::International));
    assert_eq!("tel:+1-650-253-0000", phone_util.format(&number, PhoneNumberFormat::RFC3966));
    assert_eq!("+16502530000", phone_util.format(&number, PhoneNumberFormat::E164));
}

#[test]
fn format_gb_and_fr_numbers() {
    let phone_util = get_phone_util();

    let gb_number = PhoneNumber::new(44, "2070313000");
    assert_eq!("020 7031 3000", phone_util.format(&gb_number, PhoneNumberFormat::National));
    assert_eq!("+44 20 7031 3000", phone_util.format(&gb_number, PhoneNumberFormat::International));

    let fr_number = PhoneNumber::new(33, "801234567");
    assert_eq!("0 801 23 45 67", phone_util.format(&fr_number, PhoneNumberFormat::National));
    assert_eq!("+33 801.23.45.67", phone_util.format(&fr_number, PhoneNumberFormat::International));
    assert_eq!(
        "tel:+33-1-23-45-67-89",
        phone_util.format(&PhoneNumber::new(33, "123456789"), PhoneNumberFormat::RFC3966)
    );
}

#[test]
fn format_belize_number() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(501, "2221234");
    assert_eq!("222-1234", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!("+501 222-1234", phone_util.format(&number, PhoneNumberFormat::International));
    assert_eq!(
        Ok("222-1234".to_owned()),
        phone_util.format_raw("2221234", Some(RegionCode::bz()), PhoneNumberFormat::National)
    );
}

#[test]
fn format_raw() {
    let phone_util = get_phone_util();
    assert_eq!(
        Ok("+376312345".to_owned()),
        phone_util.format_raw("312345", Some(RegionCode::ad()), PhoneNumberFormat::E164)
    );
    assert_eq!(
        Ok("+39 02 1234 5678".to_owned()),
        phone_util.format_raw("02 12345678", Some(RegionCode::it()), PhoneNumberFormat::International)
    );
    assert_eq!(
        Err(ParseError::EmptyInput),
        phone_util.format_raw("", Some(RegionCode::it()), PhoneNumberFormat::International)
    );
}

#[test]
fn format_unknown_calling_code() {
    let phone_util = get_phone_util();
    let number = PhoneNumber::new(999, "12345");
    assert_eq!("12345", phone_util.format(&number, PhoneNumberFormat::National));
    assert_eq!("12345", phone_util.format(&number, PhoneNumberFormat::International));
    assert_eq!("+99912345", phone_util.format(&number, PhoneNumberFormat::E164));
}

#[test]
fn format_with_options() {
    let phone_util = get_phone_util();
    let ru_number = PhoneNumber::new(7, "3011234567");
    assert_eq!("8 (301) 123-45-67", phone_util.format(&ru_number, PhoneNumberFormat::National));
    assert_eq!(
        "301 123-45-67",
        phone_util.format_with_options(
            &ru_number,
            PhoneNumberFormat::National,
            &FormatOptions { omit_optional_national_prefix: true, ..Default::default() }
        )
    );
    assert_eq!("+7 301 123-45-67", phone_util.format(&ru_number, PhoneNumberFormat::International));
}

#[test]
fn format_with_carrier_code() {
    let phone_util = get_phone_util();

    let cr_number = PhoneNumber::new(506, "22123456");
    assert_eq!("1900 2212 3456", phone_util.format_national_number_with_carrier_code(&cr_number, "1900"));
    assert_eq!("2212 3456", phone_util.format_national_number_with_carrier_code(&cr_number, ""));
    assert_eq!("2212 3456", phone_util.format(&cr_number, PhoneNumberFormat::National));

    let br_number = PhoneNumber::new(55, "1123456789");
    assert_eq!("0 15 (11) 2345-6789", phone_util.format_national_number_with_carrier_code(&br_number, "15"));
    assert_eq!("(11) 2345-6789", phone_util.format(&br_number, PhoneNumberFormat::National));

    let au_number = PhoneNumber::new(61, "212345678");
    assert_eq!("1831 (2) 1234 5678", phone_util.format_national_number_with_carrier_code(&au_number, "1831"));
    assert_eq!("(02) 1234 5678", phone_util.format(&au_number, PhoneNumberFormat::National));
}

#[test]
fn format_with_preferred_carrier_code() {
    let phone_util = get_phone_util();

    let parsed = phone_util.parse("1900 2212 3456", Some(RegionCode::cr())).unwrap();
    assert_eq!(
        "1900 2212 3456",
        phone_util.format_national_number_with_preferred_carrier_code(&parsed, "1901")
    );
    let plain = PhoneNumber::new(506, "22123456");
    assert_eq!(
        "1901 2212 3456",
        phone_util.format_national_number_with_preferred_carrier_code(&plain, "1901")
    );
}

#[test]
fn format_out_of_country_calling_number() {
    let phone_util = get_phone_util();
    let us_number = PhoneNumber::new(1, "6502530000");
    let gb_number = PhoneNumber::new(44, "2070313000");

    assert_eq!("00 1 650-253-0000", phone_util.format_out_of_country_calling_number(&us_number, RegionCode::gb()));
    assert_eq!("011 44 20 7031 3000", phone_util.format_out_of_country_calling_number(&gb_number, RegionCode::us()));
    // Several IDDs, the preferred one is shown.
    assert_eq!("0011 44 20 7031 3000", phone_util.format_out_of_country_calling_number(&gb_number, RegionCode::au()));
    // Several IDDs and no preferred one.
    assert_eq!("+44 20 7031 3000", phone_util.format_out_of_country_calling_number(&gb_number, RegionCode::br()));

    assert_eq!("1 (650) 253-0000", phone_util.format_out_of_country_calling_number(&us_number, RegionCode::ca()));
    assert_eq!("020 7031 3000", phone_util.format_out_of_country_calling_number(&gb_number, RegionCode::gb()));
    assert_eq!(
        "8 (301) 123-45-67",
        phone_util.format_out_of_country_calling_number(&PhoneNumber::new(7, "3011234567"), RegionCode::kz())
    );
    assert_eq!("+44 20 7031 3000", phone_util.format_out_of_country_calling_number(&gb_number, "XX"));
}

#[test]
fn international_format_round_trips() {
    let phone_util = get_phone_util();
    let repository = phone_util.metadata();
    for region_code in repository.supported_regions() {
        for number_type in PhoneNumberType::iter() {
            if matches!(number_type, PhoneNumberType::Unknown | PhoneNumberType::FixedLineOrMobile) {
                continue;
            }
            let Ok(example) = phone_util.get_example_number_for_type(region_code, number_type) else {
                continue;
            };
            for number_format in [PhoneNumberFormat::International, PhoneNumberFormat::E164] {
                let formatted = phone_util.format(&example, number_format);
                let parsed = phone_util.parse(&formatted, None).unwrap();
                assert_number(example.country_code(), example.national_number(), &parsed);
            }
        }
    }
}
