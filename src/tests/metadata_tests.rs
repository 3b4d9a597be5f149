use std::collections::HashSet;

use crate::{
    PhoneNumberType,
    phonenumberutil::{
        errors::{LookupError, MetadataError},
        phonenumberutil::PhoneNumberUtil,
    },
    metadata::parse_collection,
};

use super::{get_repository, load_fixture, region_code::RegionCode};

const VALID_FIXTURE: &str = r#"
metadata {
  id: "XA"
  country_code: 999
  national_prefix: "0"
  general_desc {
    national_number_pattern: "[2-9]\\d{4}"
    possible_length: 5
  }
  fixed_line {
    national_number_pattern: "[2-9]\\d{4}"
    example_number: "21234"
  }
  mobile {
    national_number_pattern: "[5-9]\\d{4}"
    example_number: "51234"
  }
}
"#;

#[test]
fn by_calling_code_returns_main_region() {
    let repository = get_repository();
    assert_eq!(RegionCode::us(), repository.by_calling_code(1).unwrap().id());
    assert_eq!(RegionCode::ru(), repository.by_calling_code(7).unwrap().id());
    assert_eq!(RegionCode::it(), repository.by_calling_code(39).unwrap().id());
    // Single region codes resolve without a main flag.
    assert_eq!(RegionCode::gb(), repository.by_calling_code(44).unwrap().id());

    let toll_free = repository.by_calling_code(800).unwrap();
    assert_eq!(RegionCode::un001(), toll_free.id());
    assert_eq!(800, toll_free.country_code());
}

#[test]
fn by_calling_code_unknown_code() {
    let repository = get_repository();
    assert_eq!(
        Err(LookupError::UnknownCallingCode(999)),
        repository.by_calling_code(999).map(|metadata| metadata.id().to_owned())
    );
}

#[test]
fn regions_for_calling_code_main_region_first() {
    let repository = get_repository();
    let nanpa = repository.regions_for_calling_code(1);
    assert_eq!(RegionCode::us(), nanpa[0]);
    assert_eq!(9, nanpa.len());
    assert!(nanpa.iter().any(|region| region == RegionCode::ag()));

    assert_eq!(
        vec![RegionCode::ru(), RegionCode::kz()],
        repository.regions_for_calling_code(7)
    );
    assert!(repository.regions_for_calling_code(999).is_empty());
    assert!(repository.has_calling_code(376));
    assert!(!repository.has_calling_code(999));
}

#[test]
fn by_region_lookups() {
    let repository = get_repository();
    assert_eq!(376, repository.by_region(RegionCode::ad()).unwrap().country_code());
    assert!(repository.by_region(RegionCode::zz()).is_none());
    // Non-geographical entities are only reachable through their calling code.
    assert!(repository.by_region(RegionCode::un001()).is_none());
    assert_eq!(
        808,
        repository
            .by_region_or_calling_code(808, RegionCode::un001())
            .unwrap()
            .country_code()
    );
    assert_eq!(
        RegionCode::ch(),
        repository
            .by_region_or_calling_code(41, RegionCode::ch())
            .unwrap()
            .id()
    );
}

#[test]
fn supported_regions_and_codes() {
    let repository = get_repository();
    assert_eq!(23, repository.supported_regions().count());
    assert_eq!(
        HashSet::from([800, 808, 870]),
        repository.supported_global_network_calling_codes().collect::<HashSet<_>>()
    );
    let calling_codes = repository.supported_calling_codes().collect::<Vec<_>>();
    assert!(calling_codes.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(calling_codes.contains(&1));
    assert!(calling_codes.contains(&870));
}

#[test]
fn nanpa_regions() {
    let repository = get_repository();
    assert!(repository.is_nanpa_region(RegionCode::us()));
    assert!(repository.is_nanpa_region(RegionCode::ag()));
    assert!(!repository.is_nanpa_region(RegionCode::gb()));
}

#[test]
fn sub_types_inherit_general_lengths() {
    let repository = get_repository();
    let fr = repository.by_region(RegionCode::fr()).unwrap();
    assert_eq!(&[9], fr.fixed_line().unwrap().possible_lengths());

    let ru = repository.by_region(RegionCode::ru()).unwrap();
    let ru_fixed_line = ru.fixed_line().unwrap();
    assert_eq!(&[10], ru_fixed_line.possible_lengths());
    assert_eq!(&[7], ru_fixed_line.local_only_lengths());

    let gb = repository.by_region(RegionCode::gb()).unwrap();
    assert_eq!(&[9, 10], gb.general_desc().possible_lengths());
    assert_eq!(&[10], gb.mobile().unwrap().possible_lengths());
}

#[test]
fn national_prefix_for_parsing_defaults_to_national_prefix() {
    let repository = get_repository();
    let gb = repository.by_region(RegionCode::gb()).unwrap();
    assert_eq!(Some("0"), gb.national_prefix_for_parsing());

    let cr = repository.by_region(RegionCode::cr()).unwrap();
    assert_eq!(None, cr.national_prefix());
    assert_eq!(Some("(19(?:0[0-2468]|1[09]|20|66|77|99))"), cr.national_prefix_for_parsing());

    let it = repository.by_region(RegionCode::it()).unwrap();
    assert_eq!(None, it.national_prefix_for_parsing());
}

#[test]
fn absent_sub_types_are_none() {
    let repository = get_repository();
    let ad = repository.by_region(RegionCode::ad()).unwrap();
    assert!(ad.voip().is_none());
    assert!(ad.desc_for_type(PhoneNumberType::VoIP).is_none());
    assert!(ad.desc_for_type(PhoneNumberType::Mobile).is_some());
    assert_eq!(
        ad.general_desc(),
        ad.desc_for_type(PhoneNumberType::Unknown).unwrap()
    );
}

#[test]
fn valid_fixture_loads() {
    let repository = load_fixture(VALID_FIXTURE).unwrap();
    let metadata = repository.by_region("XA").unwrap();
    assert_eq!(999, metadata.country_code());
    assert_eq!(&[5], metadata.mobile().unwrap().possible_lengths());
    assert_eq!(Some("51234"), metadata.mobile().unwrap().example_number());
    assert_eq!(metadata.id(), repository.by_calling_code(999).unwrap().id());
}

#[test]
fn unknown_region_record_is_skipped() {
    let text = fast_cat::concat_str!(
        VALID_FIXTURE,
        r#"metadata {
          id: "ZZ"
          country_code: 998
          general_desc { national_number_pattern: "\\d{5}" possible_length: 5 }
        }"#
    );
    let repository = load_fixture(&text).unwrap();
    assert!(repository.by_region(RegionCode::zz()).is_none());
    assert!(!repository.has_calling_code(998));
}

#[test]
fn malformed_text_is_rejected() {
    assert!(matches!(
        load_fixture("metadata { id: "),
        Err(MetadataError::Malformed(_))
    ));
    assert!(matches!(
        parse_collection("metadata { unknown_field: 1 }"),
        Err(MetadataError::Malformed(_))
    ));
}

#[test]
fn missing_general_desc_is_rejected() {
    let text = r#"metadata { id: "XA" country_code: 999 }"#;
    assert_eq!(
        Err(MetadataError::MissingGeneralDesc { region: "XA".to_owned() }),
        load_fixture(text).map(|_| ())
    );
}

#[test]
fn missing_country_code_is_rejected() {
    let text = r#"metadata {
      id: "XA"
      general_desc { national_number_pattern: "\\d{5}" possible_length: 5 }
    }"#;
    assert_eq!(
        Err(MetadataError::MissingCountryCode { region: "XA".to_owned() }),
        load_fixture(text).map(|_| ())
    );
}

#[test]
fn missing_pattern_is_rejected() {
    let general = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { possible_length: 5 }
    }"#;
    assert_eq!(
        Err(MetadataError::MissingPattern { region: "XA".to_owned(), field: "general_desc" }),
        load_fixture(general).map(|_| ())
    );

    // A present but empty sub-type is a broken record, not an absent one.
    let sub_type = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { national_number_pattern: "\\d{5}" possible_length: 5 }
      mobile { national_number_pattern: "" possible_length: 5 }
    }"#;
    assert_eq!(
        Err(MetadataError::MissingPattern { region: "XA".to_owned(), field: "mobile" }),
        load_fixture(sub_type).map(|_| ())
    );
}

#[test]
fn missing_possible_lengths_are_rejected() {
    let text = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { national_number_pattern: "\\d{5}" }
    }"#;
    assert_eq!(
        Err(MetadataError::MissingPossibleLengths { region: "XA".to_owned(), field: "general_desc" }),
        load_fixture(text).map(|_| ())
    );
}

#[test]
fn impossible_lengths_are_rejected() {
    let text = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { national_number_pattern: "\\d{18}" possible_length: 18 }
    }"#;
    assert_eq!(
        Err(MetadataError::InvalidPossibleLength {
            region: "XA".to_owned(),
            field: "general_desc",
            length: 18
        }),
        load_fixture(text).map(|_| ())
    );
}

#[test]
fn sub_type_lengths_outside_general_desc_are_rejected() {
    let text = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { national_number_pattern: "\\d{5}" possible_length: 5 }
      mobile { national_number_pattern: "\\d{6}" possible_length: 6 }
    }"#;
    assert_eq!(
        Err(MetadataError::LengthsOutsideGeneralDesc { region: "XA".to_owned(), field: "mobile" }),
        load_fixture(text).map(|_| ())
    );
}

#[test]
fn invalid_regex_is_rejected() {
    let text = r#"metadata {
      id: "XA"
      country_code: 999
      general_desc { national_number_pattern: "(\\d{5}" possible_length: 5 }
    }"#;
    assert!(matches!(
        load_fixture(text),
        Err(MetadataError::InvalidRegex { region, .. }) if region == "XA"
    ));
}

#[test]
fn duplicate_region_is_rejected() {
    let text = fast_cat::concat_str!(VALID_FIXTURE, VALID_FIXTURE);
    assert_eq!(
        Err(MetadataError::DuplicateRegion { region: "XA".to_owned() }),
        load_fixture(&text).map(|_| ())
    );
}

#[test]
fn shared_calling_code_needs_one_main_region() {
    let region = |id: &str, main: bool| {
        format!(
            r#"metadata {{
              id: "{id}"
              country_code: 999
              main_country_for_code: {main}
              general_desc {{ national_number_pattern: "\\d{{5}}" possible_length: 5 }}
            }}"#
        )
    };

    let no_main = fast_cat::concat_str!(&region("XA", false), &region("XB", false));
    assert_eq!(
        Err(MetadataError::AmbiguousCallingCode { country_code: 999, regions: 2, main_regions: 0 }),
        load_fixture(&no_main).map(|_| ())
    );

    let two_mains = fast_cat::concat_str!(&region("XA", true), &region("XB", true));
    assert_eq!(
        Err(MetadataError::AmbiguousCallingCode { country_code: 999, regions: 2, main_regions: 2 }),
        load_fixture(&two_mains).map(|_| ())
    );

    let one_main = fast_cat::concat_str!(&region("XA", false), &region("XB", true));
    let repository = load_fixture(&one_main).unwrap();
    assert_eq!("XB", repository.by_calling_code(999).unwrap().id());
    assert_eq!(&["XB".to_owned(), "XA".to_owned()], repository.regions_for_calling_code(999));
}

#[test]
fn utility_refuses_broken_metadata() {
    let collection = parse_collection(r#"metadata { id: "XA" country_code: 999 }"#).unwrap();
    assert!(PhoneNumberUtil::new_for_metadata(collection).is_err());
}
