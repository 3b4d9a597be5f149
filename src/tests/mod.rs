mod region_code;
mod metadata_tests;
mod phonenumberutil_tests;

use crate::{
    metadata::{MetadataRepository, parse_collection},
    phonenumberutil::{
        errors::MetadataError, helper_functions::load_compiled_metadata,
        phonenumberutil::PhoneNumberUtil,
    },
    regexp_cache::RegexCache,
};

static ONCE: std::sync::Once = std::sync::Once::new();

fn init_logger() {
    ONCE.call_once(|| colog::default_builder()
        .filter_level(log::LevelFilter::Trace)
        .init()
    );
}

fn get_phone_util() -> PhoneNumberUtil {
    init_logger();
    let metadata = load_compiled_metadata().expect("Metadata should be valid");
    PhoneNumberUtil::new_for_metadata(metadata).expect("Metadata should be loadable")
}

fn get_repository() -> MetadataRepository {
    init_logger();
    let metadata = load_compiled_metadata().expect("Metadata should be valid");
    MetadataRepository::load_all(metadata, &RegexCache::new()).expect("Metadata should be loadable")
}

/// Loads a repository from a textproto fixture.
fn load_fixture(text: &str) -> Result<MetadataRepository, MetadataError> {
    init_logger();
    MetadataRepository::load_all(parse_collection(text)?, &RegexCache::new())
}
