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

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, trace, warn};

use super::PhoneMetadata;
use crate::{
    i18n::RegionCode,
    phonenumberutil::{
        errors::{LookupError, MetadataError},
        helper_constants::NANPA_COUNTRY_CODE,
    },
    proto_gen::phonemetadata::PhoneMetadataCollection,
    regexp_cache::RegexCache,
};

/// Read-only index over a validated metadata collection.
pub struct MetadataRepository {
    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,

    /// A mapping from a country calling code to the regions sharing it, with
    /// the main region first. Under this map, 1 is mapped to "US" first and 7
    /// to "RU" first. Sorted by calling code for binary search.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,
}

impl MetadataRepository {
    /// Validates every record of `collection`, compiles its patterns into
    /// `regex_cache` and builds the lookup indices. Any problem aborts the
    /// whole load.
    pub fn load_all(
        collection: PhoneMetadataCollection,
        regex_cache: &RegexCache,
    ) -> Result<Self, MetadataError> {
        let mut region_to_metadata_map = HashMap::with_capacity(collection.metadata.len());
        let mut country_code_to_non_geographical_metadata_map = HashMap::new();
        let mut nanpa_regions = HashSet::new();
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        let mut main_regions_per_code = HashMap::<i32, usize>::new();

        for proto_metadata in collection.metadata {
            let metadata = PhoneMetadata::try_from(proto_metadata)?;
            let region_code = metadata.id().to_owned();
            if RegionCode::get_unknown() == region_code {
                warn!("Skipping metadata record for the unknown region");
                continue;
            }
            metadata
                .compile_patterns(regex_cache)
                .map_err(|source| MetadataError::InvalidRegex {
                    region: region_code.clone(),
                    source,
                })?;

            let country_calling_code = metadata.country_code();
            let main_country_for_code = metadata.main_country_for_code();
            if metadata.is_non_geographical() {
                if country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata)
                    .is_some()
                {
                    return Err(MetadataError::DuplicateNonGeographicalCode(country_calling_code));
                }
            } else if region_to_metadata_map
                .insert(region_code.clone(), metadata)
                .is_some()
            {
                return Err(MetadataError::DuplicateRegion { region: region_code });
            }

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_for_code {
                regions.push_front(region_code.clone());
                *main_regions_per_code.entry(country_calling_code).or_default() += 1;
            } else {
                regions.push_back(region_code.clone());
            }
            if country_calling_code == NANPA_COUNTRY_CODE {
                nanpa_regions.insert(region_code);
            }
        }

        let mut country_calling_code_to_region_code_map =
            Vec::with_capacity(country_calling_code_to_region_map.len());
        for (country_code, regions) in country_calling_code_to_region_map {
            let main_regions = main_regions_per_code.get(&country_code).copied().unwrap_or(0);
            // A shared calling code is resolved through its single main region.
            if regions.len() > 1 && main_regions != 1 {
                return Err(MetadataError::AmbiguousCallingCode {
                    country_code,
                    regions: regions.len(),
                    main_regions,
                });
            }
            country_calling_code_to_region_code_map.push((country_code, Vec::from(regions)));
        }
        // Sort all the pairs in ascending order according to country calling code.
        country_calling_code_to_region_code_map.sort_by_key(|(code, _)| *code);

        debug!(
            "Loaded metadata for {} regions and {} non-geographical entities under {} calling codes ({} compiled patterns)",
            region_to_metadata_map.len(),
            country_code_to_non_geographical_metadata_map.len(),
            country_calling_code_to_region_code_map.len(),
            regex_cache.len()
        );

        Ok(Self {
            region_to_metadata_map,
            country_code_to_non_geographical_metadata_map,
            country_calling_code_to_region_code_map,
            nanpa_regions,
        })
    }

    pub fn by_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    pub fn by_non_geographic_code(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
    }

    /// Returns the record that carries the numbering plan of a calling code:
    /// the only region using it, or the main region of a shared code.
    pub fn by_calling_code(&self, country_calling_code: i32) -> Result<&PhoneMetadata, LookupError> {
        let regions = self.regions_for_calling_code(country_calling_code);
        let mut records = regions
            .iter()
            .filter_map(|region| self.by_region_or_calling_code(country_calling_code, region));
        if regions.len() <= 1 {
            return records
                .next()
                .ok_or(LookupError::UnknownCallingCode(country_calling_code));
        }
        let mut main_records = records.filter(|metadata| metadata.main_country_for_code());
        match (main_records.next(), main_records.next()) {
            (Some(main), None) => {
                trace!("Calling code {} resolved to main region {}", country_calling_code, main.id());
                Ok(main)
            }
            _ => Err(LookupError::AmbiguousCallingCode(country_calling_code)),
        }
    }

    /// Uses the non-geographical map for the `001` sentinel and the region map
    /// otherwise.
    pub fn by_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if RegionCode::un001() == region_code {
            self.by_non_geographic_code(country_calling_code)
        } else {
            self.by_region(region_code)
        }
    }

    /// Regions sharing the calling code, main region first. Empty for unknown
    /// codes.
    pub fn regions_for_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    pub fn supported_regions(&self) -> impl Iterator<Item = &str> {
        self.region_to_metadata_map.keys().map(String::as_str)
    }

    pub fn supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
    }

    pub fn supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_code_to_non_geographical_metadata_map
            .keys()
            .copied()
    }

    pub fn is_nanpa_region(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }
}
