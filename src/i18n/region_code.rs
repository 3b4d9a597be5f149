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

const UNKNOWN_REGION: &str = "ZZ";
const NON_GEO_ENTITY: &str = "001";

/// Region codes with a special meaning next to the ISO 3166-1 alpha-2 codes
/// used by the metadata.
pub struct RegionCode;

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        UNKNOWN_REGION
    }

    /// Region code shared by all non-geographical entities, such as the
    /// international toll free service under +800.
    pub fn un001() -> &'static str {
        NON_GEO_ENTITY
    }

    /// True for codes that may name a record: two uppercase ASCII letters, or
    /// the non-geographical code.
    pub fn is_well_formed(region_code: &str) -> bool {
        region_code == NON_GEO_ENTITY
            || (region_code.len() == 2 && region_code.bytes().all(|b| b.is_ascii_uppercase()))
    }
}
