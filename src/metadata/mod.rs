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

//! Validated numbering-plan records and the repository that indexes them.
//!
//! The raw data is a [`PhoneMetadataCollection`] decoded from protobuf text
//! format. Every record is converted into a [`PhoneMetadata`] before it is
//! indexed, so the rest of the crate never sees half-filled descriptors.

mod records;
mod repository;

pub use records::{NumberDesc, NumberFormat, PhoneMetadata};
pub use repository::MetadataRepository;

use crate::{phonenumberutil::errors::MetadataError, proto_gen::phonemetadata::PhoneMetadataCollection};

/// Decodes a metadata collection written in protobuf text format.
pub fn parse_collection(text: &str) -> Result<PhoneMetadataCollection, MetadataError> {
    protobuf::text_format::parse_from_str::<PhoneMetadataCollection>(text)
        .map_err(|err| MetadataError::Malformed(err.to_string()))
}
