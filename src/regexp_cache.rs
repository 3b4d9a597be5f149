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

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Concurrent cache of compiled metadata patterns.
///
/// Metadata patterns are written without anchors, so every pattern can be
/// requested anchored at both ends or at the start only. Each shape is cached
/// under the original pattern text.
pub struct RegexCache {
    full_match_cache: DashMap<String, Arc<Regex>>,
    prefix_match_cache: DashMap<String, Arc<Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            full_match_cache: DashMap::with_capacity(capacity),
            prefix_match_cache: DashMap::with_capacity(capacity),
        }
    }

    /// Pattern that must match the whole input: `^(?:pattern)$`.
    pub fn get_full_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.full_match_cache, pattern, || {
            fast_cat::concat_str!("^(?:", pattern, ")$")
        })
    }

    /// Pattern that must match at the start of the input: `^(?:pattern)`.
    pub fn get_prefix_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        Self::get_or_compile(&self.prefix_match_cache, pattern, || {
            fast_cat::concat_str!("^(?:", pattern, ")")
        })
    }

    /// Number of compiled patterns across all shapes.
    pub fn len(&self) -> usize {
        self.full_match_cache.len() + self.prefix_match_cache.len()
    }

    fn get_or_compile(
        cache: &DashMap<String, Arc<Regex>>,
        pattern: &str,
        source: impl FnOnce() -> String,
    ) -> Result<Arc<Regex>, InvalidRegexError> {
        if let Some(regex) = cache.get(pattern) {
            Ok(regex.value().clone())
        } else {
            let entry = cache.entry(pattern.to_string()).or_try_insert_with(|| {
                Regex::new(&source()).map(Arc::new)
            })?;
            Ok(entry.value().clone())
        }
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}
