// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
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

use regex::{Captures, Match, Regex};

/// "Looking at" helpers for patterns that are not anchored themselves.
pub trait RegexConsume {
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    /// Returns the rest of `s` after a match that begins at position 0.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.find_start(s).map(|found| &s[found.end()..])
    }

    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;
}

impl RegexConsume for Regex {
    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        let captures = self.captures(s)?;
        let full_capture = captures.get(0)?;
        if full_capture.start() != 0 {
            return None
        }

        Some(captures)
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        let found = self.find(s)?;
        if found.start() != 0 {
            return None
        }
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::RegexConsume;

    #[test]
    fn consume_start_returns_rest() {
        let plus = Regex::new("[+\u{FF0B}]+").unwrap();
        assert_eq!(plus.consume_start("++44"), Some("44"));
        assert_eq!(plus.consume_start("44+"), None);
    }

    #[test]
    fn captures_start_requires_leading_match() {
        let carrier = Regex::new("(19\\d\\d)").unwrap();
        let captures = carrier.captures_start("190022123456").unwrap();
        assert_eq!(&captures[1], "1900");
        assert!(carrier.captures_start("221900").is_none());
    }
}
