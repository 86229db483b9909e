// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Transaction name obfuscation
//!
//! Names are XORed with the leading bytes of the license key and then
//! base64-encoded, so they do not appear in clear text in page source.

use crate::error::Result;
use base64::{engine::general_purpose, Engine as _};

/// Number of license key bytes used as the XOR key.
pub const OBFUSCATION_KEY_LEN: usize = 13;

fn xor_with_key(data: &[u8], key: &str) -> Vec<u8> {
    let key = &key.as_bytes()[..key.len().min(OBFUSCATION_KEY_LEN)];
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

/// Obfuscate a transaction name with the license key.
///
/// # Example
///
/// ```
/// use rumtrace_core::{deobfuscate_name, obfuscate_name};
///
/// let encoded = obfuscate_name("hello", "0123456789abcdef");
/// assert_ne!(encoded, "hello");
/// assert_eq!(deobfuscate_name(&encoded, "0123456789abcdef").unwrap(), "hello");
/// ```
pub fn obfuscate_name(name: &str, license_key: &str) -> String {
    general_purpose::STANDARD.encode(xor_with_key(name.as_bytes(), license_key))
}

/// Reverse [`obfuscate_name`].
pub fn deobfuscate_name(encoded: &str, license_key: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD.decode(encoded)?;
    Ok(String::from_utf8(xor_with_key(&bytes, license_key))?)
}
