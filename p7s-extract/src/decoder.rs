// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface to CMS `SignedData` decoders.
//!
//! Content extraction only needs three things from a CMS implementation:
//! the ability to parse bytes into a `SignedData`, to ask whether the
//! content is detached, and to obtain the encapsulated content. These
//! traits capture that contract.

use std::fmt::Display;

/// Something that can parse bytes into a [DecodedSignedData].
pub trait SignedDataDecoder {
    /// The parsed representation of a `SignedData` structure.
    type Decoded: DecodedSignedData;

    /// Error type describing why input could not be parsed.
    type Error: Display;

    /// Parse a `SignedData` structure from raw bytes.
    fn decode(&self, data: &[u8]) -> Result<Self::Decoded, Self::Error>;
}

/// A parsed CMS `SignedData` structure.
pub trait DecodedSignedData {
    /// Error type describing why content could not be obtained.
    type Error: Display;

    /// Whether the signed content is stored outside of this structure.
    fn is_detached(&self) -> bool;

    /// Obtain the encapsulated content.
    ///
    /// Only meaningful when [Self::is_detached()] is false.
    fn content(&self) -> Result<Vec<u8>, Self::Error>;
}
