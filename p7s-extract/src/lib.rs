// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Extract embedded content from PKCS #7 / CMS `SignedData` (`.p7s`) files.

A `.p7s` file is a Cryptographic Message Syntax (RFC 5652) `SignedData`
structure. When the signature is *attached* (the common case for `.p7s`
files produced by e-signature tooling), the document that was signed is
stored inside the structure as the *encapsulated content* (`eContent`).
This crate pulls that document back out.

Parsing of the ASN.1 data structures is delegated to the
`cryptographic-message-syntax` crate. The [SignedDataDecoder] and
[DecodedSignedData] traits describe what we need from a decoder, so a
different CMS implementation can be plugged in via [extract_with()].

# IMPORTANT SECURITY LIMITATIONS

**No signature verification is performed.** The extracted content is
returned exactly as it is stored in the container. A successful extraction
says nothing about whether the content was signed by anybody you trust, or
whether the signature is valid at all.

# Example

```no_run
let data = std::fs::read("contract.pdf.p7s")?;
let payload = p7s_extract::extract(&data)?;
std::fs::write("contract.pdf", payload)?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod cms;
pub mod decoder;
pub mod error;
pub mod extract;
pub mod settings;

pub use {
    crate::{
        cms::{summarize, CmsDecoder, CmsSignedData, ContainerSummary},
        decoder::{DecodedSignedData, SignedDataDecoder},
        error::{ExtractError, P7sError},
        extract::{extract, extract_with},
        settings::ExtractSettings,
    },
    cryptographic_message_syntax::CmsError,
};
