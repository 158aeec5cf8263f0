// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CMS decoding backed by the `cryptographic-message-syntax` crate.

use {
    crate::decoder::{DecodedSignedData, SignedDataDecoder},
    cryptographic_message_syntax::{asn1::rfc5652, CmsError, SignedData},
    log::debug,
    std::{
        borrow::Cow,
        fmt::{Display, Formatter},
    },
    x509_certificate::DigestAlgorithm,
};

const PEM_BEGIN: &[u8] = b"-----BEGIN";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Strip the byte order mark Windows editors like to prepend to text files.
fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Whether data looks like PEM armor rather than binary BER/DER.
fn is_pem(data: &[u8]) -> bool {
    strip_bom(data)
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(PEM_BEGIN.len())
        .eq(PEM_BEGIN.iter())
}

/// Decode the ASN.1 `SignedData` structure from `.p7s` file content.
///
/// PEM armored input is unwrapped first. The PEM label isn't checked: both
/// `CMS` and `PKCS7` are common in the wild.
///
/// Bytes following the top-level `ContentInfo` are ignored.
fn decode_signed_data(data: &[u8]) -> Result<rfc5652::SignedData, CmsError> {
    let ber = if is_pem(data) {
        let pem = pem::parse(strip_bom(data))?;
        debug!(
            "decoding {} bytes of PEM armored {} data",
            pem.contents.len(),
            pem.tag
        );

        Cow::Owned(pem.contents)
    } else {
        Cow::Borrowed(data)
    };

    Ok(rfc5652::SignedData::decode_ber(&ber)?)
}

/// A [SignedDataDecoder] using the `cryptographic-message-syntax` crate.
///
/// Only the ASN.1 structure is decoded. Certificates and signer infos
/// aren't interpreted, so containers using algorithms or signer identifiers
/// unknown to that crate can still have their content extracted.
#[derive(Clone, Copy, Debug, Default)]
pub struct CmsDecoder;

impl SignedDataDecoder for CmsDecoder {
    type Decoded = CmsSignedData;
    type Error = CmsError;

    fn decode(&self, data: &[u8]) -> Result<Self::Decoded, Self::Error> {
        Ok(CmsSignedData {
            raw: decode_signed_data(data)?,
        })
    }
}

/// A `SignedData` structure decoded by [CmsDecoder].
#[derive(Clone, Debug)]
pub struct CmsSignedData {
    raw: rfc5652::SignedData,
}

impl CmsSignedData {
    /// The OID of the encapsulated content type (`eContentType`).
    pub fn content_type(&self) -> &rfc5652::ContentType {
        &self.raw.content_info.content_type
    }

    /// The underlying ASN.1 data structure.
    pub fn raw(&self) -> &rfc5652::SignedData {
        &self.raw
    }
}

impl DecodedSignedData for CmsSignedData {
    type Error = CmsError;

    fn is_detached(&self) -> bool {
        self.raw.content_info.content.is_none()
    }

    fn content(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self
            .raw
            .content_info
            .content
            .as_ref()
            .map(|content| content.to_bytes().to_vec())
            .unwrap_or_default())
    }
}

/// Describes a certificate embedded in a container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateSummary {
    pub subject_common_name: Option<String>,
    pub self_signed: bool,
}

/// Describes a signer of a container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerSummary {
    pub digest_algorithm: String,
    pub signature_algorithm: String,
    pub signing_time: Option<String>,
}

/// Human oriented description of a `.p7s` container.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerSummary {
    /// OID of the encapsulated content type.
    pub content_type: String,

    /// Length of embedded content. `None` if content is detached.
    pub content_length: Option<usize>,

    /// Hex encoded SHA-256 of the embedded content.
    pub content_sha256: Option<String>,

    pub certificates: Vec<CertificateSummary>,
    pub signers: Vec<SignerSummary>,
}

impl Display for ContainerSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "content type: {}", self.content_type)?;
        match self.content_length {
            Some(length) => writeln!(f, "embedded content: {} bytes", length)?,
            None => writeln!(f, "embedded content: none (detached)")?,
        }
        if let Some(digest) = &self.content_sha256 {
            writeln!(f, "embedded content SHA-256: {}", digest)?;
        }

        writeln!(f, "certificate count: {}", self.certificates.len())?;
        for (i, cert) in self.certificates.iter().enumerate() {
            writeln!(
                f,
                "certificate #{}: subject CN={}; self signed={}",
                i,
                cert.subject_common_name.as_deref().unwrap_or("<unknown>"),
                cert.self_signed
            )?;
        }

        writeln!(f, "signer count: {}", self.signers.len())?;
        for (i, signer) in self.signers.iter().enumerate() {
            writeln!(f, "signer #{}: digest algorithm: {}", i, signer.digest_algorithm)?;
            writeln!(
                f,
                "signer #{}: signature algorithm: {}",
                i, signer.signature_algorithm
            )?;
            if let Some(time) = &signer.signing_time {
                writeln!(f, "signer #{}: signing time: {}", i, time)?;
            }
        }

        Ok(())
    }
}

/// Describe the content, certificates, and signers of a `.p7s` container.
///
/// Unlike extraction, this interprets certificates and signer infos, so it
/// fails on containers using features `cryptographic-message-syntax`
/// doesn't support.
pub fn summarize(data: &[u8]) -> Result<ContainerSummary, CmsError> {
    let raw = decode_signed_data(data)?;
    let signed_data = SignedData::try_from(&raw)?;

    let content = signed_data.signed_content();

    let content_sha256 = content.map(|content| {
        let mut hasher = DigestAlgorithm::Sha256.digester();
        hasher.update(content);
        hex::encode(hasher.finish())
    });

    let certificates = signed_data
        .certificates()
        .map(|cert| CertificateSummary {
            subject_common_name: cert.subject_common_name(),
            self_signed: cert.subject_is_issuer(),
        })
        .collect::<Vec<_>>();

    let signers = signed_data
        .signers()
        .map(|signer| SignerSummary {
            digest_algorithm: format!("{:?}", signer.digest_algorithm()),
            signature_algorithm: format!("{:?}", signer.signature_algorithm()),
            signing_time: signer
                .signed_attributes()
                .and_then(|attrs| attrs.signing_time())
                .map(|time| time.to_rfc3339()),
        })
        .collect::<Vec<_>>();

    Ok(ContainerSummary {
        content_type: raw.content_info.content_type.to_string(),
        content_length: content.map(|content| content.len()),
        content_sha256,
        certificates,
        signers,
    })
}
