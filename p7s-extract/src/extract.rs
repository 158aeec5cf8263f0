// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction of encapsulated content from `SignedData`.

use {
    crate::{
        cms::CmsDecoder,
        decoder::{DecodedSignedData, SignedDataDecoder},
        error::ExtractError,
    },
    log::debug,
};

/// Extract the embedded content of a CMS `SignedData` container.
///
/// `data` is the full content of a `.p7s` file. BER, DER and PEM armored
/// encodings are accepted.
///
/// Content is returned byte for byte as it is stored in the container.
/// Detached signatures and containers with empty content both result in
/// [ExtractError::NoEmbeddedContent].
pub fn extract(data: &[u8]) -> Result<Vec<u8>, ExtractError> {
    extract_with(&CmsDecoder::default(), data)
}

/// Extract embedded content using a specific [SignedDataDecoder].
pub fn extract_with<D>(decoder: &D, data: &[u8]) -> Result<Vec<u8>, ExtractError>
where
    D: SignedDataDecoder + ?Sized,
{
    let signed_data = decoder
        .decode(data)
        .map_err(|e| ExtractError::MalformedContainer(e.to_string()))?;

    if signed_data.is_detached() {
        debug!("signed data content is detached");
        return Err(ExtractError::NoEmbeddedContent);
    }

    let content = signed_data
        .content()
        .map_err(|e| ExtractError::ContentRetrievalFailed(e.to_string()))?;

    if content.is_empty() {
        debug!("signed data content is empty");
        return Err(ExtractError::NoEmbeddedContent);
    }

    debug!("extracted {} bytes of embedded content", content.len());

    Ok(content)
}

#[cfg(test)]
mod tests {
    use {super::*, std::fmt::Display};

    const HELLO: &[u8] = include_bytes!("testdata/hello.p7s");
    const EMPTY_CONTENT: &[u8] = include_bytes!("testdata/empty-content.p7s");
    const NO_CONTENT: &[u8] = include_bytes!("testdata/no-content.p7s");
    const SIGNED_ATTACHED: &[u8] = include_bytes!("testdata/signed-attached.p7s");
    const SIGNED_ATTACHED_PEM: &[u8] = include_bytes!("testdata/signed-attached.pem");
    const SIGNED_DETACHED: &[u8] = include_bytes!("testdata/signed-detached.p7s");
    const SIGNED_PAYLOAD: &[u8] = include_bytes!("testdata/signed-payload.txt");

    #[test]
    fn hello() {
        assert_eq!(extract(HELLO).unwrap(), b"hello");
    }

    #[test]
    fn signed_attached() {
        let content = extract(SIGNED_ATTACHED).unwrap();
        assert_eq!(content.len(), SIGNED_PAYLOAD.len());
        assert_eq!(content, SIGNED_PAYLOAD);
    }

    #[test]
    fn pem_matches_der() {
        assert_eq!(extract(SIGNED_ATTACHED_PEM).unwrap(), SIGNED_PAYLOAD);
    }

    #[test]
    fn detached() {
        assert_eq!(extract(NO_CONTENT), Err(ExtractError::NoEmbeddedContent));
        assert_eq!(
            extract(SIGNED_DETACHED),
            Err(ExtractError::NoEmbeddedContent)
        );
    }

    #[test]
    fn empty_content() {
        assert_eq!(
            extract(EMPTY_CONTENT),
            Err(ExtractError::NoEmbeddedContent)
        );
    }

    #[test]
    fn malformed() {
        for data in [
            &b"this is just a text file\n"[..],
            &b""[..],
            &HELLO[0..HELLO.len() - 4],
            &SIGNED_ATTACHED[1..],
            &b"-----BEGIN CMS-----\nnot base64!\n-----END CMS-----\n"[..],
        ] {
            assert!(
                matches!(extract(data), Err(ExtractError::MalformedContainer(_))),
                "{:?} is malformed",
                data
            );
        }
    }

    #[test]
    fn repeated_extraction_is_stable() {
        for data in [HELLO, EMPTY_CONTENT, SIGNED_ATTACHED, &b"garbage"[..]] {
            assert_eq!(extract(data), extract(data));
        }
    }

    struct FakeError(&'static str);

    impl Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    enum FakeSignedData {
        Detached,
        Content(Vec<u8>),
        Broken,
    }

    impl DecodedSignedData for FakeSignedData {
        type Error = FakeError;

        fn is_detached(&self) -> bool {
            matches!(self, Self::Detached)
        }

        fn content(&self) -> Result<Vec<u8>, Self::Error> {
            match self {
                Self::Detached => panic!("content requested from detached signed data"),
                Self::Content(data) => Ok(data.clone()),
                Self::Broken => Err(FakeError("corrupt content info")),
            }
        }
    }

    struct FakeDecoder;

    impl SignedDataDecoder for FakeDecoder {
        type Decoded = FakeSignedData;
        type Error = FakeError;

        fn decode(&self, data: &[u8]) -> Result<Self::Decoded, Self::Error> {
            match data {
                b"detached" => Ok(FakeSignedData::Detached),
                b"broken" => Ok(FakeSignedData::Broken),
                b"bad" => Err(FakeError("not a SignedData")),
                data => Ok(FakeSignedData::Content(data.to_vec())),
            }
        }
    }

    #[test]
    fn custom_decoder() {
        assert_eq!(
            extract_with(&FakeDecoder, b"bad"),
            Err(ExtractError::MalformedContainer("not a SignedData".into()))
        );
        assert_eq!(
            extract_with(&FakeDecoder, b"detached"),
            Err(ExtractError::NoEmbeddedContent)
        );
        assert_eq!(
            extract_with(&FakeDecoder, b"broken"),
            Err(ExtractError::ContentRetrievalFailed(
                "corrupt content info".into()
            ))
        );
        assert_eq!(
            extract_with(&FakeDecoder, b""),
            Err(ExtractError::NoEmbeddedContent)
        );
        assert_eq!(extract_with(&FakeDecoder, b"\x00\xff").unwrap(), b"\x00\xff");
    }

    #[test]
    fn error_messages_carry_diagnostics() {
        let err = extract_with(&FakeDecoder, b"broken").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error retrieving content from signed data container: corrupt content info"
        );

        let err = extract(b"garbage").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("malformed signed data container: "));
    }
}
