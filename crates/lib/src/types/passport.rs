//! Telegram Passport data received from users, and the errors a bot can report back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportData {
    #[serde(default)]
    pub data: Vec<EncryptedPassportElement>,
    pub credentials: EncryptedCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportFile {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: i64,
    pub file_date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncryptedPassportElement {
    /// "personal_details", "passport", "driver_license", "address", "email", ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_side: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_side: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selfie: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translation: Vec<PassportFile>,
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncryptedCredentials {
    pub data: String,
    pub hash: String,
    pub secret: String,
}

/// An error in a submitted Passport element. The wire `source` tag comes from the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PassportElementError {
    Data {
        #[serde(rename = "type")]
        kind: String,
        field_name: String,
        data_hash: String,
        message: String,
    },
    FrontSide {
        #[serde(rename = "type")]
        kind: String,
        file_hash: String,
        message: String,
    },
    ReverseSide {
        #[serde(rename = "type")]
        kind: String,
        file_hash: String,
        message: String,
    },
    Selfie {
        #[serde(rename = "type")]
        kind: String,
        file_hash: String,
        message: String,
    },
    File {
        #[serde(rename = "type")]
        kind: String,
        file_hash: String,
        message: String,
    },
    Files {
        #[serde(rename = "type")]
        kind: String,
        file_hashes: Vec<String>,
        message: String,
    },
    TranslationFile {
        #[serde(rename = "type")]
        kind: String,
        file_hash: String,
        message: String,
    },
    TranslationFiles {
        #[serde(rename = "type")]
        kind: String,
        file_hashes: Vec<String>,
        message: String,
    },
    Unspecified {
        #[serde(rename = "type")]
        kind: String,
        element_hash: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tag_is_snake_case() {
        let e = PassportElementError::TranslationFiles {
            kind: "passport".into(),
            file_hashes: vec!["h1".into()],
            message: "blurry".into(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["source"], "translation_files");
        assert_eq!(v["type"], "passport");
        assert_eq!(v["file_hashes"][0], "h1");
    }
}
