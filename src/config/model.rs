// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [credentials]
/// access_key_id = "AKIA..."
/// secret_access_key = "..."
/// region = "eu-west-1"
///
/// [aws]
/// bin = "aws"
/// ```
///
/// The `[aws]` section is optional and defaults to the `aws` binary on PATH.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// AWS credentials from `[credentials]`.
    pub credentials: Credentials,

    /// External tool settings from `[aws]`.
    #[serde(default)]
    pub aws: AwsSection,
}

/// `[credentials]` section.
///
/// Captured once at coordinator construction and applied to every
/// invocation of the external sync command; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl Credentials {
    /// Render the credentials as the exact environment the child process
    /// receives. Nothing else is passed through.
    pub fn to_env(&self) -> Vec<(String, String)> {
        vec![
            ("AWS_ACCESS_KEY_ID".to_string(), self.access_key_id.clone()),
            (
                "AWS_SECRET_ACCESS_KEY".to_string(),
                self.secret_access_key.clone(),
            ),
            ("AWS_DEFAULT_REGION".to_string(), self.region.clone()),
        ]
    }
}

/// `[aws]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsSection {
    /// The AWS CLI binary to invoke.
    ///
    /// Override this with an absolute path when the binary is not on the
    /// default lookup path of the spawned child.
    #[serde(default = "default_aws_bin")]
    pub bin: String,
}

fn default_aws_bin() -> String {
    "aws".to_string()
}

impl Default for AwsSection {
    fn default() -> Self {
        Self {
            bin: default_aws_bin(),
        }
    }
}
