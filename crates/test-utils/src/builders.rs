#![allow(dead_code)]

use syncgate::config::Credentials;

/// Builder for `Credentials` to simplify test setup.
pub struct CredentialsBuilder {
    credentials: Credentials,
}

impl CredentialsBuilder {
    pub fn new() -> Self {
        Self {
            credentials: Credentials {
                access_key_id: "testId".to_string(),
                secret_access_key: "testKey".to_string(),
                region: "testRegion".to_string(),
            },
        }
    }

    pub fn access_key_id(mut self, val: &str) -> Self {
        self.credentials.access_key_id = val.to_string();
        self
    }

    pub fn secret_access_key(mut self, val: &str) -> Self {
        self.credentials.secret_access_key = val.to_string();
        self
    }

    pub fn region(mut self, val: &str) -> Self {
        self.credentials.region = val.to_string();
        self
    }

    pub fn build(self) -> Credentials {
        self.credentials
    }
}

impl Default for CredentialsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The credential set used across tests.
pub fn test_credentials() -> Credentials {
    CredentialsBuilder::new().build()
}

/// Builder for canned `aws s3 sync` stdout.
pub struct SyncStdoutBuilder {
    lines: Vec<String>,
}

impl SyncStdoutBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// A per-file transfer line.
    pub fn download(mut self, remote: &str, local: &str) -> Self {
        self.lines.push(format!("download: {remote} to {local}"));
        self
    }

    /// A progress line of the kind the CLI interleaves between transfers.
    pub fn progress(mut self, done: usize, total: usize, remaining: usize) -> Self {
        self.lines.push(format!(
            "Completed {done} of {total} part(s) with {remaining} file(s) remaining"
        ));
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

impl Default for SyncStdoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
