use std::fmt;
use std::str::FromStr;

/// Social networks covered by the extraction sheet, each with the fixed
/// column that holds its post URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
}

impl Platform {
    /// Zero-based index of the post-URL column in the extraction sheet:
    /// Facebook "Post URL", Instagram "URL", Twitter "Status URL".
    pub fn url_column(&self) -> usize {
        match self {
            Platform::Facebook => 6,
            Platform::Instagram => 12,
            Platform::Twitter => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "twitter" => Ok(Platform::Twitter),
            other => anyhow::bail!(
                "unknown platform '{}' (expected facebook, instagram or twitter)",
                other
            ),
        }
    }
}
