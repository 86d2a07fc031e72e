//! Interface selection for attribute naming.

use std::fmt;
use std::str::FromStr;

/// The naming convention a consumer expects field names in.
///
/// The UI layer uses the canonical names (`Default`), the REST transport the
/// names from a schema's `api_names` table and the CLI transport the names from
/// its `cli_names` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interface {
    #[default]
    Default,
    Api,
    Cli,
}

/// Error returned when an interface selector is not one of default, API or CLI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid interface '{0}': expected one of default, api, cli")]
pub struct InvalidInterfaceError(pub String);

impl Interface {
    /// All interfaces, in declaration order.
    pub const ALL: [Interface; 3] = [Interface::Default, Interface::Api, Interface::Cli];

    /// Lowercase selector name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Api => "api",
            Self::Cli => "cli",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interface {
    type Err = InvalidInterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "api" => Ok(Self::Api),
            "cli" => Ok(Self::Cli),
            _ => Err(InvalidInterfaceError(s.to_string())),
        }
    }
}
