//! The Radarr and Sonarr instances that custom formats are pushed to, and their discovery from
//! the environment.

use crate::environment::{
    get_env_var,
    variables::{INSTANCE_API_KEY_SUFFIX, INSTANCE_URL_SUFFIX},
};
use anyhow::{Context, Result};
use std::fmt::{Debug, Formatter};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use tracing::info;
use url::Url;

/// The *arr that an [Instance] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum ArrFamily {
    Radarr,
    Sonarr,
}

impl ArrFamily {
    /// Determine the family from an instance name such as `Radarr_003`. Any name that does not
    /// mention Radarr is considered a Sonarr instance.
    pub fn from_instance_name(name: &str) -> Self {
        if name.contains(ArrFamily::Radarr.as_ref()) {
            ArrFamily::Radarr
        } else {
            ArrFamily::Sonarr
        }
    }

    /// Prefix of this family's environment variables, e.g. `RADARR`.
    pub fn env_prefix(&self) -> String {
        self.as_ref().to_uppercase()
    }
}

/// A single Radarr or Sonarr server.
#[derive(Clone)]
pub struct Instance {
    /// Display name, e.g. `Radarr_003`. Used for filtering and in logs.
    pub name: String,
    pub family: ArrFamily,
    pub base_url: Url,
    pub api_key: String,
}

impl Instance {
    pub fn new(name: &str, base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Failed to parse \"{}\" as the URL of {}.", base_url, name))?;
        Ok(Instance {
            name: String::from(name),
            family: ArrFamily::from_instance_name(name),
            base_url,
            api_key: String::from(api_key),
        })
    }

    /// The trailing ordinal of the instance name, e.g. `003` for `Radarr_003`.
    pub fn ordinal(&self) -> &str {
        self.name.rsplit('_').next().unwrap_or(&self.name)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Discover every configured instance from the environment variables available to the process.
/// See [discover_instances_with].
pub fn discover_instances() -> Result<Vec<Instance>> {
    discover_instances_with(|name| get_env_var(name).ok())
}

/// Discover instances by probing `<FAMILY>_<NNN>_URL` and `<FAMILY>_<NNN>_API_KEY` for each
/// family, starting at `001`. Probing a family stops at the first index missing either value;
/// empty values count as missing.
pub fn discover_instances_with<F>(lookup: F) -> Result<Vec<Instance>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut instances = Vec::new();
    for family in ArrFamily::iter() {
        for index in 1u32.. {
            let prefix = format!("{}_{:03}", family.env_prefix(), index);
            let url = lookup(&format!("{}_{}", prefix, INSTANCE_URL_SUFFIX));
            let api_key = lookup(&format!("{}_{}", prefix, INSTANCE_API_KEY_SUFFIX));
            let (url, api_key) = match (url, api_key) {
                (Some(u), Some(k)) if !u.trim().is_empty() && !k.trim().is_empty() => (u, k),
                _ => break,
            };

            let name = format!("{}_{:03}", family.as_ref(), index);
            let instance = Instance::new(&name, url.trim(), api_key.trim())?;
            info!(instance = %instance.name, url = %instance.base_url, "Found instance.");
            instances.push(instance);
        }
    }

    Ok(instances)
}
