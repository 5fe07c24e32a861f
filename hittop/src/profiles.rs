//! Dashboard profiles: load/save a JSON mapping of profile name -> { api_endpoint, website_id, .. }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/hittop/profiles.json
//! (fallback ~/.config/hittop/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileEntry {
    pub api_endpoint: String,
    pub website_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("hittop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hittop")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq)]
pub enum ResolveProfile {
    /// Use the provided runtime inputs (maybe saved by the caller)
    Direct(ProfileEntry),
    /// Loaded from an existing profile entry, with runtime overrides applied
    Loaded(ProfileEntry),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
    /// An endpoint was given but no website id to go with it
    MissingWebsiteId,
    /// No profile could be resolved (e.g., missing arguments)
    None,
}

#[derive(Debug, Default)]
pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub api_endpoint: Option<String>,
    pub website_id: Option<String>,
    pub refresh_interval_ms: Option<u64>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Case: only profile name given -> try load
        if self.api_endpoint.is_none() {
            if let Some(name) = self.profile_name {
                return match pf.profiles.get(&name) {
                    Some(entry) => {
                        let mut entry = entry.clone();
                        if let Some(site) = self.website_id {
                            entry.website_id = site;
                        }
                        if self.refresh_interval_ms.is_some() {
                            entry.refresh_interval_ms = self.refresh_interval_ms;
                        }
                        ResolveProfile::Loaded(entry)
                    }
                    None => ResolveProfile::PromptCreate(name),
                };
            }
            // Nothing provided -> maybe prompt select if profiles exist
            return if pf.profiles.is_empty() {
                ResolveProfile::None
            } else {
                ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect())
            };
        }

        let api_endpoint = self.api_endpoint.unwrap_or_default();
        // Endpoint given: website id comes from args, else from the named profile
        let existing = self
            .profile_name
            .as_ref()
            .and_then(|n| pf.profiles.get(n));
        let website_id = match (self.website_id, existing) {
            (Some(site), _) => site,
            (None, Some(entry)) => entry.website_id.clone(),
            (None, None) => return ResolveProfile::MissingWebsiteId,
        };
        ResolveProfile::Direct(ProfileEntry {
            api_endpoint,
            website_id,
            refresh_interval_ms: self
                .refresh_interval_ms
                .or_else(|| existing.and_then(|e| e.refresh_interval_ms)),
            panels: existing.and_then(|e| e.panels.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, entry: ProfileEntry) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(name.into(), entry);
        pf
    }

    fn prod() -> ProfileEntry {
        ProfileEntry {
            api_endpoint: "https://stats.example.com/api".into(),
            website_id: "site-1".into(),
            refresh_interval_ms: Some(10_000),
            panels: None,
        }
    }

    #[test]
    fn profile_only_loads_entry() {
        let pf = file_with("prod", prod());
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            ..Default::default()
        };
        assert_eq!(req.resolve(&pf), ResolveProfile::Loaded(prod()));
    }

    #[test]
    fn profile_only_applies_overrides() {
        let pf = file_with("prod", prod());
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            refresh_interval_ms: Some(5_000),
            ..Default::default()
        };
        match req.resolve(&pf) {
            ResolveProfile::Loaded(e) => {
                assert_eq!(e.refresh_interval_ms, Some(5_000));
                assert_eq!(e.website_id, "site-1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_profile_prompts_create() {
        let req = ProfileRequest {
            profile_name: Some("new".into()),
            ..Default::default()
        };
        assert_eq!(
            req.resolve(&ProfilesFile::default()),
            ResolveProfile::PromptCreate("new".into())
        );
    }

    #[test]
    fn endpoint_without_site_is_incomplete() {
        let req = ProfileRequest {
            api_endpoint: Some("https://a/api".into()),
            ..Default::default()
        };
        assert_eq!(
            req.resolve(&ProfilesFile::default()),
            ResolveProfile::MissingWebsiteId
        );
    }

    #[test]
    fn endpoint_reuses_site_from_named_profile() {
        let pf = file_with("prod", prod());
        let req = ProfileRequest {
            profile_name: Some("prod".into()),
            api_endpoint: Some("https://other/api".into()),
            ..Default::default()
        };
        match req.resolve(&pf) {
            ResolveProfile::Direct(e) => {
                assert_eq!(e.api_endpoint, "https://other/api");
                assert_eq!(e.website_id, "site-1");
                assert_eq!(e.refresh_interval_ms, Some(10_000));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nothing_given_selects_or_gives_up() {
        let req = ProfileRequest::default();
        assert_eq!(req.resolve(&ProfilesFile::default()), ResolveProfile::None);
        let pf = file_with("prod", prod());
        assert_eq!(
            ProfileRequest::default().resolve(&pf),
            ResolveProfile::PromptSelect(vec!["prod".into()])
        );
    }
}
