// ─── Library Descriptor ───
// A downloadable artifact, its per-OS native variants, extraction policy and
// the rules deciding whether it applies to the current platform.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::os::{arch_bits, OperatingSystem, PlatformContext};
use super::rule::{evaluate, CompatibilityRule, RuleAction};
use crate::core::error::{LauncherError, LauncherResult};

/// Distribution origin used when a library carries no override URL.
pub const DEFAULT_LIBRARY_URL: &str = "https://libraries.minecraft.net/";

const ARCH_TOKEN: &str = "${arch}";

/// Unpacking instructions for an archive after download.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractRules {
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ExtractRules {
    pub fn new(exclude: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// An entry is extracted unless it starts with an excluded prefix.
    pub fn should_extract(&self, path: &str) -> bool {
        !self.exclude.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// A library entry of a version catalog.
///
/// `name` is a `group:artifact:version` coordinate. Cloning deep-copies the
/// rule list, native map and extraction policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryDescriptor {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    rules: Vec<CompatibilityRule>,
    #[serde(
        default,
        deserialize_with = "supported_natives",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    natives: BTreeMap<OperatingSystem, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extract: Option<ExtractRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl LibraryDescriptor {
    /// Build a descriptor for a `group:artifact:version` coordinate.
    ///
    /// Deserialized descriptors skip this check and fail on first artifact use.
    pub fn new(name: impl Into<String>) -> LauncherResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LauncherError::InvalidDescriptor(
                "library name cannot be empty".into(),
            ));
        }
        let library = Self {
            name,
            ..Self::default()
        };
        library.coordinate_parts()?;
        Ok(library)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_rule(mut self, rule: CompatibilityRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn compatibility_rules(&self) -> &[CompatibilityRule] {
        &self.rules
    }

    /// Register a native classifier for `os`.
    pub fn add_native(
        &mut self,
        os: OperatingSystem,
        classifier: impl Into<String>,
    ) -> LauncherResult<&mut Self> {
        if !os.is_supported() {
            return Err(LauncherError::InvalidArgument(format!(
                "cannot add native for unsupported OS '{}'",
                os
            )));
        }
        let classifier = classifier.into();
        if classifier.is_empty() {
            return Err(LauncherError::InvalidArgument(
                "cannot add native with an empty classifier".into(),
            ));
        }
        self.natives.insert(os, classifier);
        Ok(self)
    }

    pub fn natives(&self) -> &BTreeMap<OperatingSystem, String> {
        &self.natives
    }

    /// Classifier for `os` with `${arch}` substituted.
    pub fn native_classifier_for(&self, os: OperatingSystem) -> Option<String> {
        self.natives.get(&os).map(|c| substitute_arch(c))
    }

    pub fn native_classifier_for_current_os(&self) -> Option<String> {
        self.native_classifier_for(PlatformContext::current().os)
    }

    pub fn extract_rules(&self) -> Option<&ExtractRules> {
        self.extract.as_ref()
    }

    pub fn set_extract_rules(&mut self, rules: Option<ExtractRules>) -> &mut Self {
        self.extract = rules;
        self
    }

    pub fn applies_to(&self, ctx: &PlatformContext) -> bool {
        evaluate(&self.rules, ctx) == RuleAction::Allow
    }

    pub fn applies_to_current_environment(&self) -> bool {
        self.applies_to(PlatformContext::current())
    }

    pub fn has_custom_url(&self) -> bool {
        self.url.is_some()
    }

    pub fn download_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_LIBRARY_URL)
    }

    /// Repository directory: `group/path/artifact/version`.
    pub fn artifact_base_dir(&self) -> LauncherResult<String> {
        let (group, artifact, version) = self.coordinate_parts()?;
        Ok(format!("{}/{}/{}", group.replace('.', "/"), artifact, version))
    }

    /// `artifact-version[-classifier].jar`, with `${arch}` substituted.
    pub fn artifact_filename(&self, classifier: Option<&str>) -> LauncherResult<String> {
        let (_, artifact, version) = self.coordinate_parts()?;
        let filename = match classifier.filter(|c| !c.is_empty()) {
            Some(c) => format!("{}-{}-{}.jar", artifact, version, c),
            None => format!("{}-{}.jar", artifact, version),
        };
        Ok(substitute_arch(&filename))
    }

    pub fn artifact_path(&self, classifier: Option<&str>) -> LauncherResult<String> {
        Ok(format!(
            "{}/{}",
            self.artifact_base_dir()?,
            self.artifact_filename(classifier)?
        ))
    }

    fn coordinate_parts(&self) -> LauncherResult<(&str, &str, &str)> {
        if self.name.is_empty() {
            return Err(LauncherError::InvalidDescriptor(
                "cannot derive artifact of an empty coordinate".into(),
            ));
        }
        let parts: Vec<&str> = self.name.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok((*group, *artifact, *version))
            }
            _ => Err(LauncherError::InvalidDescriptor(format!(
                "coordinate '{}' is not group:artifact:version",
                self.name
            ))),
        }
    }
}

impl fmt::Display for LibraryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn substitute_arch(value: &str) -> String {
    value.replace(ARCH_TOKEN, arch_bits())
}

/// Drops entries for unknown operating systems or with empty classifiers.
fn supported_natives<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<OperatingSystem, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<OperatingSystem, String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter(|(os, classifier)| os.is_supported() && !classifier.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dir_turns_group_dots_into_separators() {
        let lib = LibraryDescriptor::new("g.g2:a:v").unwrap();
        assert_eq!(lib.artifact_base_dir().unwrap(), "g/g2/a/v");
    }

    #[test]
    fn filename_with_and_without_classifier() {
        let lib = LibraryDescriptor::new("g.g2:a:v").unwrap();
        assert_eq!(lib.artifact_filename(None).unwrap(), "a-v.jar");
        assert_eq!(
            lib.artifact_filename(Some("natives-linux")).unwrap(),
            "a-v-natives-linux.jar"
        );
        assert_eq!(lib.artifact_filename(Some("")).unwrap(), "a-v.jar");
    }

    #[test]
    fn artifact_path_joins_dir_and_filename() {
        let lib = LibraryDescriptor::new("org.lwjgl.lwjgl:lwjgl:2.9.0").unwrap();
        assert_eq!(
            lib.artifact_path(Some("natives-windows")).unwrap(),
            "org/lwjgl/lwjgl/lwjgl/2.9.0/lwjgl-2.9.0-natives-windows.jar"
        );
    }

    #[test]
    fn arch_token_is_substituted() {
        let lib = LibraryDescriptor::new("tv.twitch:twitch-platform:5.16").unwrap();
        let name = lib.artifact_filename(Some("natives-windows-${arch}")).unwrap();
        assert_eq!(name, format!("twitch-platform-5.16-natives-windows-{}.jar", arch_bits()));
        assert!(!name.contains("${arch}"));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            LibraryDescriptor::new(""),
            Err(LauncherError::InvalidDescriptor(_))
        ));

        let lib = LibraryDescriptor::default();
        assert!(matches!(lib.artifact_base_dir(), Err(LauncherError::InvalidDescriptor(_))));
        assert!(matches!(
            lib.artifact_filename(None),
            Err(LauncherError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn malformed_coordinates_are_rejected_at_construction() {
        for coord in ["just-a-name", "g:a", "g:a:v:classifier", "g::v"] {
            assert!(
                matches!(
                    LibraryDescriptor::new(coord),
                    Err(LauncherError::InvalidDescriptor(_))
                ),
                "{coord} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_deserialized_coordinates_fail_on_use() {
        for coord in ["just-a-name", "g:a", "g:a:v:classifier", "g::v"] {
            let lib: LibraryDescriptor =
                serde_json::from_value(serde_json::json!({ "name": coord })).unwrap();
            assert!(
                matches!(lib.artifact_path(None), Err(LauncherError::InvalidDescriptor(_))),
                "{coord} should be rejected"
            );
        }
    }

    #[test]
    fn add_native_validates_input() {
        let mut lib = LibraryDescriptor::new("org.foo:bar:1.0").unwrap();
        assert!(matches!(
            lib.add_native(OperatingSystem::Unknown, "natives-x"),
            Err(LauncherError::InvalidArgument(_))
        ));
        assert!(matches!(
            lib.add_native(OperatingSystem::Linux, ""),
            Err(LauncherError::InvalidArgument(_))
        ));
        assert!(lib.natives().is_empty());

        lib.add_native(OperatingSystem::Linux, "natives-linux").unwrap();
        assert_eq!(lib.native_classifier_for(OperatingSystem::Linux).as_deref(), Some("natives-linux"));
        assert_eq!(lib.native_classifier_for(OperatingSystem::Osx), None);
    }

    #[test]
    fn clone_does_not_share_sub_objects() {
        let mut original = LibraryDescriptor::new("org.foo:bar:1.0")
            .unwrap()
            .with_rule(CompatibilityRule::allow());
        original.add_native(OperatingSystem::Windows, "natives-windows").unwrap();
        original.set_extract_rules(Some(ExtractRules::new(["META-INF/"])));

        let mut copy = original.clone();
        copy.add_native(OperatingSystem::Linux, "natives-linux").unwrap();
        copy.set_extract_rules(None);
        let copy = copy.with_rule(CompatibilityRule::disallow());

        assert_eq!(original.natives().len(), 1);
        assert!(original.extract_rules().is_some());
        assert_eq!(original.compatibility_rules().len(), 1);
        assert_eq!(copy.natives().len(), 2);
        assert_eq!(copy.compatibility_rules().len(), 2);
    }

    #[test]
    fn descriptor_without_rules_applies_everywhere() {
        let lib: LibraryDescriptor = serde_json::from_value(serde_json::json!({
            "name": "org.foo:bar:1.0",
            "natives": {"windows": "natives-windows"}
        }))
        .unwrap();

        assert!(lib.applies_to_current_environment());
        for os in OperatingSystem::SUPPORTED {
            assert!(lib.applies_to(&PlatformContext::new(os, "1.0", "x86_64")));
        }
        assert_eq!(lib.natives().len(), 1);
    }

    #[test]
    fn rules_restrict_applicability() {
        let lib = LibraryDescriptor::new("ca.weblite:java-objc-bridge:1.0.0")
            .unwrap()
            .with_rule(CompatibilityRule::allow_on(OperatingSystem::Osx));

        assert!(lib.applies_to(&PlatformContext::new(OperatingSystem::Osx, "14.0", "aarch64")));
        assert!(!lib.applies_to(&PlatformContext::new(OperatingSystem::Linux, "6.1", "x86_64")));
    }

    #[test]
    fn unsupported_native_keys_are_dropped_on_parse() {
        let lib: LibraryDescriptor = serde_json::from_value(serde_json::json!({
            "name": "org.foo:bar:1.0",
            "natives": {"linux": "natives-linux", "beos": "natives-beos", "osx": ""}
        }))
        .unwrap();
        assert_eq!(lib.natives().len(), 1);
        assert!(lib.natives().contains_key(&OperatingSystem::Linux));
    }

    #[test]
    fn download_url_prefers_override() {
        let lib = LibraryDescriptor::new("net.minecraftforge:forge:1.7.10").unwrap();
        assert_eq!(lib.download_url(), DEFAULT_LIBRARY_URL);
        assert!(!lib.has_custom_url());

        let lib = lib.with_url("https://files.minecraftforge.net/maven/");
        assert_eq!(lib.download_url(), "https://files.minecraftforge.net/maven/");
        assert!(lib.has_custom_url());
    }

    #[test]
    fn extract_rules_exclude_by_prefix() {
        let rules = ExtractRules::new(["META-INF/"]);
        assert!(!rules.should_extract("META-INF/MANIFEST.MF"));
        assert!(rules.should_extract("liblwjgl.so"));
    }
}
