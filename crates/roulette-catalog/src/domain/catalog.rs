//! Catalog types and the `Catalogs` snapshot the game reads from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use roulette_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::defaults;

/// Intensity tier gating which phrases a level may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Light contact, early levels.
    Gentle,
    /// Middle levels.
    Medium,
    /// Late levels.
    Intense,
    /// Level 6 group challenges.
    Fusion,
}

impl Tier {
    /// Name used as the document key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Medium => "medium",
            Self::Intense => "intense",
            Self::Fusion => "fusion",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary gender tag carried by participants; selects gender-specific zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderTag {
    /// First tag.
    A,
    /// Second tag.
    B,
}

/// Zone phrases of one tier, split by which gender tag they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSet {
    /// Zones valid for any target.
    #[serde(default)]
    pub neutral: Vec<String>,
    /// Zones only drawn when the target carries tag A.
    #[serde(default)]
    pub gender_a: Vec<String>,
    /// Zones only drawn when the target carries tag B.
    #[serde(default)]
    pub gender_b: Vec<String>,
}

impl ZoneSet {
    /// Neutral zones followed by the zones specific to `target`.
    #[must_use]
    pub fn pool_for(&self, target: GenderTag) -> Vec<&str> {
        let specific = match target {
            GenderTag::A => &self.gender_a,
            GenderTag::B => &self.gender_b,
        };
        self.neutral
            .iter()
            .chain(specific)
            .map(String::as_str)
            .collect()
    }

    /// Every zone in the set, regardless of gender tag.
    #[must_use]
    pub fn all(&self) -> Vec<&str> {
        self.neutral
            .iter()
            .chain(&self.gender_a)
            .chain(&self.gender_b)
            .map(String::as_str)
            .collect()
    }
}

/// Action phrases keyed by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionCatalog(pub BTreeMap<Tier, Vec<String>>);

impl ActionCatalog {
    /// Phrases of `tier`; empty when the tier is missing.
    #[must_use]
    pub fn phrases(&self, tier: Tier) -> &[String] {
        self.0.get(&tier).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Body-zone phrases keyed by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneCatalog(pub BTreeMap<Tier, ZoneSet>);

impl ZoneCatalog {
    /// Zones of `tier`, if the tier exists.
    #[must_use]
    pub fn zones(&self, tier: Tier) -> Option<&ZoneSet> {
        self.0.get(&tier)
    }
}

/// How many participants a joker template names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlayersNeededRepr", into = "PlayersNeededRepr")]
pub enum PlayersNeeded {
    /// `{player1}`.
    One,
    /// `{player1}` and `{player2}`, mutually compatible.
    Two,
    /// Three mutually compatible participants.
    Three,
    /// The whole roster.
    All,
}

impl PlayersNeeded {
    /// Fixed slot count, `None` for [`PlayersNeeded::All`].
    #[must_use]
    pub const fn count(self) -> Option<usize> {
        match self {
            Self::One => Some(1),
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::All => None,
        }
    }
}

/// Wire form: a number (1, 2, 3) or the string `"all"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PlayersNeededRepr {
    Count(u8),
    Keyword(String),
}

impl TryFrom<PlayersNeededRepr> for PlayersNeeded {
    type Error = String;

    fn try_from(repr: PlayersNeededRepr) -> Result<Self, Self::Error> {
        match repr {
            PlayersNeededRepr::Count(1) => Ok(Self::One),
            PlayersNeededRepr::Count(2) => Ok(Self::Two),
            PlayersNeededRepr::Count(3) => Ok(Self::Three),
            PlayersNeededRepr::Keyword(word) if word.eq_ignore_ascii_case("all") => Ok(Self::All),
            PlayersNeededRepr::Count(n) => Err(format!(
                "playersNeeded must be 1, 2, 3 or \"all\", got {n}"
            )),
            PlayersNeededRepr::Keyword(word) => {
                Err(format!("playersNeeded must be 1, 2, 3 or \"all\", got {word:?}"))
            }
        }
    }
}

impl From<PlayersNeeded> for PlayersNeededRepr {
    fn from(needed: PlayersNeeded) -> Self {
        match needed {
            PlayersNeeded::One => Self::Count(1),
            PlayersNeeded::Two => Self::Count(2),
            PlayersNeeded::Three => Self::Count(3),
            PlayersNeeded::All => Self::Keyword("all".to_owned()),
        }
    }
}

/// A scripted joker challenge with `{playerN}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JokerTemplate {
    /// Stable identifier such as `joker1-3`.
    pub id: String,
    /// Markdown text; `{player1}`..`{player3}` are substituted with names.
    pub template: String,
    /// How many participants the template names.
    pub players_needed: PlayersNeeded,
    /// Props the challenge calls for.
    #[serde(default)]
    pub accessories: Vec<String>,
}

/// Joker templates keyed by level id (`level1`..`level5`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokerCatalog(pub BTreeMap<String, Vec<JokerTemplate>>);

impl JokerCatalog {
    /// Templates of a level; empty when the level has none.
    #[must_use]
    pub fn templates(&self, level_id: &str) -> &[JokerTemplate] {
        self.0.get(level_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Drops templates whose text is blank.
    #[must_use]
    pub fn without_blank_templates(mut self) -> Self {
        for templates in self.0.values_mut() {
            templates.retain(|t| !t.template.trim().is_empty());
        }
        self
    }
}

/// Name of one of the three catalog documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogName {
    /// `actions`
    Actions,
    /// `bodyParts`
    BodyParts,
    /// `jokerChallenges`
    JokerChallenges,
}

impl CatalogName {
    /// All documents, in load order.
    pub const ALL: [Self; 3] = [Self::Actions, Self::BodyParts, Self::JokerChallenges];

    /// Document key in the content store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::BodyParts => "bodyParts",
            Self::JokerChallenges => "jokerChallenges",
        }
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown catalog {s:?}")))
    }
}

/// The three catalogs as one immutable snapshot.
///
/// `Default` yields the built-in content. Missing sections in YAML seed
/// files also fall back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalogs {
    /// Action phrases by tier.
    pub actions: ActionCatalog,
    /// Body-zone phrases by tier and gender tag.
    pub body_parts: ZoneCatalog,
    /// Joker templates by level id.
    pub joker_challenges: JokerCatalog,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            actions: defaults::actions(),
            body_parts: defaults::body_parts(),
            joker_challenges: defaults::joker_challenges(),
        }
    }
}

impl Catalogs {
    /// JSON document for `name`.
    ///
    /// # Panics
    ///
    /// Never: every catalog type serializes to JSON infallibly.
    #[must_use]
    pub fn document(&self, name: CatalogName) -> serde_json::Value {
        let value = match name {
            CatalogName::Actions => serde_json::to_value(&self.actions),
            CatalogName::BodyParts => serde_json::to_value(&self.body_parts),
            CatalogName::JokerChallenges => serde_json::to_value(&self.joker_challenges),
        };
        // Serialization of derived Serialize types with string keys is infallible.
        value.expect("catalog serialization is infallible")
    }

    /// Replaces one catalog with the decoded `body`. Blank joker templates
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `body` does not have the shape of
    /// the named catalog.
    pub fn with_document(
        mut self,
        name: CatalogName,
        body: serde_json::Value,
    ) -> Result<Self, DomainError> {
        let invalid =
            |e: serde_json::Error| DomainError::Validation(format!("invalid {name} document: {e}"));
        match name {
            CatalogName::Actions => self.actions = serde_json::from_value(body).map_err(invalid)?,
            CatalogName::BodyParts => {
                self.body_parts = serde_json::from_value(body).map_err(invalid)?;
            }
            CatalogName::JokerChallenges => {
                let jokers: JokerCatalog = serde_json::from_value(body).map_err(invalid)?;
                self.joker_challenges = jokers.without_blank_templates();
            }
        }
        Ok(self)
    }

    /// Parses a YAML seed file with `actions`, `bodyParts` and
    /// `jokerChallenges` sections.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the YAML is malformed.
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let catalogs: Self = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Validation(format!("invalid catalog seed file: {e}")))?;
        Ok(Self {
            joker_challenges: catalogs.joker_challenges.without_blank_templates(),
            ..catalogs
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zone_pool_combines_neutral_and_target_specific_zones() {
        let set = ZoneSet {
            neutral: vec!["the neck".to_owned()],
            gender_a: vec!["the jawline".to_owned()],
            gender_b: vec!["the collarbone".to_owned()],
        };

        assert_eq!(set.pool_for(GenderTag::A), vec!["the neck", "the jawline"]);
        assert_eq!(set.pool_for(GenderTag::B), vec!["the neck", "the collarbone"]);
        assert_eq!(set.all().len(), 3);
    }

    #[test]
    fn test_players_needed_accepts_numbers_and_all() {
        let parsed: Vec<PlayersNeeded> = serde_json::from_value(json!([1, 2, 3, "all"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                PlayersNeeded::One,
                PlayersNeeded::Two,
                PlayersNeeded::Three,
                PlayersNeeded::All
            ]
        );
        assert_eq!(serde_json::to_value(PlayersNeeded::All).unwrap(), json!("all"));
        assert_eq!(serde_json::to_value(PlayersNeeded::Two).unwrap(), json!(2));
    }

    #[test]
    fn test_players_needed_rejects_four() {
        let result: Result<PlayersNeeded, _> = serde_json::from_value(json!(4));
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_name_parses_document_keys() {
        assert_eq!("bodyParts".parse::<CatalogName>().unwrap(), CatalogName::BodyParts);
        match "zones".parse::<CatalogName>() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("zones")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_with_document_replaces_actions() {
        let body = json!({ "gentle": ["waves at"], "medium": [], "intense": [], "fusion": [] });

        let catalogs = Catalogs::default()
            .with_document(CatalogName::Actions, body)
            .unwrap();

        assert_eq!(catalogs.actions.phrases(Tier::Gentle), ["waves at".to_owned()]);
        assert!(catalogs.actions.phrases(Tier::Medium).is_empty());
    }

    #[test]
    fn test_with_document_drops_blank_joker_templates() {
        let body = json!({
            "level1": [
                { "id": "j1", "template": "{player1} sings.", "playersNeeded": 1 },
                { "id": "j2", "template": "   ", "playersNeeded": 2 }
            ]
        });

        let catalogs = Catalogs::default()
            .with_document(CatalogName::JokerChallenges, body)
            .unwrap();

        let templates = catalogs.joker_challenges.templates("level1");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "j1");
        assert!(templates[0].accessories.is_empty());
    }

    #[test]
    fn test_with_document_rejects_wrong_shape() {
        let result =
            Catalogs::default().with_document(CatalogName::BodyParts, json!({ "gentle": 3 }));

        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.starts_with("invalid bodyParts")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_document_of_defaults_uses_tier_keys() {
        let doc = Catalogs::default().document(CatalogName::Actions);
        let object = doc.as_object().unwrap();
        for key in ["gentle", "medium", "intense", "fusion"] {
            assert!(object.contains_key(key), "missing tier {key}");
        }
    }

    #[test]
    fn test_from_yaml_keeps_defaults_for_missing_sections() {
        let yaml = "actions:\n  gentle: [\"hugs\"]\n  fusion: [\"Slow dance\"]\n";

        let catalogs = Catalogs::from_yaml_str(yaml).unwrap();

        assert_eq!(catalogs.actions.phrases(Tier::Gentle), ["hugs".to_owned()]);
        assert_eq!(catalogs.body_parts, defaults::body_parts());
        assert_eq!(catalogs.joker_challenges, defaults::joker_challenges());
    }
}
