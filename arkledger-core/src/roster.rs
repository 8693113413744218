//! Roster search payload and character parsing.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One roster character. Names are unique within a server; the whole
/// roster is re-fetched on refresh rather than patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub server: String,
    pub class_name: String,
    pub level: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("unparseable item level {raw:?} for character {character}")]
    BadItemLevel { character: String, raw: String },
}

/// One character row as it arrives from the search payload. Item levels
/// are display strings, e.g. `"1,632.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRow {
    pub character_name: String,
    pub class_name: String,
    pub item_level: String,
}

/// One server group from the search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerGroup {
    pub server_name: String,
    #[serde(default)]
    pub characters: Vec<CharacterRow>,
}

/// The raw search payload: a nickname's characters grouped by server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    #[serde(default)]
    pub servers: Vec<ServerGroup>,
}

impl SearchPayload {
    /// Load a search payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into server groups.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A parsed roster grouped by server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub servers: Vec<ServerRoster>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRoster {
    pub name: String,
    pub characters: Vec<Character>,
}

impl Roster {
    /// Parse a fetched payload into a roster.
    ///
    /// # Errors
    ///
    /// Returns an error when a character row carries an item level that
    /// does not parse as a number.
    pub fn from_payload(payload: &SearchPayload) -> Result<Self, RosterError> {
        let mut servers = Vec::with_capacity(payload.servers.len());
        for group in &payload.servers {
            let mut characters = Vec::with_capacity(group.characters.len());
            for row in &group.characters {
                let level = parse_item_level(&row.item_level).ok_or_else(|| {
                    RosterError::BadItemLevel {
                        character: row.character_name.clone(),
                        raw: row.item_level.clone(),
                    }
                })?;
                characters.push(Character {
                    name: row.character_name.clone(),
                    server: group.server_name.clone(),
                    class_name: row.class_name.clone(),
                    level,
                });
            }
            servers.push(ServerRoster {
                name: group.server_name.clone(),
                characters,
            });
        }
        Ok(Self { servers })
    }

    /// Every character across all servers.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.servers.iter().flat_map(|server| server.characters.iter())
    }

    #[must_use]
    pub fn server(&self, name: &str) -> Option<&ServerRoster> {
        self.servers.iter().find(|server| server.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.iter().all(|server| server.characters.is_empty())
    }
}

fn parse_item_level(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned.parse().ok().filter(|level: &f64| level.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "servers": [
            {
                "serverName": "루페온",
                "characters": [
                    {"characterName": "창술사", "className": "Glaivier", "itemLevel": "1,632.50"},
                    {"characterName": "버서커", "className": "Berserker", "itemLevel": "1,580.00"}
                ]
            },
            {
                "serverName": "카단",
                "characters": [
                    {"characterName": "소서리스", "className": "Sorceress", "itemLevel": "1,475.83"}
                ]
            }
        ]
    }"#;

    #[test]
    fn payload_parses_into_a_grouped_roster() {
        let payload = SearchPayload::from_json(PAYLOAD).unwrap();
        let roster = Roster::from_payload(&payload).unwrap();

        assert_eq!(roster.servers.len(), 2);
        assert_eq!(roster.characters().count(), 3);

        let lupeon = roster.server("루페온").unwrap();
        assert_eq!(lupeon.characters[0].level, 1632.5);
        assert_eq!(lupeon.characters[0].server, "루페온");
        assert!(roster.server("니나브").is_none());
    }

    #[test]
    fn bad_item_levels_surface_a_typed_error() {
        let payload = SearchPayload {
            servers: vec![ServerGroup {
                server_name: "루페온".to_string(),
                characters: vec![CharacterRow {
                    character_name: "창술사".to_string(),
                    class_name: "Glaivier".to_string(),
                    item_level: "측정불가".to_string(),
                }],
            }],
        };
        let err = Roster::from_payload(&payload).unwrap_err();
        assert_eq!(
            err,
            RosterError::BadItemLevel {
                character: "창술사".to_string(),
                raw: "측정불가".to_string(),
            }
        );
    }

    #[test]
    fn empty_payload_is_an_empty_roster() {
        let roster = Roster::from_payload(&SearchPayload::default()).unwrap();
        assert!(roster.is_empty());
    }
}
