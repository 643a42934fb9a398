use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Number of entries every identification result carries.
pub const TARGET_COUNT: usize = 5;

/// Label used to pad results that came back short.
pub const PLACEHOLDER_NAME: &str = "Unknown";

/// One named entry of an identification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedPokemon {
    pub name: String,
}

impl IdentifiedPokemon {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_NAME)
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }
}

/// The fixed-length list returned to callers.
///
/// Always holds exactly [`TARGET_COUNT`] entries: extra names are dropped,
/// missing ones are filled with [`PLACEHOLDER_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentificationResult {
    pokemon: Vec<IdentifiedPokemon>,
}

impl IdentificationResult {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pokemon: Vec<IdentifiedPokemon> = names
            .into_iter()
            .take(TARGET_COUNT)
            .map(IdentifiedPokemon::new)
            .collect();
        pokemon.resize_with(TARGET_COUNT, IdentifiedPokemon::placeholder);
        Self { pokemon }
    }

    /// A result made only of placeholders.
    pub fn unknown() -> Self {
        Self::from_names(std::iter::empty::<String>())
    }

    pub fn pokemon(&self) -> &[IdentifiedPokemon] {
        &self.pokemon
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pokemon.iter().map(|p| p.name.as_str())
    }

    /// Number of entries that are real names rather than padding.
    pub fn identified_count(&self) -> usize {
        self.pokemon.iter().filter(|p| !p.is_placeholder()).count()
    }

    pub fn into_inner(self) -> Vec<IdentifiedPokemon> {
        self.pokemon
    }
}

/// A validated image upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub mime_type: String,
    pub data: Bytes,
}

/// Top label produced by an image-classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub predicted_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_lists() {
        let result = IdentificationResult::from_names(["Pikachu", "Raichu", "Pichu"]);
        let names: Vec<_> = result.names().collect();
        assert_eq!(names, ["Pikachu", "Raichu", "Pichu", "Unknown", "Unknown"]);
        assert_eq!(result.identified_count(), 3);
    }

    #[test]
    fn truncates_long_lists() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let result = IdentificationResult::from_names(names);
        assert_eq!(result.pokemon().len(), TARGET_COUNT);
        assert_eq!(result.names().last(), Some("E"));
    }

    #[test]
    fn empty_input_is_all_placeholders() {
        let result = IdentificationResult::unknown();
        assert_eq!(result.pokemon().len(), TARGET_COUNT);
        assert!(result.pokemon().iter().all(IdentifiedPokemon::is_placeholder));
    }

    #[test]
    fn serializes_as_name_objects() {
        let result = IdentificationResult::from_names(["Eevee"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json[0]["name"], "Eevee");
        assert_eq!(json[4]["name"], "Unknown");
        assert_eq!(json.as_array().map(Vec::len), Some(5));
    }
}
