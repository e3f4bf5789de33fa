use hashbrown::HashMap;
use serde::Deserialize;

use crate::{DEFAULT_MAX_SPEED_KPH, NodeId};

const KPH_TO_MS: f64 = 3.6;

/// Raw way record: an ordered run of node ids describing a physical track
/// segment, with its source tags. Produced by the data-source collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct TramWay {
    pub id: i64,
    #[serde(rename = "nodes")]
    pub node_ids: Vec<NodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl TramWay {
    /// Ways carry edges in both directions unless tagged `oneway=yes`.
    pub fn is_oneway(&self) -> bool {
        self.tags.get("oneway").is_some_and(|v| v == "yes")
    }

    /// Speed limit in m/s, parsed from the `maxspeed` tag (km/h). Missing or
    /// unparseable values fall back to [`DEFAULT_MAX_SPEED_KPH`].
    pub fn max_speed(&self) -> f64 {
        self.tags
            .get("maxspeed")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_MAX_SPEED_KPH)
            / KPH_TO_MS
    }
}

/// Raw point record as exported by the data-source collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way_with_tags(tags: &[(&str, &str)]) -> TramWay {
        TramWay {
            id: 1,
            node_ids: vec![1, 2],
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn max_speed_parses_kph_into_ms() {
        let way = way_with_tags(&[("maxspeed", "72")]);
        assert!((way.max_speed() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn max_speed_defaults_on_missing_or_garbage() {
        let expected = DEFAULT_MAX_SPEED_KPH / 3.6;
        assert!((way_with_tags(&[]).max_speed() - expected).abs() < 1e-9);
        let way = way_with_tags(&[("maxspeed", "walk")]);
        assert!((way.max_speed() - expected).abs() < 1e-9);
    }

    #[test]
    fn oneway_requires_exact_yes() {
        assert!(way_with_tags(&[("oneway", "yes")]).is_oneway());
        assert!(!way_with_tags(&[("oneway", "no")]).is_oneway());
        assert!(!way_with_tags(&[]).is_oneway());
    }
}
