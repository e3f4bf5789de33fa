// Not every test binary uses every helper.
#![allow(dead_code)]

use hashbrown::HashMap;
use tramgraph_core::prelude::*;

pub fn raw_node(id: NodeId, lat: f64, lon: f64, tags: &[(&str, &str)]) -> RawNode {
    RawNode {
        id,
        lat,
        lon,
        tags: to_tags(tags),
    }
}

pub fn way(id: i64, node_ids: &[NodeId], tags: &[(&str, &str)]) -> TramWay {
    TramWay {
        id,
        node_ids: node_ids.to_vec(),
        tags: to_tags(tags),
    }
}

pub fn city_configuration() -> CityConfiguration {
    CityConfiguration {
        city: "Testville".to_owned(),
        country: "Poland".to_owned(),
        osm_area_name: "Testville".to_owned(),
        gtfs_url: "https://example.com/gtfs.zip".to_owned(),
        ignored_gtfs_lines: Vec::new(),
        ignored_osm_relations: Vec::new(),
        custom_stop_mapping: HashMap::new(),
        max_distance_ratio: 2.0,
        custom_tram_stop_pair_max_distance_checks: Vec::new(),
    }
}

pub fn transformer(ways: &[TramWay], points: &[RawNode]) -> TramTrackGraphTransformer {
    TramTrackGraphTransformer::new(ways, points, &city_configuration()).unwrap()
}

fn to_tags(tags: &[(&str, &str)]) -> HashMap<String, String> {
    tags.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
