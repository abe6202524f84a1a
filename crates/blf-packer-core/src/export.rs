use crate::model::AtlasLayout;
use serde_json::{Value, json};

/// Serialize a layout as the manifest consumed by extraction tooling.
///
/// Shape: `{ filepath, width, height, regions: { "<index>": { key, x, y,
/// width, height } } }`, regions keyed by placement index. `y` is the top-left
/// row of the region in image coordinates: `bottom` when the page was
/// composited with the vertical axis flipped, `height - top` otherwise.
pub fn to_json_manifest<K: ToString>(
    layout: &AtlasLayout<K>,
    image_path: Option<&str>,
    flip_vertical: bool,
) -> Value {
    let mut regions = serde_json::Map::new();
    for (i, region) in layout.regions.iter().enumerate() {
        let y = if flip_vertical {
            region.bottom
        } else {
            layout.height as i32 - region.top
        };
        regions.insert(
            i.to_string(),
            json!({
                "key": region.key.to_string(),
                "x": region.left,
                "y": y,
                "width": region.width(),
                "height": region.height(),
            }),
        );
    }
    json!({
        "filepath": image_path,
        "width": layout.width,
        "height": layout.height,
        "regions": Value::Object(regions),
    })
}
