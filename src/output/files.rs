// Result files — the JSON document and the decoded PNG images.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::AnalysisResult;
use crate::render::decode_base64;

pub const WORDCLOUD_FILE: &str = "wordcloud.png";
pub const COOCCURRENCE_FILE: &str = "cooccurrence.png";

/// Write the result as pretty-printed JSON, creating parent directories.
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Decode both images and write them into `dir`. Returns the written paths.
pub fn write_images(result: &AnalysisResult, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(2);
    for (name, encoded) in [
        (WORDCLOUD_FILE, &result.wordcloud),
        (COOCCURRENCE_FILE, &result.cooccurrence_img),
    ] {
        let path = dir.join(name);
        let png = decode_base64(encoded)?;
        fs::write(&path, png).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipeline::analyze_records;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("murmur-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_json_and_pngs() {
        let records = vec![
            "river boats drifting slowly".to_string(),
            "boats on the river at dawn".to_string(),
        ];
        let result = analyze_records(&records, &AnalysisConfig::default()).unwrap();
        let dir = scratch_dir("files");

        let json_path = dir.join("out").join("result.json");
        write_json(&result, &json_path).unwrap();
        let back: AnalysisResult =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back.sentiment_summary, result.sentiment_summary);

        let paths = write_images(&result, &dir).unwrap();
        assert_eq!(paths.len(), 2);
        let cloud = image::open(&paths[0]).unwrap();
        assert_eq!((cloud.width(), cloud.height()), (800, 400));

        fs::remove_dir_all(&dir).unwrap();
    }
}
