// crates/lottieview-media/src/composition.rs
//
// Lottie document loading: plain `.json` and zipped `.lottie` (dotLottie).
//
// Only the header and layer spans are read — enough to drive the engine
// clock and the surface's layer strip. Shape data is left as raw JSON and
// never deserialized.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use lottieview_core::composition::{Composition, LayerKind, LayerSpan};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Deserialize)]
struct LottieJson {
    #[serde(default)]
    v:      String,
    #[serde(default)]
    nm:     Option<String>,
    ip:     f32,
    op:     f32,
    fr:     f32,
    w:      u32,
    h:      u32,
    #[serde(default)]
    layers: Vec<LayerJson>,
}

#[derive(Debug, Deserialize)]
struct LayerJson {
    #[serde(default)]
    nm: Option<String>,
    #[serde(default)]
    ty: Option<u8>,
    #[serde(default)]
    ip: f32,
    #[serde(default)]
    op: f32,
}

#[derive(Debug, Deserialize)]
struct DotLottieManifest {
    #[serde(default)]
    animations: Vec<ManifestAnimation>,
}

#[derive(Debug, Deserialize)]
struct ManifestAnimation {
    id: String,
}

/// Read and parse the document at `path`. The zip container is detected by
/// its magic bytes, not the extension, so a renamed file still loads.
pub fn load_composition(path: &Path) -> Result<Composition> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let fallback = path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if bytes.starts_with(ZIP_MAGIC) {
        let json = read_dotlottie(&bytes)
            .with_context(|| format!("invalid .lottie container {}", path.display()))?;
        parse_composition(&json, &fallback)
    } else {
        parse_composition(&bytes, &fallback)
    }
}

/// Parse Lottie JSON bytes. `fallback_name` is used when the document has no `nm`.
pub fn parse_composition(bytes: &[u8], fallback_name: &str) -> Result<Composition> {
    let doc: LottieJson = serde_json::from_slice(bytes)
        .context("not a Lottie animation")?;

    if !doc.fr.is_finite() || doc.fr <= 0.0 {
        bail!("frame rate must be positive (fr = {})", doc.fr);
    }
    if doc.op.is_nan() || doc.ip.is_nan() || doc.op <= doc.ip {
        bail!("out point {} is not after in point {}", doc.op, doc.ip);
    }
    if doc.w == 0 || doc.h == 0 {
        bail!("canvas size {}x{} is empty", doc.w, doc.h);
    }

    let layers = doc.layers.into_iter().enumerate().map(|(i, l)| LayerSpan {
        name:      l.nm.unwrap_or_else(|| format!("Layer {}", i + 1)),
        kind:      LayerKind::from_code(l.ty.unwrap_or(u8::MAX)),
        in_point:  l.ip,
        out_point: l.op,
    }).collect();

    Ok(Composition {
        name:       doc.nm.filter(|n| !n.is_empty()).unwrap_or_else(|| fallback_name.to_string()),
        version:    doc.v,
        width:      doc.w,
        height:     doc.h,
        in_point:   doc.ip,
        out_point:  doc.op,
        frame_rate: doc.fr,
        layers,
    })
}

/// Pull the primary animation JSON out of a dotLottie archive: the first
/// manifest entry, else the first `animations/*.json` in the archive.
fn read_dotlottie(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .context("not a zip archive")?;

    let from_manifest = match archive.by_name("manifest.json") {
        Ok(mut entry) => {
            let mut raw = Vec::new();
            entry.read_to_end(&mut raw).context("cannot read manifest.json")?;
            let manifest: DotLottieManifest = serde_json::from_slice(&raw)
                .context("malformed manifest.json")?;
            manifest.animations.first().map(|a| format!("animations/{}.json", a.id))
        }
        Err(_) => None,
    };

    let name = match from_manifest {
        Some(name) => name,
        None => archive.file_names()
            .filter(|n| n.starts_with("animations/") && n.ends_with(".json"))
            .min()
            .map(str::to_owned)
            .context("archive contains no animations/*.json")?,
    };

    let mut entry = archive.by_name(&name)
        .with_context(|| format!("missing {name}"))?;
    let mut json = Vec::new();
    entry.read_to_end(&mut json).with_context(|| format!("cannot read {name}"))?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BOUNCE: &str = r#"{
        "v": "5.7.4", "nm": "Bounce", "ip": 0, "op": 60, "fr": 30, "w": 512, "h": 256,
        "layers": [
            { "nm": "ball",   "ty": 4, "ip": 0,  "op": 60, "ks": {} },
            { "ty": 1, "ip": 30, "op": 60 }
        ],
        "assets": []
    }"#;

    fn write_zip(entries: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".lottie").tempfile().unwrap();
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        for (name, body) in entries {
            zip.start_file(*name, zip::write::FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        file
    }

    #[test]
    fn parses_header_and_layers() {
        let c = parse_composition(BOUNCE.as_bytes(), "fallback").unwrap();
        assert_eq!(c.name, "Bounce");
        assert_eq!(c.version, "5.7.4");
        assert_eq!((c.width, c.height), (512, 256));
        assert_eq!(c.duration_frames(), 60.0);
        assert_eq!(c.layers.len(), 2);
        assert_eq!(c.layers[0].kind, LayerKind::Shape);
        assert_eq!(c.layers[1].name, "Layer 2");
        assert_eq!(c.layers[1].kind, LayerKind::Solid);
    }

    #[test]
    fn missing_name_uses_fallback() {
        let json = r#"{"ip":0,"op":10,"fr":24,"w":10,"h":10}"#;
        let c = parse_composition(json.as_bytes(), "spinner").unwrap();
        assert_eq!(c.name, "spinner");
        assert!(c.layers.is_empty());
    }

    #[test]
    fn rejects_invalid_documents() {
        let err = parse_composition(b"{\"hello\": 1}", "x").unwrap_err();
        assert!(err.to_string().contains("not a Lottie animation"));

        let zero_fr = r#"{"ip":0,"op":10,"fr":0,"w":10,"h":10}"#;
        assert!(parse_composition(zero_fr.as_bytes(), "x").is_err());

        let backwards = r#"{"ip":20,"op":10,"fr":30,"w":10,"h":10}"#;
        assert!(parse_composition(backwards.as_bytes(), "x").is_err());

        let empty = r#"{"ip":0,"op":10,"fr":30,"w":0,"h":10}"#;
        assert!(parse_composition(empty.as_bytes(), "x").is_err());
    }

    #[test]
    fn loads_plain_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(BOUNCE.as_bytes()).unwrap();
        let c = load_composition(file.path()).unwrap();
        assert_eq!(c.name, "Bounce");
    }

    #[test]
    fn loads_dotlottie_via_manifest() {
        let file = write_zip(&[
            ("manifest.json", r#"{"version":"1","animations":[{"id":"main"}]}"#),
            ("animations/aaa.json", r#"{"nm":"Wrong","ip":0,"op":5,"fr":30,"w":1,"h":1}"#),
            ("animations/main.json", BOUNCE),
        ]);
        let c = load_composition(file.path()).unwrap();
        assert_eq!(c.name, "Bounce");
    }

    #[test]
    fn dotlottie_without_manifest_uses_first_animation() {
        let file = write_zip(&[("animations/only.json", BOUNCE)]);
        let c = load_composition(file.path()).unwrap();
        assert_eq!(c.frame_rate, 30.0);
    }

    #[test]
    fn dotlottie_without_animations_fails() {
        let file = write_zip(&[("images/a.png", "not really")]);
        let err = load_composition(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no animations"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_composition(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
