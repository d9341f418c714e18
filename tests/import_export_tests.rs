use shadesmith::color::Hsv;
use shadesmith::export::{MuiPalette, render_provenance};
use shadesmith::extrapolate::ExtrapolationMode;
use shadesmith::generate::generate_palette;
use shadesmith::import::{import_palette, import_palette_str};
use shadesmith::scale::ShadeScale;
use shadesmith::shade::{ExtrapolationMethod, HueSet, Palette};

const MUI_JSON: &str = r##"{
  "mode": "light",
  "contrastThreshold": 3,
  "primary": {
    "100": "#6699cc",
    "500": "#336699",
    "main": "#336699",
    "contrastText": "#ffffff"
  },
  "error": {
    "300": "red",
    "700": "#800000"
  },
  "text": {
    "primary": "#000000"
  }
}"##;

#[test]
fn test_import_json_locks_numeric_shades() {
    let palette = import_palette_str(MUI_JSON, true, ExtrapolationMode::Expressive, None).unwrap();

    let names: Vec<&str> = palette.hue_sets.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["error", "primary"]);
    assert_eq!(palette.scale.labels(), &[100, 300, 500, 700]);

    let primary = palette.hue_set("primary").unwrap();
    assert_eq!(primary.extrapolation_mode, ExtrapolationMode::Expressive);
    assert_eq!(primary.locked_indices(), vec![0, 2]);
    assert_eq!(primary.shade(100).unwrap().color, "#6699cc");
    assert!(!primary.shade(300).unwrap().locked);

    let error = palette.hue_set("error").unwrap();
    assert_eq!(error.shade(300).unwrap().color, "#ff0000");
    assert_eq!(error.locked_indices(), vec![1, 3]);
}

#[test]
fn test_import_yaml_numeric_keys() {
    let yaml = r##"
primary:
  50: "#ffffff"
  900: "#000000"
mode: dark
"##;
    let palette = import_palette_str(yaml, false, ExtrapolationMode::Functional, None).unwrap();
    assert_eq!(palette.hue_sets.len(), 1);
    assert_eq!(palette.scale.labels(), &[50, 900]);
    assert_eq!(palette.hue_sets[0].locked_indices(), vec![0, 1]);
}

#[test]
fn test_import_rejects_palettes_without_ramps() {
    let err = import_palette_str(r#"{"mode": "light"}"#, true, ExtrapolationMode::Functional, None)
        .unwrap_err();
    assert!(err.to_string().contains("no numeric shade ramps"));
}

#[test]
fn test_import_rejects_bad_colors() {
    let json = r#"{"primary": {"500": "nope"}}"#;
    let err = import_palette_str(json, true, ExtrapolationMode::Functional, None).unwrap_err();
    assert!(err.to_string().contains("primary.500"));
}

#[test]
fn test_import_file_uses_stem_as_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brand.json");
    std::fs::write(&path, MUI_JSON).unwrap();

    let palette = import_palette(&path, ExtrapolationMode::Functional, None).unwrap();
    assert_eq!(palette.name, "brand");
    assert_eq!(palette.hue_sets.len(), 2);
}

#[test]
fn test_import_then_generate_fills_gaps() {
    let palette = import_palette_str(MUI_JSON, true, ExtrapolationMode::Functional, None).unwrap();
    let generated = generate_palette(&palette).palette;
    let mui = MuiPalette::from_palette(&generated);

    // Locked shades come back unchanged
    assert_eq!(mui.get("primary", "100"), Some("#6699cc"));
    assert_eq!(mui.get("primary", "500"), Some("#336699"));
    assert_eq!(mui.get("error", "700"), Some("#800000"));

    let primary = generated.hue_set("primary").unwrap();
    assert!(primary.shade(300).unwrap().extrapolation_method.is_some());
}

#[test]
fn test_import_onto_configured_scale_generates_missing_shades() {
    let json = r##"{"primary": {"100": "#6699cc", "700": "#336699"}}"##;
    let scale = ShadeScale::default();
    let palette =
        import_palette_str(json, true, ExtrapolationMode::Functional, Some(&scale)).unwrap();

    assert_eq!(palette.scale, scale);
    let primary = palette.hue_set("primary").unwrap();
    assert_eq!(primary.locked_indices(), vec![1, 7]);

    let generated = generate_palette(&palette).palette;
    let primary = generated.hue_set("primary").unwrap();
    for label in [300, 400, 500, 600] {
        assert_eq!(
            primary.shade(label).unwrap().extrapolation_method,
            Some(ExtrapolationMethod::Interpolated),
            "label {label}"
        );
    }
    assert_eq!(primary.shade(100).unwrap().color, "#6699cc");
}

#[test]
fn test_import_keeps_file_labels_outside_configured_scale() {
    let json = r##"{"primary": {"500": "#336699", "950": "#102030"}}"##;
    let scale = ShadeScale::default();
    let palette =
        import_palette_str(json, true, ExtrapolationMode::Functional, Some(&scale)).unwrap();

    assert_eq!(palette.scale.len(), 11);
    assert_eq!(palette.scale.labels().last(), Some(&950));
    assert_eq!(palette.hue_sets[0].locked_indices(), vec![5, 10]);
}

#[test]
fn test_export_keeps_ramp_order() {
    let mut palette = Palette::new("Order", ShadeScale::new(vec![50, 500, 900]).unwrap());
    let mut set = HueSet::new("zeta", &palette.scale);
    set.lock(50, Hsv::new(0.0, 0.0, 100.0));
    set.lock(500, Hsv::new(0.0, 100.0, 100.0));
    set.lock(900, Hsv::new(0.0, 0.0, 0.0));
    palette.hue_sets.push(set.clone());
    set.name = "alpha".to_string();
    palette.hue_sets.push(set);

    let json = MuiPalette::from_palette(&palette).to_json().unwrap();
    let zeta = json.find("\"zeta\"").unwrap();
    let alpha = json.find("\"alpha\"").unwrap();
    assert!(zeta < alpha);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["alpha"]["500"], "#ff0000");
    assert_eq!(value["zeta"]["900"], "#000000");

    let yaml = MuiPalette::from_palette(&palette).to_yaml().unwrap();
    assert!(yaml.starts_with("zeta:"));
    assert!(yaml.contains("#ffffff"));
}

#[test]
fn test_provenance_marks_locked_and_generated() {
    let mut set = HueSet::new("primary", &ShadeScale::default());
    set.lock(500, Hsv::new(210.0, 50.0, 80.0));
    set.regenerate();

    let text = render_provenance(&set);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "primary (functional)");
    assert_eq!(lines.len(), 11);
    assert!(lines[6].contains("#6699cc") && lines[6].ends_with("locked"));
    assert!(lines[1].ends_with("adjusted"));
}
