// File: crates/chart-core/tests/smoke.rs
// Purpose: End-to-end render smoke test from chart JSON to a PNG file, with labels and a title.

use anyhow::Context;
use inline_chart_core::{ChartConfig, ChartView, LogicalSize, RenderOptions};

#[test]
fn render_smoke_png() -> anyhow::Result<()> {
    let config = ChartConfig::from_json(
        r#"{ "type": "line",
             "data": { "labels": [2021, 2022, 2023, 2024],
                       "datasets": [ { "label": "Users", "data": [3, 7, 4, 9], "tension": 0.3 } ] },
             "options": { "title": { "text": "Growth" } } }"#,
    )?;
    assert_eq!(config.categories(), ["2021", "2022", "2023", "2024"]);

    let opts = RenderOptions::default();
    let mut view = ChartView::mount(LogicalSize::default(), 1.0, config, None, opts)?;
    assert!(view.last_error().is_none());
    let bytes = view.encode_png()?;
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().context("output has a parent")?)?;
    std::fs::write(&out, &bytes).context("write png")?;
    let meta = std::fs::metadata(&out).context("output exists")?;
    assert!(meta.len() > 0, "png should be non-empty");
    Ok(())
}
